//! Quiz scoring and category-performance aggregation.
//!
//! Everything here is a pure transform over values handed in by the caller:
//! no I/O, no logging, no shared state.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::question::{OptionLabel, Question};
use crate::models::quiz_attempt::CategoryTally;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// What a learner sent for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedChoice {
    Selected(OptionLabel),
    Unrecognized(String),
}

impl SubmittedChoice {
    pub fn from_raw(raw: &str) -> Self {
        raw.parse::<OptionLabel>()
            .map(SubmittedChoice::Selected)
            .unwrap_or_else(|_| SubmittedChoice::Unrecognized(raw.to_string()))
    }

    fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(raw) => Self::from_raw(raw),
            other => SubmittedChoice::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> Option<OptionLabel> {
        match self {
            SubmittedChoice::Selected(label) => Some(*label),
            SubmittedChoice::Unrecognized(_) => None,
        }
    }
}

/// Question id -> submitted choice. Missing ids mean "unanswered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedAnswers(HashMap<String, SubmittedChoice>);

impl SubmittedAnswers {
    pub fn from_json(value: &JsonValue) -> Result<Self, ScoringError> {
        let map = value.as_object().ok_or_else(|| {
            ScoringError::InvalidInput("answers must be an object keyed by question id".to_string())
        })?;
        Ok(Self(
            map.iter()
                .map(|(id, choice)| (id.clone(), SubmittedChoice::from_json(choice)))
                .collect(),
        ))
    }

    pub fn get(&self, question_id: &str) -> Option<&SubmittedChoice> {
        self.0.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_correct(&self, question: &Question) -> bool {
        self.selected(question) == Some(question.correct_option)
    }

    fn selected(&self, question: &Question) -> Option<OptionLabel> {
        self.get(&question.id).and_then(SubmittedChoice::label)
    }
}

impl<K, V> FromIterator<(K, V)> for SubmittedAnswers
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, raw)| (id.into(), SubmittedChoice::from_raw(raw.as_ref())))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub score: u32,
    pub total_questions: u32,
    pub category_breakdown: Vec<CategoryTally>,
}

impl AttemptResult {
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / f64::from(self.total_questions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question_id: String,
    pub category: String,
    pub selected: Option<OptionLabel>,
    pub correct_option: OptionLabel,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakArea {
    pub category: String,
    pub accuracy: f64,
}

pub struct ScoringService;

impl ScoringService {
    pub fn score(
        questions: &[Question],
        answers: &SubmittedAnswers,
    ) -> Result<AttemptResult, ScoringError> {
        if questions.is_empty() {
            return Err(ScoringError::InvalidInput(
                "quiz has no questions".to_string(),
            ));
        }

        let mut score: u32 = 0;
        let mut tallies: BTreeMap<&str, CategoryTally> = BTreeMap::new();

        for q in questions {
            let is_correct = answers.is_correct(q);
            if is_correct {
                score += 1;
            }
            tallies
                .entry(q.category.as_str())
                .or_insert_with(|| CategoryTally::empty(q.category.as_str()))
                .record(is_correct);
        }

        Ok(AttemptResult {
            score,
            total_questions: questions.len() as u32,
            category_breakdown: tallies.into_values().collect(),
        })
    }

    /// Per-question review in display order.
    pub fn review(questions: &[Question], answers: &SubmittedAnswers) -> Vec<GradedAnswer> {
        questions
            .iter()
            .map(|q| GradedAnswer {
                question_id: q.id.clone(),
                category: q.category.clone(),
                selected: answers.selected(q),
                correct_option: q.correct_option,
                is_correct: answers.is_correct(q),
                explanation: q.explanation.clone().filter(|e| !e.trim().is_empty()),
            })
            .collect()
    }

    /// Sums tallies that share a category. Output is sorted by category name.
    pub fn merge_tallies<'a, I>(tallies: I) -> Vec<CategoryTally>
    where
        I: IntoIterator<Item = &'a CategoryTally>,
    {
        let mut merged: BTreeMap<&str, CategoryTally> = BTreeMap::new();
        for t in tallies {
            merged
                .entry(t.category.as_str())
                .or_insert_with(|| CategoryTally::empty(t.category.as_str()))
                .absorb(t);
        }
        merged.into_values().collect()
    }

    /// Lowest-accuracy categories first, ties by name. Categories with no
    /// questions are skipped.
    pub fn weakest_categories(tallies: &[CategoryTally], n: usize) -> Vec<WeakArea> {
        let mut areas: Vec<WeakArea> = Self::merge_tallies(tallies)
            .into_iter()
            .filter(|t| t.total > 0)
            .map(|t| WeakArea {
                accuracy: f64::from(t.correct) * 100.0 / f64::from(t.total),
                category: t.category,
            })
            .collect();

        areas.sort_by(|a, b| {
            a.accuracy
                .total_cmp(&b.accuracy)
                .then_with(|| a.category.cmp(&b.category))
        });
        areas.truncate(n);
        areas
    }

    pub fn average_percentage(total_score: i64, total_questions: i64) -> f64 {
        if total_questions <= 0 {
            return 0.0;
        }
        let pct = total_score as f64 / total_questions as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}
