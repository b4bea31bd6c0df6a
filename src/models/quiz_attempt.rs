use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub answers: JsonValue,
    pub score: i32,
    pub total_questions: i32,
    pub category_performance: Json<Vec<CategoryTally>>,
    pub completed_at: DateTime<Utc>,
}

/// Attempt joined with the title and description of its quiz.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttemptSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub quiz_description: String,
    pub score: i32,
    pub total_questions: i32,
    pub category_performance: Json<Vec<CategoryTally>>,
    pub completed_at: DateTime<Utc>,
}

/// Correct/wrong/total counts for one category. `correct + wrong == total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub category: String,
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
}

impl CategoryTally {
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            correct: 0,
            wrong: 0,
            total: 0,
        }
    }

    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        self.total += 1;
    }

    pub fn absorb(&mut self, other: &CategoryTally) {
        self.correct += other.correct;
        self.wrong += other.wrong;
        self.total += other.total;
    }
}
