use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub options: QuestionOptions,
    pub correct_option: OptionLabel,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

pub fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One of the four fixed answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOptionLabel(pub String);

impl fmt::Display for UnknownOptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option label: {:?}", self.0)
    }
}

impl std::error::Error for UnknownOptionLabel {}

impl FromStr for OptionLabel {
    type Err = UnknownOptionLabel;

    // Exact match only; "a" or " A" are not labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            other => Err(UnknownOptionLabel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl QuestionOptions {
    pub fn get(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }

    pub fn has_blank(&self) -> bool {
        OptionLabel::ALL
            .iter()
            .any(|label| self.get(*label).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_parse_exactly() {
        assert_eq!("C".parse::<OptionLabel>(), Ok(OptionLabel::C));
        assert!("c".parse::<OptionLabel>().is_err());
        assert!(" A".parse::<OptionLabel>().is_err());
        assert!("E".parse::<OptionLabel>().is_err());
    }

    #[test]
    fn question_defaults_category_and_rejects_unknown_correct_option() {
        let q: Question = serde_json::from_value(json!({
            "id": "q1",
            "text": "Which PPE protects against falling objects?",
            "options": {"A": "Gloves", "B": "Helmet", "C": "Goggles", "D": "Boots"},
            "correct_option": "B"
        }))
        .unwrap();
        assert_eq!(q.category, DEFAULT_CATEGORY);
        assert_eq!(q.options.get(q.correct_option), "Helmet");
        assert!(q.explanation.is_none());

        let bad = serde_json::from_value::<Question>(json!({
            "text": "?",
            "options": {"A": "1", "B": "2", "C": "3", "D": "4"},
            "correct_option": "E"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn blank_option_is_detected() {
        let options = QuestionOptions {
            a: "x".into(),
            b: "  ".into(),
            c: "y".into(),
            d: "z".into(),
        };
        assert!(options.has_blank());
    }
}
