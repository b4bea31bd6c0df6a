use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::question::{OptionLabel, Question, QuestionOptions};
use crate::models::quiz::Quiz;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub id: Option<String>,
    pub text: String,
    pub options: QuestionOptions,
    pub correct_option: OptionLabel,
    pub category: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: Option<String>,
    #[validate(length(min = 1, message = "a quiz needs at least one question"))]
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateQuizPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "a quiz needs at least one question"))]
    pub questions: Option<Vec<QuestionPayload>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub question_count: usize,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub items: Vec<QuizResponse>,
    pub total: usize,
}

impl From<Quiz> for QuizResponse {
    fn from(value: Quiz) -> Self {
        let questions = value.questions.0;
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            category: value.category,
            question_count: questions.len(),
            questions,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Vec<Quiz>> for QuizListResponse {
    fn from(value: Vec<Quiz>) -> Self {
        let items: Vec<QuizResponse> = value.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}
