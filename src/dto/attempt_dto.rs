use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::quiz_attempt::{AttemptSummary, CategoryTally};
use crate::services::attempt_service::{LearnerProgress, LearnerStats, SubmissionOutcome};
use crate::services::scoring_service::{GradedAnswer, WeakArea};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAttemptPayload {
    pub quiz_id: Uuid,
    /// Question id -> option label. Anything but an object is rejected.
    #[serde(default)]
    pub answers: JsonValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAttemptResponse {
    pub message: String,
    pub attempt_id: Uuid,
    pub quiz_id: Uuid,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub category_performance: Vec<CategoryTally>,
    pub review: Vec<GradedAnswer>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptListResponse {
    pub items: Vec<AttemptSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerStatsResponse {
    pub total_attempts: i64,
    pub average_score: f64,
    pub total_score: i64,
    pub total_questions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub attempts: Vec<AttemptSummary>,
    pub weak_areas: Vec<WeakArea>,
}

impl From<SubmissionOutcome> for SubmitAttemptResponse {
    fn from(value: SubmissionOutcome) -> Self {
        Self {
            message: "Quiz stored successfully".to_string(),
            attempt_id: value.attempt.id,
            quiz_id: value.attempt.quiz_id,
            score: value.result.score,
            total_questions: value.result.total_questions,
            percentage: value.result.percentage(),
            category_performance: value.result.category_breakdown,
            review: value.review,
            completed_at: value.attempt.completed_at,
        }
    }
}

impl From<LearnerStats> for LearnerStatsResponse {
    fn from(value: LearnerStats) -> Self {
        Self {
            total_attempts: value.total_attempts,
            average_score: value.average_score,
            total_score: value.total_score,
            total_questions: value.total_questions,
        }
    }
}

impl From<LearnerProgress> for ProgressResponse {
    fn from(value: LearnerProgress) -> Self {
        Self {
            attempts: value.attempts,
            weak_areas: value.weak_areas,
        }
    }
}
