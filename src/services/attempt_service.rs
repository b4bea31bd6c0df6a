use chrono::Utc;
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::quiz_attempt::{AttemptSummary, CategoryTally, QuizAttempt};
use crate::services::quiz_service::QuizService;
use crate::services::scoring_service::{
    AttemptResult, GradedAnswer, ScoringService, SubmittedAnswers, WeakArea,
};

#[derive(Clone)]
pub struct AttemptService {
    pool: PgPool,
    quiz_service: QuizService,
}

pub struct SubmissionOutcome {
    pub attempt: QuizAttempt,
    pub result: AttemptResult,
    pub review: Vec<GradedAnswer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LearnerStats {
    pub total_attempts: i64,
    pub total_score: i64,
    pub total_questions: i64,
    pub average_score: f64,
}

pub struct LearnerProgress {
    pub attempts: Vec<AttemptSummary>,
    pub weak_areas: Vec<WeakArea>,
}

impl AttemptService {
    pub fn new(pool: PgPool) -> Self {
        let quiz_service = QuizService::new(pool.clone());
        Self { pool, quiz_service }
    }

    /// Scores `answers` against the stored quiz and records the attempt.
    pub async fn submit(
        &self,
        learner_id: Uuid,
        quiz_id: Uuid,
        answers: &SubmittedAnswers,
        raw_answers: JsonValue,
    ) -> Result<SubmissionOutcome> {
        let quiz = self.quiz_service.get_by_id(quiz_id).await?;

        let result = ScoringService::score(quiz.questions(), answers)?;
        let review = ScoringService::review(quiz.questions(), answers);

        let attempt = self
            .save_attempt(learner_id, quiz.id, raw_answers, &result)
            .await?;

        tracing::info!(
            attempt_id = %attempt.id,
            %learner_id,
            %quiz_id,
            score = result.score,
            total = result.total_questions,
            "Quiz attempt stored"
        );

        Ok(SubmissionOutcome {
            attempt,
            result,
            review,
        })
    }

    pub async fn save_attempt(
        &self,
        learner_id: Uuid,
        quiz_id: Uuid,
        raw_answers: JsonValue,
        result: &AttemptResult,
    ) -> Result<QuizAttempt> {
        let attempt = sqlx::query_as::<_, QuizAttempt>(
            r#"
            INSERT INTO quiz_attempts (
                id, user_id, quiz_id, answers, score, total_questions,
                category_performance, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(learner_id)
        .bind(quiz_id)
        .bind(raw_answers)
        .bind(result.score as i32)
        .bind(result.total_questions as i32)
        .bind(Json(&result.category_breakdown))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(attempt)
    }

    pub async fn list_for_learner(&self, learner_id: Uuid) -> Result<Vec<AttemptSummary>> {
        let attempts = sqlx::query_as::<_, AttemptSummary>(
            r#"
            SELECT
                a.id,
                a.quiz_id,
                q.title AS quiz_title,
                q.description AS quiz_description,
                a.score,
                a.total_questions,
                a.category_performance,
                a.completed_at
            FROM quiz_attempts a
            JOIN quizzes q ON q.id = a.quiz_id
            WHERE a.user_id = $1
            ORDER BY a.completed_at DESC
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }

    /// Category tallies summed over every stored attempt of the learner.
    pub async fn fetch_past_tallies(&self, learner_id: Uuid) -> Result<Vec<CategoryTally>> {
        let rows: Vec<Json<Vec<CategoryTally>>> = sqlx::query_scalar(
            r#"SELECT category_performance FROM quiz_attempts WHERE user_id = $1"#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ScoringService::merge_tallies(rows.iter().flat_map(|r| r.0.iter())))
    }

    pub async fn learner_stats(&self, learner_id: Uuid) -> Result<LearnerStats> {
        let (total_attempts, total_score, total_questions): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*)::BIGINT,
                COALESCE(SUM(score), 0)::BIGINT,
                COALESCE(SUM(total_questions), 0)::BIGINT
            FROM quiz_attempts
            WHERE user_id = $1
            "#,
        )
        .bind(learner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(LearnerStats {
            total_attempts,
            total_score,
            total_questions,
            average_score: ScoringService::average_percentage(total_score, total_questions),
        })
    }

    pub async fn progress(&self, learner_id: Uuid, weak_area_limit: usize) -> Result<LearnerProgress> {
        let attempts = self.list_for_learner(learner_id).await?;
        if attempts.is_empty() {
            return Ok(LearnerProgress {
                attempts,
                weak_areas: Vec::new(),
            });
        }

        let tallies = self.fetch_past_tallies(learner_id).await?;
        let weak_areas = ScoringService::weakest_categories(&tallies, weak_area_limit);

        Ok(LearnerProgress {
            attempts,
            weak_areas,
        })
    }
}
