use std::collections::HashSet;

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quiz_dto::{CreateQuizPayload, QuestionPayload, UpdateQuizPayload};
use crate::error::{Error, Result};
use crate::models::question::{default_category, Question};
use crate::models::quiz::Quiz;

#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
}

impl QuizService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateQuizPayload) -> Result<Quiz> {
        let questions = build_questions(&payload.questions)?;
        let fields = normalize_quiz_fields(
            Some(&payload.title),
            Some(&payload.description),
            payload.category.as_deref(),
        )?;
        let category = fields.category.unwrap_or_else(default_category);

        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (id, title, description, category, questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, category, questions, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.title)
        .bind(fields.description)
        .bind(category)
        .bind(Json(&questions))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(quiz_id = %quiz.id, questions = questions.len(), "Quiz created");
        Ok(quiz)
    }

    pub async fn list(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, description, category, questions, created_at, updated_at
            FROM quizzes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Quiz> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, description, category, questions, created_at, updated_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        quiz.ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    pub async fn update(&self, id: Uuid, payload: UpdateQuizPayload) -> Result<Quiz> {
        let questions = match &payload.questions {
            Some(qs) => Some(Json(build_questions(qs)?)),
            None => None,
        };
        let fields = normalize_quiz_fields(
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.category.as_deref(),
        )?;

        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            UPDATE quizzes
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                questions = COALESCE($5, questions),
                updated_at = $6
            WHERE id = $1
            RETURNING id, title, description, category, questions, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.category)
        .bind(questions)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        let quiz = quiz.ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        tracing::info!(quiz_id = %quiz.id, "Quiz updated");
        Ok(quiz)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        tracing::info!(quiz_id = %id, "Quiz deleted");
        Ok(())
    }
}

/// Trimmed quiz-level text. `None` leaves the stored value alone on update.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct QuizFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Trims title, description and category. A title or description that is
/// blank once trimmed is rejected; a blank category counts as not given.
pub fn normalize_quiz_fields(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
) -> Result<QuizFields> {
    Ok(QuizFields {
        title: title.map(|t| non_blank("title", t)).transpose()?,
        description: description.map(|d| non_blank("description", d)).transpose()?,
        category: category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    })
}

fn non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::BadRequest(format!("Quiz {} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}

/// Turns payload questions into stored questions: assigns `q{n}` ids where
/// missing, defaults categories and rejects duplicates or blank text.
pub fn build_questions(payload: &[QuestionPayload]) -> Result<Vec<Question>> {
    if payload.is_empty() {
        return Err(Error::BadRequest(
            "A quiz needs at least one question".to_string(),
        ));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut questions = Vec::with_capacity(payload.len());

    for (idx, q) in payload.iter().enumerate() {
        let id = q
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("q{}", idx + 1));

        if !seen.insert(id.clone()) {
            return Err(Error::BadRequest(format!("Duplicate question id: {}", id)));
        }
        if q.text.trim().is_empty() {
            return Err(Error::BadRequest(format!("Question {} has no text", id)));
        }
        if q.options.has_blank() {
            return Err(Error::BadRequest(format!(
                "Question {} must define all four options",
                id
            )));
        }

        questions.push(Question {
            id,
            text: q.text.trim().to_string(),
            options: q.options.clone(),
            correct_option: q.correct_option,
            category: q
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .unwrap_or_else(default_category),
            explanation: q.explanation.clone(),
        });
    }

    Ok(questions)
}
