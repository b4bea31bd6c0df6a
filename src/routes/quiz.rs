use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::quiz_dto::{CreateQuizPayload, QuizListResponse, QuizResponse, UpdateQuizPayload},
    error::Result,
    routes::extract::{ApiJson, ApiPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/quizzes",
    responses(
        (status = 200, description = "List of quizzes", body = Json<QuizListResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let quizzes = state.quiz_service.list().await?;
    Ok(Json(QuizListResponse::from(quizzes)))
}

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    params(
        ("id" = Uuid, Path, description = "Quiz ID")
    ),
    responses(
        (status = 200, description = "Quiz found", body = Json<QuizResponse>),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let quiz = state.quiz_service.get_by_id(id).await?;
    Ok(Json(QuizResponse::from(quiz)))
}

#[utoipa::path(
    post,
    path = "/api/quizzes",
    request_body = CreateQuizPayload,
    responses(
        (status = 201, description = "Quiz created successfully", body = Json<QuizResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn create_quiz(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state.quiz_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(QuizResponse::from(quiz))))
}

#[utoipa::path(
    put,
    path = "/api/quizzes/{id}",
    params(
        ("id" = Uuid, Path, description = "Quiz ID")
    ),
    request_body = UpdateQuizPayload,
    responses(
        (status = 200, description = "Quiz updated successfully", body = Json<QuizResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn update_quiz(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state.quiz_service.update(id, payload).await?;
    Ok(Json(QuizResponse::from(quiz)))
}

#[utoipa::path(
    delete,
    path = "/api/quizzes/{id}",
    params(
        ("id" = Uuid, Path, description = "Quiz ID")
    ),
    responses(
        (status = 200, description = "Quiz deleted successfully"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_quiz(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.quiz_service.delete(id).await?;
    Ok(Json(json!({ "message": "Quiz deleted successfully" })))
}
