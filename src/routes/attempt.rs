use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::attempt_dto::{
        AttemptListResponse, LearnerStatsResponse, ProgressResponse, SubmitAttemptPayload,
        SubmitAttemptResponse,
    },
    error::Result,
    middleware::auth::Claims,
    routes::extract::ApiJson,
    services::scoring_service::SubmittedAnswers,
    AppState,
};

#[axum::debug_handler]
pub async fn submit_attempt(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<SubmitAttemptPayload>,
) -> Result<impl IntoResponse> {
    let learner_id = claims.learner_id()?;
    let answers = SubmittedAnswers::from_json(&payload.answers)?;
    tracing::debug!(%learner_id, quiz_id = %payload.quiz_id, answered = answers.len(), "Submitting quiz");

    let outcome = state
        .attempt_service
        .submit(learner_id, payload.quiz_id, &answers, payload.answers)
        .await?;
    Ok(Json(SubmitAttemptResponse::from(outcome)))
}

#[axum::debug_handler]
pub async fn list_attempts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let learner_id = claims.learner_id()?;
    let items = state.attempt_service.list_for_learner(learner_id).await?;
    Ok(Json(AttemptListResponse { items }))
}

#[axum::debug_handler]
pub async fn learner_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let learner_id = claims.learner_id()?;
    let stats = state.attempt_service.learner_stats(learner_id).await?;
    Ok(Json(LearnerStatsResponse::from(stats)))
}

#[axum::debug_handler]
pub async fn progress_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let learner_id = claims.learner_id()?;
    let progress = state
        .attempt_service
        .progress(learner_id, state.weak_area_limit)
        .await?;
    Ok(Json(ProgressResponse::from(progress)))
}
