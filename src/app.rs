use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::get_config,
    middleware::{
        auth::{require_admin, require_bearer_auth},
        cors::cors_layer,
        rate_limit::{new_rps_state, rps_middleware},
    },
    routes, AppState,
};

pub fn create_router(state: AppState) -> Router {
    let config = get_config();

    let public_api = Router::new()
        .route("/", get(routes::health::root))
        .route("/api/health", get(routes::health::health))
        .layer(from_fn_with_state(
            new_rps_state(config.public_rps),
            rps_middleware,
        ));

    // Quiz mutations additionally need the admin role.
    let learner_api = Router::new()
        .route(
            "/api/quizzes",
            get(routes::quiz::list_quizzes)
                .merge(post(routes::quiz::create_quiz).layer(from_fn(require_admin))),
        )
        .route(
            "/api/quizzes/:id",
            get(routes::quiz::get_quiz).merge(
                put(routes::quiz::update_quiz)
                    .delete(routes::quiz::delete_quiz)
                    .layer(from_fn(require_admin)),
            ),
        )
        .route(
            "/api/quiz-attempts",
            get(routes::attempt::list_attempts).post(routes::attempt::submit_attempt),
        )
        .route("/api/stats", get(routes::attempt::learner_stats))
        .route("/api/progress/stats", get(routes::attempt::progress_stats))
        .layer(from_fn(require_bearer_auth))
        .layer(from_fn_with_state(
            new_rps_state(config.learner_rps),
            rps_middleware,
        ));

    public_api
        .merge(learner_api)
        .with_state(state)
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
}
