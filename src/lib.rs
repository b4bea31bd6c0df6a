pub mod app;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{attempt_service::AttemptService, quiz_service::QuizService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quiz_service: QuizService,
    pub attempt_service: AttemptService,
    pub weak_area_limit: usize,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let quiz_service = QuizService::new(pool.clone());
        let attempt_service = AttemptService::new(pool.clone());

        Self {
            pool,
            quiz_service,
            attempt_service,
            weak_area_limit: config.weak_area_limit,
        }
    }
}
