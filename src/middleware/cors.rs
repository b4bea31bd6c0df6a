use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Permissive unless a single frontend origin is configured.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}
