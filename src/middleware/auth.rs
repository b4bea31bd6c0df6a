use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn learner_id(&self) -> Result<Uuid, Error> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| Error::Unauthorized("Token subject is not a learner id".to_string()))
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("admin"))
    }
}

fn decode_bearer(headers: &HeaderMap) -> Result<Claims, Error> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("Access token required".to_string()))?;
    let auth_str = auth_header
        .to_str()
        .map_err(|_| Error::Unauthorized("Malformed authorization header".to_string()))?;
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("Unsupported authorization scheme".to_string()))?;

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthorized("Invalid or expired token".to_string()))
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    match decode_bearer(req.headers()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Runs inside [`require_bearer_auth`] and checks the claims it stored.
pub async fn require_admin(req: Request, next: Next) -> Response {
    match req.extensions().get::<Claims>().map(Claims::is_admin) {
        Some(true) => next.run(req).await,
        Some(false) => Error::Forbidden("Admin access required".to_string()).into_response(),
        None => Error::Unauthorized("Access token required".to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn claims(sub: &str, role: Option<&str>) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: 0,
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn learner_id_must_be_a_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(claims(&id.to_string(), None).learner_id().unwrap(), id);
        assert!(claims("trainee-17", None).learner_id().is_err());
    }

    #[test]
    fn admin_role_is_case_insensitive() {
        assert!(claims("x", Some("Admin")).is_admin());
        assert!(!claims("x", Some("student")).is_admin());
        assert!(!claims("x", None).is_admin());
    }

    fn admin_only() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(from_fn(require_admin))
    }

    #[tokio::test]
    async fn admin_gate_reads_claims_from_extensions() {
        let mut req = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();
        req.extensions_mut().insert(claims("x", Some("admin")));
        let resp = admin_only().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let mut req = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();
        req.extensions_mut().insert(claims("x", Some("student")));
        let resp = admin_only().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_gate_without_claims_is_unauthorized() {
        // The gate never decodes headers itself.
        let req = HttpRequest::builder()
            .uri("/")
            .header(AUTHORIZATION, "Bearer whatever")
            .body(Body::empty())
            .unwrap();
        let resp = admin_only().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
