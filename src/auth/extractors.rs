use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller's phone number, proven by a verified bearer
/// token. Extraction runs before the handler body, so a missing or bad
/// token short-circuits the request with 403 before any work happens.
#[derive(Debug)]
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let claims = state.keys.verify(token).map_err(|e| {
            warn!("invalid or expired token");
            e
        })?;

        Ok(AuthUser(claims.phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = axum::http::Request::builder().uri("/profile");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_a_valid_bearer_token() {
        let state = AppState::fake();
        let token = state.keys.sign("+62821111121").expect("sign");
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));
        let AuthUser(phone) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("extract");
        assert_eq!(phone, "+62821111121");
    }

    #[tokio::test]
    async fn rejects_a_missing_header() {
        let state = AppState::fake();
        let mut parts = parts_with_header(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn rejects_a_non_bearer_scheme() {
        let state = AppState::fake();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn rejects_a_garbage_token() {
        let state = AppState::fake();
        let mut parts = parts_with_header(Some("Bearer definitely.not.valid"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
