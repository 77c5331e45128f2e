//! Request authorization: bearer token -> signature/expiry -> identity lookup
//! -> active check. Only a request that passes every step reaches the handler.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::auth::jwt::validate_token;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

const CREDENTIALS_REJECTED: &str = "Could not validate credentials";

/// The resolved, active user behind the request's bearer token.
///
/// ```ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> Json<UserProfile> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Extracts the token from `Authorization: Bearer <token>` (scheme is case-insensitive).
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            debug!("Rejected bearer token: {e}");
            AppError::Unauthorized(CREDENTIALS_REJECTED.into())
        })?;

        // The subject may have been removed since the token was issued.
        let user = state
            .store
            .find_user_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized(CREDENTIALS_REJECTED.into()))?;

        if user.disabled {
            return Err(AppError::InactiveUser);
        }

        Ok(CurrentUser(user))
    }
}
