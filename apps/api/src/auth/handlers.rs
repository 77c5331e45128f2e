//! Handlers for `/api/auth` (register, token, me, logout).

use anyhow::anyhow;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::{ApiForm, ApiJson};
use crate::models::user::{NewUser, UserProfile};
use crate::state::AppState;
use crate::validation::{
    check_optional_text, check_text, EMAIL_MAX, FULL_NAME_MAX, USERNAME_MAX,
};

const BAD_CREDENTIALS: &str = "Incorrect username or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("username cannot be empty".to_string()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(AppError::Validation("email must be a valid address".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        check_text("username", &self.username, USERNAME_MAX)?;
        check_text("email", &self.email, EMAIL_MAX)?;
        check_optional_text("full_name", self.full_name.as_deref(), FULL_NAME_MAX)?;
        Ok(())
    }
}

/// OAuth2 password-grant form. Extra fields (`grant_type`, `scope`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/auth/register
///
/// Creates the user and its progress record. Does not issue a token.
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    req.validate()?;

    if state.store.find_user_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already registered".to_string()));
    }
    if state.store.email_taken(&req.email).await? {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password = req.password;
    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| anyhow!("password hashing task failed: {e}"))?
        .map_err(|e| anyhow!("password hashing failed: {e}"))?;

    let user = state
        .store
        .create_user(NewUser {
            username: req.username,
            email: req.email,
            full_name: req.full_name,
            hashed_password,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /api/auth/token
///
/// Exchanges form-encoded credentials for a bearer token.
pub async fn handle_token(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state
        .store
        .find_user_by_username(&form.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    let password = form.password;
    let stored_hash = user.hashed_password.clone();
    let password_valid =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| anyhow!("password verification task failed: {e}"))?
            .map_err(|e| anyhow!("password verification error: {e}"))?;

    if !password_valid {
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let access_token = generate_access_token(&user.username, &state.config.jwt)
        .map_err(|e| anyhow!("token generation error: {e}"))?;

    info!(user_id = user.id, username = %user.username, "Issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// GET /api/auth/me
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

/// POST /api/auth/logout
///
/// Acknowledgment only. The token is not revoked and stays valid until it expires.
pub async fn handle_logout(CurrentUser(user): CurrentUser) -> Json<Value> {
    info!(username = %user.username, "User logged out");
    Json(json!({ "message": "Successfully logged out" }))
}
