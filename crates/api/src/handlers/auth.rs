//! Handlers for the `/auth` resource (register, login, current user, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::error::CoreError;
use schooldesk_core::validation::{confirmation_message, unique_message, FieldErrors};
use schooldesk_db::models::api_token::CreateApiToken;
use schooldesk_db::models::user::{CreateUser, User, UserResponse};
use schooldesk_db::repositories::{ApiTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_token, hash_token_id};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `data` payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return it with a fresh bearer token.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    let mut errors = FieldErrors::new();
    errors.merge(input.validate());

    let name = errors.require_text("name", input.name.as_deref());
    let email = errors.require_text("email", input.email.as_deref());
    // Passwords are not trimmed.
    let password = errors.require(
        "password",
        input.password.as_deref().filter(|p| !p.is_empty()),
    );
    if password.is_some() && input.password != input.password_confirmation {
        errors.add("password", confirmation_message("password"));
    }

    if let Some(email) = email.as_deref() {
        if UserRepo::email_taken(&state.pool, email).await? {
            errors.add("email", unique_message("email"));
        }
    }

    let (name, email, password) = match (name, email, password) {
        (Some(name), Some(email), Some(password)) if errors.is_empty() => (name, email, password),
        _ => return Err(errors.into()),
    };

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = issue_token(&state, user).await?;
    Ok(DataResponse::new(response, "Registered successfully.").created())
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and return a fresh bearer token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<DataResponse<AuthResponse>> {
    let mut errors = FieldErrors::new();
    errors.merge(input.validate());
    let email = errors.require_text("email", input.email.as_deref());
    let password = errors.require(
        "password",
        input.password.as_deref().filter(|p| !p.is_empty()),
    );

    let (email, password) = match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => (email, password),
        _ => return Err(errors.into()),
    };

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password.".into()));

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let response = issue_token(&state, user).await?;
    Ok(DataResponse::new(response, "Logged in successfully."))
}

/// GET /api/v1/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<DataResponse<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(DataResponse::new(
        UserResponse::from(user),
        "User details retrieved.",
    ))
}

/// POST /api/v1/auth/logout
///
/// Revoke the token used for this request. Other tokens stay valid.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<MessageResponse> {
    ApiTokenRepo::revoke(&state.pool, auth.token_id).await?;
    tracing::info!(user_id = auth.user_id, token_id = auth.token_id, "Token revoked");
    Ok(MessageResponse::new("Logged out successfully."))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign a token, persist its `jti` hash, and build the response.
async fn issue_token(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let (token, claims) = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
        .ok_or_else(|| AppError::InternalError("Token expiry out of range".into()))?;

    ApiTokenRepo::create(
        &state.pool,
        &CreateApiToken {
            user_id: user.id,
            token_hash: hash_token_id(&claims.jti),
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        user: user.into(),
        token,
    })
}
