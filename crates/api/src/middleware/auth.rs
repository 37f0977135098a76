//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use schooldesk_core::error::CoreError;
use schooldesk_core::types::DbId;
use schooldesk_db::repositories::ApiTokenRepo;

use crate::auth::jwt::{hash_token_id, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the `Authorization: Bearer` header.
///
/// The token must carry a valid signature and expiry, and its `jti` must map
/// to an unrevoked, unexpired row in `api_tokens`. Add this as a handler
/// parameter to require authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The `api_tokens` row backing this request; revoked on logout.
    pub token_id: DbId,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let record = ApiTokenRepo::find_active_by_hash(&state.pool, &hash_token_id(&claims.jti))
            .await?
            .filter(|record| record.user_id == claims.sub)
            .ok_or_else(|| unauthorized("Token has been revoked"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            token_id: record.id,
        })
    }
}
