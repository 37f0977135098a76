//! Handlers for the `/requesters` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::error::CoreError;
use schooldesk_core::pagination::PaginationMeta;
use schooldesk_core::types::DbId;
use schooldesk_db::models::named::NameFilter;
use schooldesk_db::models::requester::{CreateRequester, Requester};
use schooldesk_db::repositories::RequesterRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::handlers::named::{NamePayload, SearchEcho};
use crate::middleware::auth::AuthUser;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Requester",
        id,
    })
}

/// GET /api/v1/requesters
///
/// Paginated listing with an optional case-insensitive `search` on name.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListParams>,
    Query(search): Query<SearchParams>,
) -> AppResult<ListResponse<Requester, SearchEcho>> {
    let page = params.page_request(RequesterRepo::SORT_FIELDS, RequesterRepo::DEFAULT_SORT);
    let filter = NameFilter {
        search: search.term(),
    };

    let total = RequesterRepo::count(&state.pool, &filter).await?;
    let requesters = RequesterRepo::list(&state.pool, &filter, &page).await?;

    Ok(ListResponse::new(
        requesters,
        "Requesters retrieved successfully.",
        PaginationMeta::new(&page, total),
        SearchEcho::from(&filter),
    ))
}

/// GET /api/v1/requesters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<DataResponse<Requester>> {
    let requester = RequesterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(requester, "Requester retrieved successfully."))
}

/// POST /api/v1/requesters
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Requester>>)> {
    let name = payload.into_name()?;
    let requester = RequesterRepo::create(&state.pool, &CreateRequester { name }).await?;

    tracing::info!(
        requester_id = requester.id,
        user_id = auth.user_id,
        "Requester created"
    );
    Ok(DataResponse::new(requester, "Requester created successfully.").created())
}

/// PUT /api/v1/requesters/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<DataResponse<Requester>> {
    if !RequesterRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let name = payload.into_name()?;
    let requester = RequesterRepo::update(&state.pool, id, &CreateRequester { name })
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(requester, "Requester updated successfully."))
}

/// DELETE /api/v1/requesters/{id}
///
/// Soft delete. The requester's print requests keep pointing at it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<MessageResponse> {
    if !RequesterRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(requester_id = id, user_id = auth.user_id, "Requester deleted");
    Ok(MessageResponse::new("Requester deleted successfully."))
}
