//! Handlers for the `/publishers` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::error::CoreError;
use schooldesk_core::pagination::PaginationMeta;
use schooldesk_core::types::DbId;
use schooldesk_db::models::named::NameFilter;
use schooldesk_db::models::publisher::{CreatePublisher, Publisher};
use schooldesk_db::repositories::PublisherRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::handlers::named::{NamePayload, SearchEcho};
use crate::middleware::auth::AuthUser;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Publisher",
        id,
    })
}

/// GET /api/v1/publishers
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListParams>,
    Query(search): Query<SearchParams>,
) -> AppResult<ListResponse<Publisher, SearchEcho>> {
    let page = params.page_request(PublisherRepo::SORT_FIELDS, PublisherRepo::DEFAULT_SORT);
    let filter = NameFilter {
        search: search.term(),
    };

    let total = PublisherRepo::count(&state.pool, &filter).await?;
    let publishers = PublisherRepo::list(&state.pool, &filter, &page).await?;

    Ok(ListResponse::new(
        publishers,
        "Publishers retrieved successfully.",
        PaginationMeta::new(&page, total),
        SearchEcho::from(&filter),
    ))
}

/// GET /api/v1/publishers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<DataResponse<Publisher>> {
    let publisher = PublisherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(publisher, "Publisher retrieved successfully."))
}

/// POST /api/v1/publishers
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Publisher>>)> {
    let name = payload.into_name()?;
    let publisher = PublisherRepo::create(&state.pool, &CreatePublisher { name }).await?;

    tracing::info!(
        publisher_id = publisher.id,
        user_id = auth.user_id,
        "Publisher created"
    );
    Ok(DataResponse::new(publisher, "Publisher created successfully.").created())
}

/// PUT /api/v1/publishers/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<DataResponse<Publisher>> {
    if !PublisherRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let name = payload.into_name()?;
    let publisher = PublisherRepo::update(&state.pool, id, &CreatePublisher { name })
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(publisher, "Publisher updated successfully."))
}

/// DELETE /api/v1/publishers/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<MessageResponse> {
    if !PublisherRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(publisher_id = id, user_id = auth.user_id, "Publisher deleted");
    Ok(MessageResponse::new("Publisher deleted successfully."))
}
