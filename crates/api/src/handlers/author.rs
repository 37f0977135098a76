//! Handlers for the `/authors` resource.
//!
//! Author names are unique across the whole table, soft-deleted rows
//! included, matching the `uq_authors_name` constraint. The uniqueness check
//! runs alongside the field rules so all errors come back together; a
//! concurrent insert that slips past it still surfaces as a 409 from the
//! constraint.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::error::CoreError;
use schooldesk_core::pagination::PaginationMeta;
use schooldesk_core::types::DbId;
use schooldesk_core::validation::unique_message;
use schooldesk_db::models::author::{Author, CreateAuthor};
use schooldesk_db::models::named::NameFilter;
use schooldesk_db::repositories::AuthorRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::handlers::named::{NamePayload, SearchEcho};
use crate::middleware::auth::AuthUser;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Author",
        id,
    })
}

/// Field rules plus name uniqueness, ignoring `exclude_id` on update.
async fn validate_payload(
    pool: &PgPool,
    payload: &NamePayload,
    exclude_id: Option<DbId>,
) -> AppResult<CreateAuthor> {
    let (name, mut errors) = payload.check();

    if let Some(name) = name.as_deref() {
        if AuthorRepo::name_taken(pool, name, exclude_id).await? {
            errors.add("name", unique_message("name"));
        }
    }

    match name {
        Some(name) if errors.is_empty() => Ok(CreateAuthor { name }),
        _ => Err(errors.into()),
    }
}

/// GET /api/v1/authors
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListParams>,
    Query(search): Query<SearchParams>,
) -> AppResult<ListResponse<Author, SearchEcho>> {
    let page = params.page_request(AuthorRepo::SORT_FIELDS, AuthorRepo::DEFAULT_SORT);
    let filter = NameFilter {
        search: search.term(),
    };

    let total = AuthorRepo::count(&state.pool, &filter).await?;
    let authors = AuthorRepo::list(&state.pool, &filter, &page).await?;

    Ok(ListResponse::new(
        authors,
        "Authors retrieved successfully.",
        PaginationMeta::new(&page, total),
        SearchEcho::from(&filter),
    ))
}

/// GET /api/v1/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<DataResponse<Author>> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(author, "Author retrieved successfully."))
}

/// POST /api/v1/authors
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Author>>)> {
    let input = validate_payload(&state.pool, &payload, None).await?;
    let author = AuthorRepo::create(&state.pool, &input).await?;

    tracing::info!(author_id = author.id, user_id = auth.user_id, "Author created");
    Ok(DataResponse::new(author, "Author created successfully.").created())
}

/// PUT /api/v1/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<NamePayload>,
) -> AppResult<DataResponse<Author>> {
    if !AuthorRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let input = validate_payload(&state.pool, &payload, Some(id)).await?;
    let author = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(author, "Author updated successfully."))
}

/// DELETE /api/v1/authors/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<MessageResponse> {
    if !AuthorRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(author_id = id, user_id = auth.user_id, "Author deleted");
    Ok(MessageResponse::new("Author deleted successfully."))
}
