//! Handlers for the `/books` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use schooldesk_core::book_level::BookLevel;
use schooldesk_core::error::CoreError;
use schooldesk_core::pagination::PaginationMeta;
use schooldesk_core::types::DbId;
use schooldesk_core::validation::{
    boolean_message, exists_message, integer_message, string_message, unique_message,
    FieldErrors,
};
use schooldesk_db::models::book::{Book, BookFilter, BookRow, BookWithRelations, CreateBook};
use schooldesk_db::repositories::{AuthorRepo, BookRepo, PublisherRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{BodyField, IdPath, JsonBody};
use crate::middleware::auth::AuthUser;
use crate::query::{lenient, non_blank, parse_flag, ListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /books` and `PUT /books/{id}`.
///
/// Fields are read leniently so a value of the wrong JSON type is reported
/// under its own key alongside every other failing field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookPayload {
    pub name: BodyField<String>,
    #[serde(rename = "type")]
    pub book_type: BodyField<String>,
    pub language: BodyField<String>,
    pub page_count: BodyField<i32>,
    pub is_donation: BodyField<bool>,
    pub barcode: BodyField<String>,
    pub shelf_code: BodyField<String>,
    pub fixture_no: BodyField<String>,
    pub author_id: BodyField<DbId>,
    pub publisher_id: BodyField<DbId>,
    pub level: BodyField<String>,
}

impl BookPayload {
    fn into_fields(self, errors: &mut FieldErrors) -> BookFields {
        BookFields {
            name: self.name.check(errors, "name", string_message),
            book_type: self.book_type.check(errors, "type", string_message),
            language: self.language.check(errors, "language", string_message),
            page_count: self.page_count.check(errors, "page_count", integer_message),
            is_donation: self.is_donation.check(errors, "is_donation", boolean_message),
            barcode: self.barcode.check(errors, "barcode", string_message),
            shelf_code: self.shelf_code.check(errors, "shelf_code", string_message),
            fixture_no: self.fixture_no.check(errors, "fixture_no", string_message),
            author_id: self.author_id.check(errors, "author_id", integer_message),
            publisher_id: self.publisher_id.check(errors, "publisher_id", integer_message),
            level: self.level.check(errors, "level", string_message),
        }
    }
}

/// The well-typed payload. `book_type` is length-checked by hand because
/// its wire name is `type`.
#[derive(Debug, Validate)]
struct BookFields {
    #[validate(length(max = 255))]
    name: Option<String>,
    book_type: Option<String>,
    #[validate(length(max = 255))]
    language: Option<String>,
    #[validate(range(min = 1))]
    page_count: Option<i32>,
    is_donation: Option<bool>,
    #[validate(length(max = 255))]
    barcode: Option<String>,
    #[validate(length(max = 255))]
    shelf_code: Option<String>,
    #[validate(length(max = 255))]
    fixture_no: Option<String>,
    author_id: Option<DbId>,
    publisher_id: Option<DbId>,
    level: Option<String>,
}

/// Query parameters for `GET /books`, on top of [`ListParams`].
#[derive(Debug, Default, Deserialize)]
pub struct BookListQuery {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher_id: Option<i64>,
    pub level: Option<String>,
    pub is_donation: Option<String>,
    pub with_relations: Option<String>,
}

/// Query parameters for `GET /books/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct BookShowQuery {
    pub with_relations: Option<String>,
}

/// A book with or without its author/publisher embedded.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BookView {
    Plain(Book),
    WithRelations(BookWithRelations),
}

impl BookView {
    fn from_row(row: BookRow, with_relations: bool) -> Self {
        if with_relations {
            BookView::WithRelations(row.into())
        } else {
            BookView::Plain(row.book)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookFiltersEcho {
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    /// Only set when the requested level was valid and applied.
    pub level: Option<BookLevel>,
    pub is_donation: Option<bool>,
    pub with_relations: bool,
}

#[derive(Debug, Serialize)]
pub struct BookEcho {
    pub name_term: Option<String>,
    pub filters: BookFiltersEcho,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Apply every book rule, collecting all failures before rejecting.
///
/// `exclude_id` is the book being updated, so it may keep its own fixture
/// number.
async fn validate_payload(
    pool: &PgPool,
    payload: BookPayload,
    exclude_id: Option<DbId>,
) -> AppResult<CreateBook> {
    let mut errors = FieldErrors::new();
    let payload = payload.into_fields(&mut errors);
    errors.merge(payload.validate());
    errors.max_length("type", payload.book_type.as_deref(), 255);

    let name = errors.require_text("name", payload.name.as_deref());

    let fixture_no = non_blank(payload.fixture_no.as_deref());
    if let Some(fixture_no) = fixture_no.as_deref() {
        if BookRepo::fixture_no_taken(pool, fixture_no, exclude_id).await? {
            errors.add("fixture_no", unique_message("fixture_no"));
        }
    }

    let author_id = errors.require("author_id", payload.author_id);
    if let Some(id) = author_id {
        if !AuthorRepo::exists(pool, id).await? {
            errors.add("author_id", exists_message("author_id"));
        }
    }

    let publisher_id = errors.require("publisher_id", payload.publisher_id);
    if let Some(id) = publisher_id {
        if !PublisherRepo::exists(pool, id).await? {
            errors.add("publisher_id", exists_message("publisher_id"));
        }
    }

    let level = errors
        .require_text("level", payload.level.as_deref())
        .and_then(|raw| {
            let parsed = BookLevel::parse(&raw);
            if parsed.is_none() {
                errors.add(
                    "level",
                    format!(
                        "The selected level is invalid. Expected one of: {}.",
                        BookLevel::choices()
                    ),
                );
            }
            parsed
        });

    match (name, author_id, publisher_id, level) {
        (Some(name), Some(author_id), Some(publisher_id), Some(level)) if errors.is_empty() => {
            Ok(CreateBook {
                name,
                book_type: non_blank(payload.book_type.as_deref()),
                language: non_blank(payload.language.as_deref()),
                page_count: payload.page_count,
                is_donation: payload.is_donation.unwrap_or(false),
                barcode: non_blank(payload.barcode.as_deref()),
                shelf_code: non_blank(payload.shelf_code.as_deref()),
                fixture_no,
                level,
                author_id,
                publisher_id,
            })
        }
        _ => Err(errors.into()),
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Book", id })
}

/// Re-read a just-written book with its relations embedded.
async fn load_with_relations(pool: &PgPool, id: DbId) -> AppResult<BookWithRelations> {
    let row = BookRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(row.into())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/books
///
/// Filters: `name` (substring), `author_id`, `publisher_id`, `level`
/// (ignored unless valid), `is_donation`. `with_relations=true` embeds
/// `author` and `publisher`.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListParams>,
    Query(query): Query<BookListQuery>,
) -> AppResult<ListResponse<BookView, BookEcho>> {
    let page = params.page_request(BookRepo::SORT_FIELDS, BookRepo::DEFAULT_SORT);
    let with_relations = parse_flag(query.with_relations.as_deref()).unwrap_or(false);

    let filter = BookFilter {
        name: non_blank(query.name.as_deref()),
        author_id: query.author_id,
        publisher_id: query.publisher_id,
        level: query.level.as_deref().and_then(|l| BookLevel::parse(l.trim())),
        is_donation: parse_flag(query.is_donation.as_deref()),
    };

    let total = BookRepo::count(&state.pool, &filter).await?;
    let rows = BookRepo::list(&state.pool, &filter, &page).await?;
    let books = rows
        .into_iter()
        .map(|row| BookView::from_row(row, with_relations))
        .collect();

    let message = if filter.name.is_some() {
        "Book search results retrieved successfully."
    } else {
        "Books retrieved successfully."
    };

    let echo = BookEcho {
        filters: BookFiltersEcho {
            author_id: filter.author_id,
            publisher_id: filter.publisher_id,
            level: filter.level,
            is_donation: filter.is_donation,
            with_relations,
        },
        name_term: filter.name,
    };

    Ok(ListResponse::new(
        books,
        message,
        PaginationMeta::new(&page, total),
        echo,
    ))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    Query(query): Query<BookShowQuery>,
) -> AppResult<DataResponse<BookView>> {
    let with_relations = parse_flag(query.with_relations.as_deref()).unwrap_or(false);
    let row = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::new(
        BookView::from_row(row, with_relations),
        "Book retrieved successfully.",
    ))
}

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<BookWithRelations>>)> {
    let input = validate_payload(&state.pool, payload, None).await?;
    let book = BookRepo::create(&state.pool, &input).await?;

    tracing::info!(
        book_id = book.id,
        fixture_no = ?book.fixture_no,
        user_id = auth.user_id,
        "Book created"
    );

    let book = load_with_relations(&state.pool, book.id).await?;
    Ok(DataResponse::new(book, "Book created successfully.").created())
}

/// PUT /api/v1/books/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<DataResponse<BookWithRelations>> {
    if BookRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let input = validate_payload(&state.pool, payload, Some(id)).await?;
    BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    let book = load_with_relations(&state.pool, id).await?;
    Ok(DataResponse::new(book, "Book updated successfully."))
}

/// DELETE /api/v1/books/{id}
///
/// Soft delete; frees the book's fixture number for reuse.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<MessageResponse> {
    if !BookRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(book_id = id, user_id = auth.user_id, "Book deleted");
    Ok(MessageResponse::new("Book deleted successfully."))
}
