//! Library book model, DTO, and listing filter.

use schooldesk_core::book_level::BookLevel;
use schooldesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::named::PartyRef;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub name: String,
    /// Free-form category (novel, reference, ...). Stored in the `type` column.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub book_type: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i32>,
    pub is_donation: bool,
    pub barcode: Option<String>,
    pub shelf_code: Option<String>,
    /// Physical asset tag; unique among non-deleted books.
    pub fixture_no: Option<String>,
    #[sqlx(try_from = "String")]
    pub level: BookLevel,
    pub author_id: DbId,
    pub publisher_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or replacing a book.
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub name: String,
    pub book_type: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i32>,
    pub is_donation: bool,
    pub barcode: Option<String>,
    pub shelf_code: Option<String>,
    pub fixture_no: Option<String>,
    pub level: BookLevel,
    pub author_id: DbId,
    pub publisher_id: DbId,
}

/// A book joined with the names of its live author and publisher.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    #[sqlx(flatten)]
    pub book: Book,
    pub author_name: Option<String>,
    pub publisher_name: Option<String>,
}

/// API shape with `author`/`publisher` embedded.
#[derive(Debug, Clone, Serialize)]
pub struct BookWithRelations {
    #[serde(flatten)]
    pub book: Book,
    pub author: Option<PartyRef>,
    pub publisher: Option<PartyRef>,
}

impl From<BookRow> for BookWithRelations {
    fn from(row: BookRow) -> Self {
        let author = PartyRef::from_join(row.book.author_id, row.author_name);
        let publisher = PartyRef::from_join(row.book.publisher_id, row.publisher_name);
        Self {
            book: row.book,
            author,
            publisher,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Case-insensitive substring match on `name`.
    pub name: Option<String>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub level: Option<BookLevel>,
    pub is_donation: Option<bool>,
}
