//! Fixture numbers are unique among live books only.

use schooldesk_core::book_level::BookLevel;
use schooldesk_db::models::author::CreateAuthor;
use schooldesk_db::models::book::CreateBook;
use schooldesk_db::models::publisher::CreatePublisher;
use schooldesk_db::repositories::{AuthorRepo, BookRepo, PublisherRepo};
use sqlx::PgPool;

async fn new_book(pool: &PgPool, name: &str, fixture_no: Option<&str>) -> CreateBook {
    let author = AuthorRepo::create(pool, &CreateAuthor { name: format!("{name} author") })
        .await
        .unwrap();
    let publisher = PublisherRepo::create(pool, &CreatePublisher { name: "Can Yayınları".into() })
        .await
        .unwrap();
    CreateBook {
        name: name.to_string(),
        book_type: None,
        language: Some("Türkçe".into()),
        page_count: Some(120),
        is_donation: false,
        barcode: None,
        shelf_code: None,
        fixture_no: fixture_no.map(str::to_string),
        level: BookLevel::Ortak,
        author_id: author.id,
        publisher_id: publisher.id,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_fixture_no_is_unique(pool: PgPool) {
    let first = new_book(&pool, "Küçük Prens", Some("F001")).await;
    BookRepo::create(&pool, &first).await.unwrap();

    assert!(BookRepo::fixture_no_taken(&pool, "F001", None).await.unwrap());

    let second = new_book(&pool, "Başka Kitap", Some("F001")).await;
    let err = BookRepo::create(&pool, &second).await.unwrap_err();
    let constraint = err
        .as_database_error()
        .and_then(|e| e.constraint())
        .map(str::to_string);
    assert_eq!(constraint.as_deref(), Some("uq_books_fixture_no_active"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_books_may_share_fixture_no(pool: PgPool) {
    for title in ["Eski Baskı", "Daha Eski Baskı"] {
        let input = new_book(&pool, title, Some("F010")).await;
        let book = BookRepo::create(&pool, &input).await.unwrap();
        BookRepo::soft_delete(&pool, book.id).await.unwrap();
    }

    assert!(!BookRepo::fixture_no_taken(&pool, "F010", None).await.unwrap());

    let input = new_book(&pool, "Yeni Baskı", Some("F010")).await;
    let book = BookRepo::create(&pool, &input).await.unwrap();
    assert_eq!(book.fixture_no.as_deref(), Some("F010"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fixture_no_check_ignores_the_book_itself(pool: PgPool) {
    let input = new_book(&pool, "1984", Some("F003")).await;
    let book = BookRepo::create(&pool, &input).await.unwrap();

    assert!(!BookRepo::fixture_no_taken(&pool, "F003", Some(book.id)).await.unwrap());
    assert!(BookRepo::fixture_no_taken(&pool, "F003", None).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_books_without_fixture_no_do_not_collide(pool: PgPool) {
    let a = new_book(&pool, "A", None).await;
    let b = new_book(&pool, "B", None).await;
    BookRepo::create(&pool, &a).await.unwrap();
    BookRepo::create(&pool, &b).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_level_round_trips_through_text_column(pool: PgPool) {
    let mut input = new_book(&pool, "Sineklerin Tanrısı", None).await;
    input.level = BookLevel::Ortaokul;
    let book = BookRepo::create(&pool, &input).await.unwrap();

    let row = BookRepo::find_by_id(&pool, book.id).await.unwrap().unwrap();
    assert_eq!(row.book.level, BookLevel::Ortaokul);
    assert_eq!(row.author_name.as_deref(), Some("Sineklerin Tanrısı author"));
}
