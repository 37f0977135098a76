//! Demo data for local development.
//!
//! Each group (users, print-request parties, library) is seeded only when
//! its tables are empty, so running the seeder against a populated database
//! is a no-op. Everything happens in one transaction.

use schooldesk_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

/// Email of the seeded demo account.
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";

/// Plaintext password of the seeded demo account. Hashed by the caller.
pub const DEMO_ADMIN_PASSWORD: &str = "password";

const REQUESTERS: &[&str] = &["Duanur Bulut", "Elif Bal", "Betül Görgülü"];
const APPROVERS: &[&str] = &["Safa Koç", "Özkan Deliacı", "Mustafa Çakan"];
const AUTHORS: &[&str] = &["Antoine de Saint-Exupéry", "William Golding", "George Orwell"];
const PUBLISHERS: &[&str] = &["Can Yayınları", "Penguin Random House"];

/// (requester idx, approver idx, color, bw, description, days ago)
const PRINT_REQUESTS: &[(usize, usize, i32, i32, Option<&str>, i32)] = &[
    (0, 0, 10, 40, Some("Worksheets for 5-A"), 2),
    (1, 1, 0, 120, Some("Midterm exam copies"), 5),
    (2, 0, 25, 0, None, 9),
    (0, 2, 5, 15, Some("Parent meeting handouts"), 16),
    (1, 0, 0, 60, None, 33),
];

struct DemoBook {
    name: &'static str,
    language: &'static str,
    page_count: i32,
    barcode: &'static str,
    shelf_code: &'static str,
    fixture_no: &'static str,
    level: &'static str,
    author: usize,
    publisher: usize,
}

const BOOKS: &[DemoBook] = &[
    DemoBook {
        name: "Küçük Prens",
        language: "Türkçe",
        page_count: 96,
        barcode: "9786051111234",
        shelf_code: "3",
        fixture_no: "F001",
        level: "ilkokul",
        author: 0,
        publisher: 0,
    },
    DemoBook {
        name: "Sineklerin Tanrısı",
        language: "Türkçe",
        page_count: 224,
        barcode: "9786051111235",
        shelf_code: "4",
        fixture_no: "F002",
        level: "ortaokul",
        author: 1,
        publisher: 0,
    },
    DemoBook {
        name: "1984",
        language: "Türkçe",
        page_count: 328,
        barcode: "9786051111236",
        shelf_code: "5",
        fixture_no: "F003",
        level: "ortaokul",
        author: 2,
        publisher: 1,
    },
];

/// What the seeder actually inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub requesters: usize,
    pub approvers: usize,
    pub print_requests: usize,
    pub authors: usize,
    pub publishers: usize,
    pub books: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Seed demo rows into empty tables. `admin_password_hash` is stored as the
/// demo account's password hash.
pub async fn seed_demo_data(
    pool: &PgPool,
    admin_password_hash: &str,
) -> Result<SeedSummary, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    if table_is_empty(&mut tx, "users").await? {
        sqlx::query("INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)")
            .bind("Admin")
            .bind(DEMO_ADMIN_EMAIL)
            .bind(admin_password_hash)
            .execute(&mut *tx)
            .await?;
        summary.users = 1;
    }

    if table_is_empty(&mut tx, "requesters").await?
        && table_is_empty(&mut tx, "approvers").await?
        && table_is_empty(&mut tx, "print_requests").await?
    {
        let requester_ids = insert_names(&mut tx, "requesters", REQUESTERS).await?;
        let approver_ids = insert_names(&mut tx, "approvers", APPROVERS).await?;
        summary.requesters = requester_ids.len();
        summary.approvers = approver_ids.len();

        for &(requester, approver, color, bw, description, days_ago) in PRINT_REQUESTS {
            sqlx::query(
                "INSERT INTO print_requests
                    (requester_id, approver_id, color_copies, bw_copies, description, requested_at)
                 VALUES ($1, $2, $3, $4, $5, NOW() - make_interval(days => $6))",
            )
            .bind(requester_ids[requester])
            .bind(approver_ids[approver])
            .bind(color)
            .bind(bw)
            .bind(description)
            .bind(days_ago)
            .execute(&mut *tx)
            .await?;
            summary.print_requests += 1;
        }
    }

    if table_is_empty(&mut tx, "authors").await?
        && table_is_empty(&mut tx, "publishers").await?
        && table_is_empty(&mut tx, "books").await?
    {
        let author_ids = insert_names(&mut tx, "authors", AUTHORS).await?;
        let publisher_ids = insert_names(&mut tx, "publishers", PUBLISHERS).await?;
        summary.authors = author_ids.len();
        summary.publishers = publisher_ids.len();

        for book in BOOKS {
            sqlx::query(
                "INSERT INTO books
                    (name, language, page_count, is_donation, barcode, shelf_code,
                     fixture_no, level, author_id, publisher_id)
                 VALUES ($1, $2, $3, false, $4, $5, $6, $7, $8, $9)",
            )
            .bind(book.name)
            .bind(book.language)
            .bind(book.page_count)
            .bind(book.barcode)
            .bind(book.shelf_code)
            .bind(book.fixture_no)
            .bind(book.level)
            .bind(author_ids[book.author])
            .bind(publisher_ids[book.publisher])
            .execute(&mut *tx)
            .await?;
            summary.books += 1;
        }
    }

    tx.commit().await?;

    if !summary.is_empty() {
        tracing::info!(?summary, "Seeded demo data");
    }
    Ok(summary)
}

async fn table_is_empty(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
) -> Result<bool, sqlx::Error> {
    let query = format!("SELECT NOT EXISTS (SELECT 1 FROM {table})");
    sqlx::query_scalar::<_, bool>(&query)
        .fetch_one(&mut **tx)
        .await
}

async fn insert_names(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    names: &[&str],
) -> Result<Vec<DbId>, sqlx::Error> {
    let query = format!("INSERT INTO {table} (name) VALUES ($1) RETURNING id");
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id = sqlx::query_scalar::<_, DbId>(&query)
            .bind(*name)
            .fetch_one(&mut **tx)
            .await?;
        ids.push(id);
    }
    Ok(ids)
}
