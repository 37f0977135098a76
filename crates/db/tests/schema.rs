//! Schema-level guarantees the repositories rely on.

use sqlx::PgPool;

const TABLES: &[&str] = &[
    "api_tokens",
    "approvers",
    "authors",
    "books",
    "print_requests",
    "publishers",
    "requesters",
    "users",
];

/// Every table carries timestamptz `created_at`/`updated_at` and an
/// `updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_every_table_maintains_updated_at(pool: PgPool) {
    for table in TABLES {
        let columns: Vec<(String,)> = sqlx::query_as(
            "SELECT column_name::TEXT
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name IN ('created_at', 'updated_at')
               AND data_type = 'timestamp with time zone'",
        )
        .bind(*table)
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(columns.len(), 2, "{table} is missing timestamptz timestamps");

        let (has_trigger,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM pg_trigger t
                JOIN pg_class c ON c.oid = t.tgrelid
                WHERE c.relname = $1 AND t.tgname = $2
            )",
        )
        .bind(*table)
        .bind(format!("trg_{table}_updated_at"))
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(has_trigger, "{table} has no updated_at trigger");
    }
}

/// Every foreign key column has an index.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_keys_are_indexed(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT tc.table_name::TEXT, kcu.column_name::TEXT
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(!fk_columns.is_empty());

    for (table, column) in &fk_columns {
        let (indexed,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = 'public' AND tablename = $1 AND indexdef LIKE $2
            )",
        )
        .bind(table)
        .bind(format!("%({column})%"))
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(indexed, "FK column {table}.{column} has no index");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_bumps_updated_at(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("INSERT INTO publishers (name) VALUES ('Yapı Kredi') RETURNING id, updated_at")
            .fetch_one(&pool)
            .await
            .unwrap();

    // NOW() is fixed per transaction; the update runs in its own.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE publishers SET name = 'YKY' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(updated > created);
}
