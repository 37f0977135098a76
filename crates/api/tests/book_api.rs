//! HTTP-level integration tests for the library book endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_named, delete_auth, get_auth, post_json_auth, put_json_auth,
    register_and_login,
};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Library {
    token: String,
    author_id: i64,
    publisher_id: i64,
}

async fn setup(pool: &PgPool) -> Library {
    let token = register_and_login(pool, "librarian@school.test").await;
    let author_id = create_named(pool, &token, "authors", "George Orwell").await;
    let publisher_id = create_named(pool, &token, "publishers", "Can Yayınları").await;
    Library {
        token,
        author_id,
        publisher_id,
    }
}

fn book(library: &Library, name: &str, fixture_no: &str, level: &str) -> Value {
    json!({
        "name": name,
        "type": "Novel",
        "language": "Türkçe",
        "page_count": 328,
        "is_donation": false,
        "barcode": "9786051111236",
        "shelf_code": "5",
        "fixture_no": fixture_no,
        "author_id": library.author_id,
        "publisher_id": library.publisher_id,
        "level": level,
    })
}

async fn create_book(pool: &PgPool, library: &Library, body: Value) -> Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/books",
        body,
        &library.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_book_with_relations(pool: PgPool) {
    let library = setup(&pool).await;
    let created = create_book(&pool, &library, book(&library, "1984", "F003", "ortaokul")).await;

    assert_eq!(created["name"], "1984");
    assert_eq!(created["type"], "Novel");
    assert_eq!(created["level"], "ortaokul");
    assert_eq!(created["author"]["name"], "George Orwell");
    assert_eq!(created["publisher"]["id"], library.publisher_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_level_lists_the_choices(pool: PgPool) {
    let library = setup(&pool).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/books",
        book(&library, "1984", "F003", "lise"),
        &library.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let message = json["errors"]["level"][0].as_str().unwrap();
    assert!(message.contains("ilkokul, ortaokul, ortak"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_author_and_publisher_are_rejected(pool: PgPool) {
    let library = setup(&pool).await;
    let mut body = book(&library, "1984", "F003", "ortak");
    body["author_id"] = json!(555_555);
    body["publisher_id"] = json!(666_666);

    let response = post_json_auth(common::build_test_app(pool), "/api/v1/books", body, &library.token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["errors"]["author_id"][0], "The selected author_id is invalid.");
    assert_eq!(json["errors"]["publisher_id"][0], "The selected publisher_id is invalid.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_value_types_are_reported_per_field(pool: PgPool) {
    let library = setup(&pool).await;
    let mut body = book(&library, "1984", "F003", "ortak");
    body["page_count"] = json!("x");
    body["is_donation"] = json!(1);
    body["type"] = json!(42);
    body["name"] = json!(null);

    let response = post_json_auth(common::build_test_app(pool), "/api/v1/books", body, &library.token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = body_json(response).await["errors"].clone();
    assert_eq!(errors["page_count"], json!(["The page_count field must be an integer."]));
    assert_eq!(errors["is_donation"], json!(["The is_donation field must be true or false."]));
    assert_eq!(errors["type"], json!(["The type field must be a string."]));
    assert_eq!(errors["name"], json!(["The name field is required."]));
    assert!(errors.get("level").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn long_type_is_reported_under_its_wire_name(pool: PgPool) {
    let library = setup(&pool).await;
    let mut body = book(&library, "1984", "F003", "ortak");
    body["type"] = json!("n".repeat(256));

    let response = post_json_auth(common::build_test_app(pool), "/api/v1/books", body, &library.token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = body_json(response).await["errors"].clone();
    assert_eq!(
        errors["type"],
        json!(["The type field must not be greater than 255 characters."])
    );
    assert!(errors.get("book_type").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fixture_numbers_are_unique_among_live_books(pool: PgPool) {
    let library = setup(&pool).await;
    let first = create_book(&pool, &library, book(&library, "1984", "F001", "ortak")).await;

    let duplicate = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/books",
        book(&library, "Animal Farm", "F001", "ortak"),
        &library.token,
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(duplicate).await["errors"]["fixture_no"][0],
        "The fixture_no has already been taken."
    );

    // A book may keep its own fixture number on update.
    let own = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/books/{}", first["id"]),
        book(&library, "Nineteen Eighty-Four", "F001", "ortak"),
        &library.token,
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);

    // Deleting the book frees the number.
    let deleted = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/books/{}", first["id"]),
        &library.token,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    create_book(&pool, &library, book(&library, "Animal Farm", "F001", "ortak")).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn show_embeds_relations_only_on_request(pool: PgPool) {
    let library = setup(&pool).await;
    let created = create_book(&pool, &library, book(&library, "1984", "F003", "ortak")).await;
    let uri = format!("/api/v1/books/{}", created["id"]);

    let plain = get_auth(common::build_test_app(pool.clone()), &uri, &library.token).await;
    let plain = body_json(plain).await;
    assert!(plain["data"].get("author").is_none());
    assert_eq!(plain["data"]["author_id"], library.author_id);

    let embedded = get_auth(
        common::build_test_app(pool),
        &format!("{uri}?with_relations=true"),
        &library.token,
    )
    .await;
    let embedded = body_json(embedded).await;
    assert_eq!(embedded["data"]["author"]["name"], "George Orwell");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_name_and_level(pool: PgPool) {
    let library = setup(&pool).await;
    create_book(&pool, &library, book(&library, "Küçük Prens", "F001", "ilkokul")).await;
    create_book(&pool, &library, book(&library, "1984", "F002", "ortaokul")).await;
    create_book(&pool, &library, book(&library, "Animal Farm", "F003", "ortaokul")).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/books?level=ortaokul&name=farm&with_relations=1",
        &library.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Book search results retrieved successfully.");
    assert_eq!(json["name_term"], "farm");
    assert_eq!(json["filters"]["level"], "ortaokul");
    assert_eq!(json["filters"]["with_relations"], true);
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["name"], "Animal Farm");
    assert_eq!(json["data"][0]["publisher"]["name"], "Can Yayınları");

    // An unknown level is ignored rather than rejected.
    let ignored = get_auth(
        common::build_test_app(pool),
        "/api/v1/books?level=lise",
        &library.token,
    )
    .await;
    let ignored = body_json(ignored).await;
    assert_eq!(ignored["message"], "Books retrieved successfully.");
    assert!(ignored["filters"]["level"].is_null());
    assert_eq!(ignored["pagination"]["total"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_author_embeds_as_null(pool: PgPool) {
    let library = setup(&pool).await;
    let created = create_book(&pool, &library, book(&library, "1984", "F003", "ortak")).await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/authors/{}", library.author_id),
        &library.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let show = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/books/{}?with_relations=true", created["id"]),
        &library.token,
    )
    .await;
    let json = body_json(show).await;
    assert!(json["data"]["author"].is_null());
    assert_eq!(json["data"]["publisher"]["name"], "Can Yayınları");
}
