//! HTTP-level integration tests for registration, login, the current-user
//! endpoint and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json, register_and_login, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_user_and_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Ayşe Öğretmen",
        "email": "ayse@school.test",
        "password": "secret123",
        "password_confirmation": "secret123",
    });

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Registered successfully.");
    assert_eq!(json["data"]["user"]["email"], "ayse@school.test");
    assert!(json["data"]["token"].is_string());
    assert!(
        json["data"]["user"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_mismatched_confirmation_and_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Mehmet",
        "email": "mehmet@school.test",
        "password": "abc",
        "password_confirmation": "xyz",
    });

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let messages = json["errors"]["password"].as_array().unwrap();
    assert_eq!(messages.len(), 2, "both length and confirmation should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_requires_matching_confirmation(pool: PgPool) {
    for confirmation in [json!("secret124"), json!(null)] {
        let app = common::build_test_app(pool.clone());
        let body = json!({
            "name": "Mehmet",
            "email": "mehmet@school.test",
            "password": "secret123",
            "password_confirmation": confirmation,
        });

        let response = post_json(app, "/api/v1/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(
            json["errors"]["password"],
            json!(["The password field confirmation does not match."])
        );
        assert_eq!(json["message"], "The password field confirmation does not match.");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_taken_email(pool: PgPool) {
    register_and_login(&pool, "dup@school.test").await;

    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Someone Else",
        "email": "dup@school.test",
        "password": "secret123",
        "password_confirmation": "secret123",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["errors"]["email"][0], "The email has already been taken.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_requires_every_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/register", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    for field in ["name", "email", "password"] {
        assert!(json["errors"][field].is_array(), "{field} should be reported");
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_correct_password_returns_token(pool: PgPool) {
    register_and_login(&pool, "login@school.test").await;

    let app = common::build_test_app(pool);
    let body = json!({ "email": "login@school.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Logged in successfully.");
    assert!(json["data"]["token"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: PgPool) {
    register_and_login(&pool, "wrongpw@school.test").await;

    let app = common::build_test_app(pool);
    let body = json!({ "email": "wrongpw@school.test", "password": "not-it" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email or password.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_unknown_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "ghost@school.test", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Current user / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_user_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_user_rejects_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/user", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_user_returns_account(pool: PgPool) {
    let token = register_and_login(&pool, "me@school.test").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@school.test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_only_the_current_token(pool: PgPool) {
    let first = register_and_login(&pool, "multi@school.test").await;

    let login = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "email": "multi@school.test", "password": TEST_PASSWORD }),
    )
    .await;
    let second = body_json(login).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_auth(common::build_test_app(pool.clone()), "/api/v1/auth/logout", &first).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Logged out successfully.");

    let revoked = get_auth(common::build_test_app(pool.clone()), "/api/v1/auth/user", &first).await;
    assert_eq!(revoked.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(revoked).await["message"], "Token has been revoked");

    let still_valid = get_auth(common::build_test_app(pool), "/api/v1/auth/user", &second).await;
    assert_eq!(still_valid.status(), StatusCode::OK);
}
