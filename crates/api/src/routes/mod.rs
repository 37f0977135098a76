pub mod approver;
pub mod auth;
pub mod author;
pub mod book;
pub mod health;
pub mod print_request;
pub mod publisher;
pub mod requester;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/user                                       current user
/// /auth/logout                                     revoke current token
///
/// /requesters                                      list, create
/// /requesters/{id}                                 get, update, delete
/// /approvers                                       list, create
/// /approvers/{id}                                  get, update, delete
///
/// /print-requests                                  list, create
/// /print-requests/{id}                             get, update, delete
/// /print-requests/export/by-requester              xlsx: copies per requester
/// /print-requests/export/comparison                xlsx: two-period comparison
/// /print-requests/export/all                       xlsx: every request
///
/// /authors                                         list, create
/// /authors/{id}                                    get, update, delete
/// /publishers                                      list, create
/// /publishers/{id}                                 get, update, delete
/// /books                                           list, create
/// /books/{id}                                      get, update, delete
/// ```
///
/// Everything except register and login requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/requesters", requester::router())
        .nest("/approvers", approver::router())
        .nest("/print-requests", print_request::router())
        .nest("/authors", author::router())
        .nest("/publishers", publisher::router())
        .nest("/books", book::router())
}
