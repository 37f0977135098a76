//! Route definitions for the `/print-requests` resource and its exports.

use axum::routing::get;
use axum::Router;

use crate::handlers::{export, print_request};
use crate::state::AppState;

/// Routes mounted at `/print-requests`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /export/by-requester   -> export_by_requester
/// GET    /export/comparison     -> export_comparison
/// GET    /export/all            -> export_all
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(print_request::list).post(print_request::create))
        .route("/export/by-requester", get(export::export_by_requester))
        .route("/export/comparison", get(export::export_comparison))
        .route("/export/all", get(export::export_all))
        .route(
            "/{id}",
            get(print_request::get_by_id)
                .put(print_request::update)
                .delete(print_request::delete),
        )
}
