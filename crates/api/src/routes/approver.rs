//! Route definitions for the `/approvers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::approver;
use crate::state::AppState;

/// Routes mounted at `/approvers`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(approver::list).post(approver::create))
        .route(
            "/{id}",
            get(approver::get_by_id).put(approver::update).delete(approver::delete),
        )
}
