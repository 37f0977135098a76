//! Route definitions for the `/publishers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::publisher;
use crate::state::AppState;

/// Routes mounted at `/publishers`.
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
        .route("/", get(publisher::list).post(publisher::create))
        .route(
            "/{id}",
            get(publisher::get_by_id).put(publisher::update).delete(publisher::delete),
        )
}
