//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "status": "success", "data": ..., "message": ... }`,
//! with `pagination` and a resource-specific echo of the applied filters on
//! list endpoints. Errors are rendered by [`AppError`](crate::error::AppError).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schooldesk_core::pagination::PaginationMeta;
use serde::Serialize;

const SUCCESS: &str = "success";

/// Standard single-payload envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            data,
            message: message.into(),
        }
    }

    /// Respond with `201 Created`.
    pub fn created(self) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(self))
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Envelope for paginated listings. `E` carries the filter echo
/// (`search_term`, `filters`, `filters_applied`, ...) and is flattened into
/// the top level.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize, E: Serialize> {
    pub status: &'static str,
    pub data: Vec<T>,
    pub message: String,
    pub pagination: PaginationMeta,
    #[serde(flatten)]
    pub echo: E,
}

impl<T: Serialize, E: Serialize> ListResponse<T, E> {
    pub fn new(data: Vec<T>, message: impl Into<String>, pagination: PaginationMeta, echo: E) -> Self {
        Self {
            status: SUCCESS,
            data,
            message: message.into(),
            pagination,
            echo,
        }
    }
}

impl<T: Serialize, E: Serialize> IntoResponse for ListResponse<T, E> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `{ "status": "success", "message": ... }` with no payload (deletes, logout).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
