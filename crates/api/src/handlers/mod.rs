//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate input into the repository DTOs, delegate to the
//! corresponding repository in `schooldesk_db`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod approver;
pub mod auth;
pub mod author;
pub mod book;
pub mod export;
pub mod named;
pub mod print_request;
pub mod publisher;
pub mod requester;
