//! Row structs and DTOs.
//!
//! Each submodule holds a `FromRow` struct matching the table, the DTO the
//! repository inserts from, and where needed a filter struct for listings.
//! Update DTOs are not separate: updates are full-record replaces and reuse
//! the create DTO.

pub mod api_token;
pub mod approver;
pub mod author;
pub mod book;
pub mod named;
pub mod print_request;
pub mod publisher;
pub mod report;
pub mod requester;
pub mod user;
