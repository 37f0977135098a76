//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Soft-deletable tables hide
//! rows with a non-null `deleted_at` from every default query.

mod filter;
mod named;

pub mod api_token_repo;
pub mod approver_repo;
pub mod author_repo;
pub mod book_repo;
pub mod print_request_repo;
pub mod publisher_repo;
pub mod report_repo;
pub mod requester_repo;
pub mod user_repo;

pub use api_token_repo::ApiTokenRepo;
pub use approver_repo::ApproverRepo;
pub use author_repo::AuthorRepo;
pub use book_repo::BookRepo;
pub use print_request_repo::PrintRequestRepo;
pub use publisher_repo::PublisherRepo;
pub use report_repo::ReportRepo;
pub use requester_repo::RequesterRepo;
pub use user_repo::UserRepo;
