//! Domain building blocks shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds the id/timestamp aliases,
//! the domain error type, field-level validation collection, pagination and
//! sort resolution, date handling, and the print-report math.

pub mod book_level;
pub mod dates;
pub mod error;
pub mod pagination;
pub mod reports;
pub mod types;
pub mod validation;
