//! Request extractors that guard protected routes.
//!
//! - [`auth::AuthUser`] -- the authenticated user behind a live bearer token.

pub mod auth;
