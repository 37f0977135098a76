//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- bearer token generation, validation, and token-id hashing.

pub mod jwt;
pub mod password;
