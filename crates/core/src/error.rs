use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The request body could not be interpreted at all (malformed JSON,
    /// missing content type).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more fields failed their rules.
    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
