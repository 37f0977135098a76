//! Request extractors with API-shaped rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use schooldesk_core::error::CoreError;
use schooldesk_core::types::DbId;
use schooldesk_core::validation::FieldErrors;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Drop-in for [`axum::Json`] whose rejection (missing content type,
/// malformed JSON) renders as a 422 validation error in the standard error
/// envelope instead of axum's plain-text response.
///
/// Wrong value types inside an otherwise valid object are reported per field
/// when the payload declares its fields as [`BodyField`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::Core(CoreError::Validation(rejection.body_text())))
            }
        }
    }
}

/// One field of a JSON body, read without failing the whole body.
///
/// `null` and missing keys are [`Missing`](Self::Missing); a value of the
/// wrong JSON type is kept as [`WrongType`](Self::WrongType) so validation
/// can report it under the field's own key. Payload structs using it need
/// `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyField<T> {
    Missing,
    Value(T),
    WrongType,
}

impl<T> Default for BodyField<T> {
    fn default() -> Self {
        BodyField::Missing
    }
}

impl<T> BodyField<T> {
    /// The value if present, recording `message(field)` on a type mismatch.
    pub fn check(
        self,
        errors: &mut FieldErrors,
        field: &str,
        message: fn(&str) -> String,
    ) -> Option<T> {
        match self {
            BodyField::Missing => None,
            BodyField::Value(value) => Some(value),
            BodyField::WrongType => {
                errors.add(field, message(field));
                None
            }
        }
    }
}

impl<'de, T> Deserialize<'de> for BodyField<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(BodyField::Missing);
        }
        Ok(serde_json::from_value(value).map_or(BodyField::WrongType, BodyField::Value))
    }
}

/// `{id}` path segment. A segment that is not an integer cannot name a
/// record, so it is rejected as a 404 in the standard envelope.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<DbId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(IdPath(id)),
            Err(rejection) => {
                tracing::debug!(
                    path = %parts.uri.path(),
                    error = %rejection.body_text(),
                    "Rejected path id"
                );
                Err(AppError::InvalidPath(parts.uri.path().to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use schooldesk_core::validation::integer_message;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Body {
        copies: BodyField<i32>,
        note: BodyField<String>,
    }

    #[test]
    fn body_field_separates_missing_null_and_wrong_type() {
        let body: Body = serde_json::from_str(r#"{"copies": "3", "note": null}"#).unwrap();
        assert_eq!(body.copies, BodyField::WrongType);
        assert_eq!(body.note, BodyField::Missing);

        let body: Body = serde_json::from_str(r#"{"copies": 3}"#).unwrap();
        assert_eq!(body.copies, BodyField::Value(3));
        assert_eq!(body.note, BodyField::Missing);
    }

    #[test]
    fn check_reports_wrong_type_under_the_field() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            BodyField::<i32>::WrongType.check(&mut errors, "bw_copies", integer_message),
            None
        );
        assert_eq!(
            BodyField::Value(2).check(&mut errors, "color_copies", integer_message),
            Some(2)
        );
        assert_eq!(
            errors.get("bw_copies"),
            Some(&["The bw_copies field must be an integer.".to_string()][..])
        );
        assert!(!errors.contains("color_copies"));
    }

    #[test]
    fn fractional_number_is_not_an_integer() {
        let body: Body = serde_json::from_str(r#"{"copies": 2.5}"#).unwrap();
        assert_eq!(body.copies, BodyField::WrongType);
    }
}
