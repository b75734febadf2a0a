//! Validating extractors: deserialize strictly, then collect every field
//! violation into one 400 response before any data access happens.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::ApiError;

/// Request shapes report all of their violations at once.
pub trait ValidateRequest {
    fn violations(&self) -> Vec<String>;
}

/// JSON body extractor with strict deserialization and field validation.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + ValidateRequest,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(vec![json_rejection_message(rejection)]))?;
        let violations = value.violations();
        if !violations.is_empty() {
            return Err(ApiError::bad_request(violations));
        }
        Ok(Self(value))
    }
}

/// Query-string extractor with field validation. Unknown parameters are
/// ignored; only declared fields are checked.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + ValidateRequest,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(vec![rejection.body_text()]))?;
        let violations = value.violations();
        if !violations.is_empty() {
            return Err(ApiError::bad_request(violations));
        }
        Ok(Self(value))
    }
}

/// Path ids must be UUID v4; anything else is rejected before the DAO runs.
pub fn parse_uuid_v4(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .ok()
        .filter(|u| u.get_version_num() == 4)
        .ok_or_else(|| ApiError::bad_request(vec!["invalid ID format. Must be a UUID v4.".into()]))
}

/// Append the violation message when a field check fails.
pub fn collect(violations: &mut Vec<String>, check: Result<(), impl std::fmt::Display>) {
    if let Err(e) = check {
        violations.push(e.to_string());
    }
}

/// Rephrase serde's strict-mode errors in the API's own vocabulary.
fn json_rejection_message(rejection: JsonRejection) -> String {
    let text = rejection.body_text();
    if let Some(field) = field_in_backticks(&text, "unknown field `") {
        return format!("property {field} should not exist");
    }
    if let Some(field) = field_in_backticks(&text, "missing field `") {
        return format!("{field} should not be empty");
    }
    text
}

fn field_in_backticks(text: &str, prefix: &str) -> Option<String> {
    let start = text.find(prefix)? + prefix.len();
    let rest = &text[start..];
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_field_name_from_serde_error() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    unknown field `owner`, expected `name` or `description` at line 1 column 40";
        assert_eq!(field_in_backticks(text, "unknown field `"), Some("owner".into()));
        assert_eq!(field_in_backticks(text, "missing field `"), None);
    }

    #[test]
    fn accepts_v4_ids_only() {
        assert!(parse_uuid_v4("550e8400-e29b-41d4-a716-446655440000").is_ok());
        // v1 uuid
        assert!(parse_uuid_v4("c232ab00-9414-11ec-b3c8-9f6bdeced846").is_err());
        assert!(parse_uuid_v4("not-a-uuid").is_err());
        assert!(parse_uuid_v4("").is_err());
    }

    #[test]
    fn collect_keeps_passing_checks_silent() {
        let mut v = Vec::new();
        collect(&mut v, Ok::<(), String>(()));
        collect(&mut v, Err::<(), _>("name must be valid"));
        assert_eq!(v, vec!["name must be valid".to_string()]);
    }
}
