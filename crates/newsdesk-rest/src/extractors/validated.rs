//! Sanitizing and validating extractors for query strings and route
//! parameters.
//!
//! Values are deserialized, cleaned with [`Sanitize`], then checked with the
//! `validator` rules of the target type. Any failure is answered with
//! 400 Bad Request and field-level details.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use newsdesk_core::{FieldError, NewsdeskError, Sanitize, ValidateExt};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Message returned when query parameters are rejected.
pub const INVALID_QUERY: &str = "Invalid query parameters";
/// Message returned when route parameters are rejected.
pub const INVALID_PATH: &str = "Invalid route parameters";

/// Query string extractor that sanitizes and validates the value.
///
/// ```ignore
/// async fn search(ValidatedQuery(request): ValidatedQuery<SearchRequest>) {
///     // request.q is non-empty and free of angle brackets here
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidatedQuery<T>(pub T);

/// Route parameter extractor that sanitizes and validates the value.
#[derive(Debug, Clone, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Deref for ValidatedPath<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn check<T>(value: T, message: &str) -> Result<T, AppError>
where
    T: Sanitize + Validate,
{
    let value = value.sanitized();
    value.validate_request(message)?;
    Ok(value)
}

fn rejected(message: &str, field: &str, detail: String) -> AppError {
    AppError(NewsdeskError::InvalidInput {
        message: message.to_string(),
        errors: vec![FieldError {
            field: field.to_string(),
            message: detail,
            code: "invalid_type".to_string(),
        }],
    })
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Sanitize + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected(INVALID_QUERY, "query", e.body_text()))?;

        check(value, INVALID_QUERY).map(ValidatedQuery)
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Sanitize + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected(INVALID_PATH, "path", e.body_text()))?;

        check(value, INVALID_PATH).map(ValidatedPath)
    }
}
