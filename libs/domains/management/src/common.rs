//! Building blocks shared by the three resources: identifiers, calendar dates,
//! request decoding helpers and the search request.

use axum_helpers::FieldError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use validator::ValidationError;

/// Wire and storage format of every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const ID_BYTES: usize = 12;

/// Generates a fresh identifier: 12 random bytes, hex encoded (24 characters).
pub fn generate_id() -> String {
    let bytes: Vec<u8> = (0..ID_BYTES).map(|_| rand::random::<u8>()).collect();
    const_hex::encode(bytes)
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// chrono accepts unpadded components (`2024-1-5`); the length check rejects them.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parses a date that already passed validation, reporting `message` on `field` otherwise.
pub(crate) fn date_field(value: &str, field: &str, message: &str) -> Result<NaiveDate, FieldError> {
    parse_date(value).ok_or_else(|| FieldError::new(field, message))
}

pub(crate) fn validate_date(value: &str) -> Result<(), ValidationError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("date")),
    }
}

pub(crate) fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Deserializes a required string field, reading `null` as `""` so the
/// validation rules report it like a missing field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes an optional string, treating `""` the same as an absent field.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// A single `filter = value` search, taken from the query string.
///
/// The filter is checked against each resource's allow-list by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub filter: String,
    pub value: String,
}

impl SearchRequest {
    pub fn new(filter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            value: value.into(),
        }
    }

    /// Builds a request from decoded query pairs. Only the first pair is used;
    /// no pairs yields an empty request, which the service rejects.
    pub fn from_query(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .next()
            .map(|(filter, value)| Self { filter, value })
            .unwrap_or_default()
    }
}

/// Error text for a filter outside a resource's allow-list.
pub(crate) fn unknown_filter(filter: &str) -> String {
    if filter.is_empty() {
        "missing search filter".to_string()
    } else {
        format!("invalid search filter: {}", filter)
    }
}

pub(crate) const EMPTY_SEARCH_VALUE: &str = "search value must not be empty";

/// Resolves the request's filter against a resource's allow-list `F`.
///
/// The filter is checked first so a bare `/search` reports the missing filter.
pub(crate) fn search_field<F: FromStr>(request: &SearchRequest) -> Result<F, String> {
    let field = F::from_str(&request.filter).map_err(|_| unknown_filter(&request.filter))?;
    if request.value.is_empty() {
        return Err(EMPTY_SEARCH_VALUE.to_string());
    }
    Ok(field)
}

/// Message helper for `NotFound` on searches.
pub(crate) fn no_matches(resource: &str, field: impl std::fmt::Display, value: &str) -> String {
    format!("no {} found for {}={}", resource, field, value)
}
