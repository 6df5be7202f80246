// src/server/validate.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::error::ApiError;

/// Syntactic ORCID iD check: four hyphen-separated groups of four, where the
/// final character may be the checksum letter X. The checksum itself is not
/// verified.
static ORCID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[0-9X]$").expect("ORCID pattern should be valid")
});

pub type Params = HashMap<String, String>;

/// The shared secret must match the configured value exactly. Always the
/// first check a handler runs.
pub fn shared_secret(params: &Params, expected: &str) -> Result<(), ApiError> {
    match params.get("shared_secret") {
        Some(secret) if secret == expected => Ok(()),
        _ => Err(ApiError::SharedSecret),
    }
}

pub fn orcid_id(params: &Params) -> Result<String, ApiError> {
    match params.get("orcid_id") {
        Some(id) if ORCID_REGEX.is_match(id) => Ok(id.clone()),
        _ => Err(ApiError::Field("orcid_id")),
    }
}

/// A parameter that must be present and non-empty (credit type, put-code).
pub fn non_empty(params: &Params, field: &'static str) -> Result<String, ApiError> {
    match params.get(field) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(ApiError::Field(field)),
    }
}

/// A date parameter that must be present but may be the empty string, for
/// credits that lack a start and/or end date.
pub fn optional_timestamp(params: &Params, field: &str) -> Result<String, ApiError> {
    params.get(field).cloned().ok_or(ApiError::Dates)
}
