//! Request bodies and their validation into domain payloads.

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod campaigns;
pub mod companies;
pub mod contact_lists;
pub mod contacts;
pub mod flows;
pub mod quick_messages;
pub mod schedules;
pub mod settings;
pub mod tags;
pub mod tickets;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing request bodies.
pub enum FormError {
    #[error("ERR_VALIDATION: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("ERR_INVALID_EMAIL")]
    InvalidEmail,

    #[error("ERR_INVALID_NAME")]
    InvalidName,

    #[error("ERR_INVALID_PHONE_NUMBER")]
    InvalidPhoneNumber,

    #[error("ERR_INVALID_PASSWORD")]
    InvalidPassword,

    #[error("ERR_INVALID_PROFILE")]
    InvalidProfile,

    #[error("ERR_INVALID_COLOR")]
    InvalidColor,

    #[error("ERR_INVALID_WORK_TIME")]
    InvalidWorkTime,

    #[error("ERR_INVALID_STATUS")]
    InvalidStatus,

    #[error("ERR_INVALID_CHANNEL")]
    InvalidChannel,

    #[error("ERR_INVALID_ID")]
    InvalidId,

    #[error("ERR_INVALID_MESSAGE")]
    InvalidMessage,

    #[error("ERR_INVALID_DATE")]
    InvalidDate,

    #[error("ERR_INVALID_SETTING")]
    InvalidSetting,

    #[error("ERR_INVALID_CSV: {0}")]
    InvalidCsv(String),

    #[error("ERR_INVALID_UPLOAD")]
    InvalidUpload,
}

/// Accepts RFC 3339 timestamps (converted to UTC) or naive `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, FormError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or(FormError::InvalidDate)
}

/// Empty or whitespace-only strings become `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`non_blank`] but keeps the value untouched. Used for secrets,
/// where surrounding whitespace is significant.
pub(crate) fn unless_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
