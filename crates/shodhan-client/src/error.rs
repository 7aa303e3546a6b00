//! API error type and its classification into user-facing messages.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred. Please try again later.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to server. Please check your internet connection and try again.";

/// Errors from calls to the clinic backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local field validation failed; nothing was sent.
    #[error("validation failed: {}", join_fields(.0))]
    Validation(BTreeMap<&'static str, String>),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// The request went out but no response came back.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response arrived but its body was not what we expected.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The request could not be built or sent at all.
    #[error("request setup failed: {0}")]
    Setup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(#[from] shodhan_core::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Setup(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err)
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Network(err)
        }
    }
}

/// Coarse error taxonomy used to choose how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Server,
    Client,
    Network,
    Unknown,
}

/// What a failed call was trying to load, for message wording.
#[derive(Debug, Clone)]
pub struct Lookup {
    /// e.g. `"disease details"`
    pub subject: String,
    /// e.g. `Disease with ID "12"`; only set for by-identifier fetches.
    pub target: Option<String>,
}

impl Lookup {
    pub fn list(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            target: None,
        }
    }

    pub fn record(subject: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            target: Some(target.into()),
        }
    }
}

impl ApiError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Status { status, .. } => match *status {
                401 => ErrorKind::Authentication,
                403 => ErrorKind::Authorization,
                404 => ErrorKind::NotFound,
                500.. => ErrorKind::Server,
                400..=499 => ErrorKind::Client,
                _ => ErrorKind::Unknown,
            },
            Self::Network(_) => ErrorKind::Network,
            Self::Decode(_) | Self::Setup(_) | Self::Config(_) | Self::Session(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// Message suitable for a dismissible banner.
    pub fn user_message(&self, lookup: &Lookup) -> String {
        match self {
            Self::Validation(fields) => join_fields(fields),
            Self::Status { status, message } => match (*status, &lookup.target) {
                (404, Some(target)) => format!(
                    "{target} was not found. It may have been removed or the ID is incorrect."
                ),
                (500.., _) => SERVER_ERROR_MESSAGE.to_string(),
                (400..=499, _) => message.clone().unwrap_or_else(|| {
                    format!("Unable to load {}. Error: {status}", lookup.subject)
                }),
                _ => unexpected(lookup),
            },
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Decode(_) | Self::Setup(_) | Self::Config(_) | Self::Session(_) => {
                unexpected(lookup)
            }
        }
    }
}

fn unexpected(lookup: &Lookup) -> String {
    format!("An unexpected error occurred while loading {}.", lookup.subject)
}

fn join_fields(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pull a human-readable message out of an error body, if there is one.
pub(crate) fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty()),
        Err(_) if !trimmed.starts_with(['{', '[', '<']) => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, message: Option<&str>) -> ApiError {
        ApiError::Status {
            status: code,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn kinds_follow_status() {
        assert_eq!(status(401, None).kind(), ErrorKind::Authentication);
        assert_eq!(status(403, None).kind(), ErrorKind::Authorization);
        assert_eq!(status(404, None).kind(), ErrorKind::NotFound);
        assert_eq!(status(422, None).kind(), ErrorKind::Client);
        assert_eq!(status(503, None).kind(), ErrorKind::Server);
        assert_eq!(status(302, None).kind(), ErrorKind::Unknown);
        assert_eq!(
            ApiError::Validation(BTreeMap::new()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ApiError::Setup("x".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn server_errors_say_retry_later() {
        let lookup = Lookup::list("clinics");
        assert_eq!(status(500, Some("boom")).user_message(&lookup), SERVER_ERROR_MESSAGE);
        assert_eq!(status(502, None).user_message(&lookup), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn client_errors_prefer_backend_message() {
        let lookup = Lookup::list("clinics");
        assert_eq!(
            status(400, Some("Slug already exists")).user_message(&lookup),
            "Slug already exists"
        );
        assert_eq!(
            status(409, None).user_message(&lookup),
            "Unable to load clinics. Error: 409"
        );
    }

    #[test]
    fn not_found_on_lookup_names_identifier() {
        let lookup = Lookup::record("disease details", "Disease with ID \"42\"");
        assert_eq!(
            status(404, Some("Not Found")).user_message(&lookup),
            "Disease with ID \"42\" was not found. It may have been removed or the ID is incorrect."
        );
    }

    #[test]
    fn not_found_on_list_is_a_client_error() {
        let lookup = Lookup::list("blogs");
        assert_eq!(
            status(404, None).user_message(&lookup),
            "Unable to load blogs. Error: 404"
        );
    }

    #[test]
    fn setup_errors_are_unexpected() {
        let lookup = Lookup::list("services");
        assert_eq!(
            ApiError::Setup("bad header".into()).user_message(&lookup),
            "An unexpected error occurred while loading services."
        );
    }

    #[test]
    fn validation_message_lists_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("name", "Name is required".to_string());
        fields.insert("phone", "Phone number is required".to_string());
        assert_eq!(
            ApiError::Validation(fields).user_message(&Lookup::list("x")),
            "name: Name is required; phone: Phone number is required"
        );
    }

    #[test]
    fn backend_message_extraction() {
        assert_eq!(
            backend_message(r#"{"message":"Invalid slug"}"#).as_deref(),
            Some("Invalid slug")
        );
        assert_eq!(
            backend_message(r#"{"error":"Forbidden"}"#).as_deref(),
            Some("Forbidden")
        );
        assert_eq!(backend_message(r#"{"message":""}"#), None);
        assert_eq!(backend_message("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(backend_message("<html></html>"), None);
        assert_eq!(backend_message("  "), None);
    }
}
