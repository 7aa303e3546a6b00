//! Classified failures shown to the user as a one-line banner.

use std::collections::BTreeMap;
use std::io::{self, Write};

use shodhan_client::{ApiError, ErrorKind, Lookup};
use thiserror::Error;

/// A failure that has already been turned into a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Banner {
    pub message: String,
    pub kind: ErrorKind,
    #[source]
    pub source: Option<ApiError>,
}

impl Banner {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            source: None,
        }
    }

    pub fn from_api(err: ApiError, lookup: &Lookup) -> Self {
        Self::from_api_with(err, |e| e.user_message(lookup))
    }

    fn from_api_with(err: ApiError, message: impl FnOnce(&ApiError) -> String) -> Self {
        let message = match &err {
            ApiError::Validation(fields) => Self::validation(fields).message,
            other => message(other),
        };
        Self {
            message,
            kind: err.kind(),
            source: Some(err),
        }
    }

    /// Field errors that blocked a submission.
    pub fn validation(fields: &BTreeMap<&'static str, String>) -> Self {
        let message = fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("\n  ");
        Self::new(ErrorKind::Validation, message)
    }

    /// Whether re-running the same command could succeed.
    pub const fn retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Server | ErrorKind::Network | ErrorKind::Unknown
        )
    }
}

/// Classify API failures at the call site.
pub trait Classify<T> {
    fn classify(self, lookup: Lookup) -> Result<T, Banner>;

    /// Classify with a custom message builder.
    fn classify_with(self, message: impl FnOnce(&ApiError) -> String) -> Result<T, Banner>;
}

impl<T> Classify<T> for Result<T, ApiError> {
    fn classify(self, lookup: Lookup) -> Result<T, Banner> {
        self.map_err(|e| Banner::from_api(e, &lookup))
    }

    fn classify_with(self, message: impl FnOnce(&ApiError) -> String) -> Result<T, Banner> {
        self.map_err(|e| Banner::from_api_with(e, message))
    }
}

pub fn write_banner(w: &mut impl Write, banner: &Banner) -> io::Result<()> {
    match banner.kind {
        ErrorKind::Validation => writeln!(w, "Please fix the following:\n  {}", banner.message)?,
        _ => writeln!(w, "Error: {}", banner.message)?,
    }
    if banner.retryable() {
        writeln!(w, "Run the command again to try again.")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn server_banner_offers_retry() {
        let err = ApiError::Status {
            status: 503,
            message: None,
        };
        let banner = Banner::from_api(err, &Lookup::list("clinics"));
        let mut out = Vec::new();
        write_banner(&mut out, &banner).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error: Server error occurred."));
        assert!(text.contains("try again"));
    }

    #[test]
    fn validation_banner_lists_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("name", "Name is required".to_string());
        fields.insert("phone", "Phone number is required".to_string());
        let banner = Banner::validation(&fields);
        assert!(!banner.retryable());

        let mut out = Vec::new();
        write_banner(&mut out, &banner).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Please fix the following:\n  name: Name is required\n  phone: Phone number is required\n"
        );
    }

    #[test]
    fn classify_with_keeps_kind() {
        let result: Result<(), ApiError> = Err(ApiError::Status {
            status: 401,
            message: None,
        });
        let banner = result.classify_with(|_| "custom".into()).unwrap_err();
        assert_eq!(banner.message, "custom");
        assert_eq!(banner.kind, ErrorKind::Authentication);
    }
}
