//! API error types

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

/// HTTP status the backend uses for rejected form input.
pub const VALIDATION_STATUS: u16 = 422;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success response from the API.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the response body, if it had one.
        message: Option<String>,
    },

    /// The backend rejected the submitted input (HTTP 422).
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Messages per field, in the order the backend listed them.
        errors: BTreeMap<String, Vec<String>>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

/// How a failed form submission should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// One message per form field.
    Fields(BTreeMap<String, String>),
    /// A single message above the form.
    General(String),
}

/// Error body shape shared by every backend endpoint.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Builds the error for a non-success response.
    ///
    /// A 422 whose body carries an `errors` map becomes [`ApiError::Validation`];
    /// anything else is [`ApiError::Http`] with the body's `message` if present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        match (status, parsed.errors) {
            (VALIDATION_STATUS, Some(errors)) => Self::Validation {
                message: parsed.message.unwrap_or_default(),
                errors,
            },
            _ => Self::http(status, parsed.message),
        }
    }

    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Validation { .. } => Some(VALIDATION_STATUS),
            _ => None,
        }
    }

    /// The human-readable message the backend sent, if any.
    pub fn backend_message(&self) -> Option<&str> {
        let message = match self {
            Self::Http { message, .. } => message.as_deref(),
            Self::Validation { message, .. } => Some(message.as_str()),
            _ => None,
        };
        message.filter(|m| !m.trim().is_empty())
    }

    /// Maps this error onto a form with the given field names.
    ///
    /// Validation errors map field by field, first message per field, when
    /// every reported field is one the form knows about. Any other shape
    /// becomes a single general message: the backend's, or `fallback`.
    pub fn feedback(&self, expected_fields: &[&str], fallback: &str) -> Feedback {
        if let Self::Validation { errors, .. } = self {
            let known = !errors.is_empty() && errors.keys().all(|field| expected_fields.contains(&field.as_str()));
            if known {
                let fields = errors
                    .iter()
                    .filter_map(|(field, messages)| Some((field.clone(), messages.first()?.clone())))
                    .collect();
                return Feedback::Fields(fields);
            }
        }
        Feedback::General(self.backend_message().unwrap_or(fallback).to_string())
    }
}
