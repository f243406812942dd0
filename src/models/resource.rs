//! Tri-state result wrapper returned by every fetch and conversion.

use std::fmt::Display;

/// Message carried by an `Error` produced from combining pages.
pub const RESOURCE_ERROR: &str = "resource error";

/// Message used when an upstream error carries no text.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Outcome of a fetch or conversion.
///
/// `Error` and `Loading` may carry a previous or partial payload so a caller
/// can keep showing what it already has. `Success` always carries a complete
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultState<T> {
    Success(T),
    Error { data: Option<T>, message: String },
    Loading(Option<T>),
}

impl<T> ResultState<T> {
    /// Build an `Error` without payload, substituting [`UNKNOWN_ERROR`] for
    /// a blank message.
    pub fn error<S: Into<String>>(message: S) -> Self {
        ResultState::Error {
            data: None,
            message: non_blank(message.into()),
        }
    }

    /// Payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            ResultState::Success(data) => Some(data),
            ResultState::Error { data, .. } | ResultState::Loading(data) => data.as_ref(),
        }
    }

    /// Consume the wrapper and return its payload, if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            ResultState::Success(data) => Some(data),
            ResultState::Error { data, .. } | ResultState::Loading(data) => data,
        }
    }

    /// Error message, only set for the `Error` variant.
    pub fn message(&self) -> Option<&str> {
        match self {
            ResultState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultState::Error { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResultState::Loading(_))
    }

    /// Switch to `Loading`, preferring `data` over the current payload.
    pub fn to_loading(self, data: Option<T>) -> Self {
        let data = data.or_else(|| self.into_data());
        ResultState::Loading(data)
    }

    /// Switch to `Error`, preferring `data` over the current payload.
    pub fn to_error<S: Into<String>>(self, data: Option<T>, message: S) -> Self {
        let data = data.or_else(|| self.into_data());
        ResultState::Error {
            data,
            message: non_blank(message.into()),
        }
    }

    /// Transform the payload while keeping the variant.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResultState<U> {
        match self {
            ResultState::Success(data) => ResultState::Success(f(data)),
            ResultState::Error { data, message } => ResultState::Error {
                data: data.map(f),
                message,
            },
            ResultState::Loading(data) => ResultState::Loading(data.map(f)),
        }
    }
}

impl<U> ResultState<Vec<U>> {
    /// Append the payload of `other` to this one.
    ///
    /// The result is `Error` (with [`RESOURCE_ERROR`]) when either side is an
    /// error, `Success` otherwise. Missing payloads count as empty.
    pub fn combine(self, other: ResultState<Vec<U>>) -> ResultState<Vec<U>> {
        let failed = self.is_error() || other.is_error();
        let mut data = self.into_data().unwrap_or_default();
        data.extend(other.into_data().unwrap_or_default());

        if failed {
            ResultState::Error {
                data: Some(data),
                message: RESOURCE_ERROR.to_string(),
            }
        } else {
            ResultState::Success(data)
        }
    }
}

impl<U> Default for ResultState<Vec<U>> {
    fn default() -> Self {
        ResultState::Success(Vec::new())
    }
}

impl<T, E: Display> From<std::result::Result<T, E>> for ResultState<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(data) => ResultState::Success(data),
            Err(e) => ResultState::error(e.to_string()),
        }
    }
}

fn non_blank(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
