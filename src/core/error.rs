//! Structured failures raised by states, events and contexts.

use super::event::Event;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Open set of failure codes.
///
/// The framework defines [`CREATION_ERROR`](ErrorCode::CREATION_ERROR) and
/// [`EVENT_ERROR`](ErrorCode::EVENT_ERROR). Consumers layer their own codes on
/// top with [`ErrorCode::custom`]:
///
/// ```rust
/// use statecraft::core::ErrorCode;
///
/// const CONNECTION_FAILURE: ErrorCode = ErrorCode::custom("CONNECTION_FAILURE");
/// assert_eq!(CONNECTION_FAILURE.as_str(), "CONNECTION_FAILURE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(Cow<'static, str>);

impl ErrorCode {
    /// A required constructor argument was missing.
    pub const CREATION_ERROR: ErrorCode = ErrorCode::custom("CREATION_ERROR");

    /// Event-related failure, including unmatched dispatch in strict mode.
    pub const EVENT_ERROR: ErrorCode = ErrorCode::custom("EVENT_ERROR");

    pub const fn custom(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error raised by a state machine.
///
/// Carries the failure code, the method that failed, the operation or
/// component it belongs to, and a human-readable message. When the failure
/// wraps an underlying cause, the cause's text becomes the message.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{code} in {operation}::{method}: {message}")]
pub struct FsmError {
    code: ErrorCode,
    method: Cow<'static, str>,
    operation: Cow<'static, str>,
    message: String,
}

impl FsmError {
    pub fn new(
        code: ErrorCode,
        method: impl Into<Cow<'static, str>>,
        operation: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            method: method.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// `CREATION_ERROR` for a missing constructor argument.
    pub fn creation(
        method: impl Into<Cow<'static, str>>,
        operation: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorCode::CREATION_ERROR, method, operation, message)
    }

    /// Wrap an underlying cause, keeping its text as the message.
    pub fn from_cause(
        code: ErrorCode,
        method: impl Into<Cow<'static, str>>,
        operation: impl Into<Cow<'static, str>>,
        cause: &dyn fmt::Display,
    ) -> Self {
        Self::new(code, method, operation, cause.to_string())
    }

    /// `EVENT_ERROR` for an event with no transition from `state`.
    pub fn unmatched_event(state: &str, event: &Event) -> Self {
        Self::new(
            ErrorCode::EVENT_ERROR,
            "cast_event",
            "StateMachineContext",
            format!("no transition from '{state}' on event '{event}'"),
        )
    }

    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error carries `code`.
    pub fn is(&self, code: &ErrorCode) -> bool {
        &self.code == code
    }
}
