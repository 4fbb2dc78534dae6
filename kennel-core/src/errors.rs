//! # Errors
//!
//! Kennel services fail with a small set of structured errors modelled on
//! Feathers error classes:
//! - a stable status code, `name` and `className` per kind
//! - carried through `anyhow::Error` so service code can use `?` freely
//! - rendered by [`KennelError::to_json`]; the adapter crate picks the
//!   status line and transport

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::{json, Value};

/// Result type used across the Kennel service APIs.
pub type KennelResult<T> = std::result::Result<T, AnyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,       // 400
    NotFound,         // 404
    MethodNotAllowed, // 405
    Unprocessable,    // 422
    GeneralError,     // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::Unprocessable => 422,
            ErrorKind::GeneralError => 500,
        }
    }

    /// Error `name`, e.g. "NotFound".
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::MethodNotAllowed => "MethodNotAllowed",
            ErrorKind::Unprocessable => "Unprocessable",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    /// Kebab-cased `className`.
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::NotFound => "not-found",
            ErrorKind::MethodNotAllowed => "method-not-allowed",
            ErrorKind::Unprocessable => "unprocessable",
            ErrorKind::GeneralError => "general-error",
        }
    }
}

/// A structured error that can live inside `anyhow::Error`.
#[derive(Debug, Clone)]
pub struct KennelError {
    pub kind: ErrorKind,
    pub message: String,
    /// Per-field messages, `{"field": ["message", ...]}`.
    pub errors: Option<Value>,
}

impl KennelError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Look for a `KennelError` anywhere in the chain of an `anyhow::Error`.
    pub fn from_anyhow(err: &AnyError) -> Option<&KennelError> {
        err.chain().find_map(|e| e.downcast_ref::<KennelError>())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotAllowed, msg)
    }
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unprocessable, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }

    /// Client payload: `{name, message, code, className, errors?}`.
    pub fn to_json(&self) -> Value {
        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }
}

impl fmt::Display for KennelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for KennelError {}
