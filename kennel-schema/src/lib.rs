//! kennel-schema: turning untrusted JSON into validated, typed input.
//!
//! The flow for a write is always the same:
//! 1. [`parse`] the JSON into a typed input (unknown fields, bad enum values
//!    and wrong types are rejected by serde)
//! 2. [`Normalize`] it (trim strings)
//! 3. [`check`] the `validator` constraints
//!
//! Every failure is an `Unprocessable` [`KennelError`] whose `errors` map is
//! keyed by field path, with `_schema` for failures not tied to one field.

mod patch;
mod validate;

pub use patch::Patch;
pub use validate::{check, ensure_valid, parse, validate};

use kennel_core::errors::KennelError;
use serde_json::{Map, Value};

/// Accumulates `{field: [messages]}` for an `Unprocessable` error.
#[derive(Debug, Default)]
pub struct SchemaErrors {
    map: Map<String, Value>,
}

impl SchemaErrors {
    pub fn push_schema(&mut self, msg: impl Into<String>) {
        Self::push_to(&mut self.map, "_schema", msg);
    }

    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        Self::push_to(&mut self.map, field, msg);
    }

    fn push_to(map: &mut Map<String, Value>, key: &str, msg: impl Into<String>) {
        let msg = Value::String(msg.into());
        match map.get_mut(key) {
            Some(Value::Array(arr)) => arr.push(msg),
            _ => {
                map.insert(key.to_string(), Value::Array(vec![msg]));
            }
        }
    }

    pub fn into_unprocessable_anyhow(self, message: &str) -> anyhow::Error {
        unprocessable(message, Value::Object(self.map))
    }
}

pub fn unprocessable(message: &str, errors: Value) -> anyhow::Error {
    KennelError::unprocessable(message).with_errors(errors).into_anyhow()
}

pub fn schema_error(message: &str, msg: impl Into<String>) -> anyhow::Error {
    let mut errs = SchemaErrors::default();
    errs.push_schema(msg);
    errs.into_unprocessable_anyhow(message)
}

/// In-place cleanup applied to input before its constraints are checked.
pub trait Normalize {
    fn normalize(&mut self);
}

/// Strip leading and trailing whitespace without reallocating when there is none.
pub fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

pub fn trim_opt(s: &mut Option<String>) {
    if let Some(s) = s.as_mut() {
        trim_in_place(s);
    }
}
