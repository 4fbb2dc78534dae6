use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::{schema_error, Normalize, SchemaErrors};

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "required" => Some("is required"),
        "length" => Some("has invalid length"),
        "range" => Some("is out of range"),
        _ => None,
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn push_validation_errors(out: &mut SchemaErrors, prefix: &str, errs: &ValidationErrors) {
    for (field, kind) in errs.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let key = join_path(prefix, field);
                for e in field_errors {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .or_else(|| friendly_message(&e.code).map(|m| m.to_string()))
                        .unwrap_or_else(|| e.code.to_string());
                    out.push_field(&key, msg);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                push_validation_errors(out, &join_path(prefix, field), nested.as_ref());
            }
            ValidationErrorsKind::List(items) => {
                let base = join_path(prefix, field);
                for (idx, nested) in items {
                    push_validation_errors(out, &format!("{base}[{idx}]"), nested.as_ref());
                }
            }
        }
    }
}

fn json_type(data: &Value) -> &'static str {
    match data {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a JSON object into `T`. Serde failures (unknown field, unknown
/// enum variant, missing or mistyped field) become `_schema` entries.
///
/// Anything but an object is refused up front: serde would otherwise read
/// an array positionally and skip `deny_unknown_fields`.
pub fn parse<T>(data: &Value, error_message: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    if !data.is_object() {
        return Err(schema_error(
            error_message,
            format!("expected a JSON object, got {}", json_type(data)),
        ));
    }
    serde_json::from_value(data.clone()).map_err(|e| schema_error(error_message, e.to_string()))
}

/// Check the `validator` constraints of an already typed value.
pub fn check<T>(value: &T, error_message: &str) -> anyhow::Result<()>
where
    T: Validate,
{
    value.validate().map_err(|e| {
        let mut out = SchemaErrors::default();
        push_validation_errors(&mut out, "", &e);
        out.into_unprocessable_anyhow(error_message)
    })
}

/// Normalize, then check. For input that did not come through [`parse`].
pub fn ensure_valid<T>(mut value: T, error_message: &str) -> anyhow::Result<T>
where
    T: Normalize + Validate,
{
    value.normalize();
    check(&value, error_message)?;
    Ok(value)
}

/// Parse, normalize and check in one go.
pub fn validate<T>(data: &Value, error_message: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Normalize + Validate,
{
    ensure_valid(parse(data, error_message)?, error_message)
}
