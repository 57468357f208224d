//! Data models for the admin dashboard resources.
//!
//! Each resource has a raw shape (what the backend sends), a normalized shape
//! (what the tables render) and a form draft (what the create/edit dialogs submit).

mod page;
mod salon;
mod school;
mod service;
mod user;

pub use page::*;
pub use salon::*;
pub use school::*;
pub use service::*;
pub use user::*;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Nested foreign-key object as embedded by the backend, e.g. `salon: {id, name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Accept a JSON number or string id.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s),
        other => Err(D::Error::custom(format!("invalid id: {}", other))),
    }
}

pub(crate) fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(D::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Active flag sent as `0/1`, `"0"/"1"` or a boolean.
pub(crate) fn active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => match s.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid active flag: {:?}", other))),
        },
        other => Err(D::Error::custom(format!("invalid active flag: {}", other))),
    }
}

/// Decimal sent either as a JSON number or a numeric string.
pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid number: {:?}", s))),
        other => Err(D::Error::custom(format!("invalid number: {}", other))),
    }
}

pub(crate) fn require(errors: &mut Vec<String>, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", label));
    }
}

pub(crate) fn check_email(errors: &mut Vec<String>, email: Option<&str>) {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return;
    };
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !valid {
        errors.push("Email must be a valid email address".to_string());
    }
}

/// Empty strings in optional form fields mean "not set".
pub(crate) fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
