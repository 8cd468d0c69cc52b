//! Best-effort field coercion for loosely typed API records.
//!
//! Every reader takes `Option<&Value>` so that "field missing" and
//! "field present but null" stay distinguishable: a missing number falls
//! back to the caller's default while `null` reads as zero.

use crate::domain::model::EntityId;
use serde_json::{Map, Value};

static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

/// Object view of a record; anything that is not an object reads as empty.
pub fn fields(value: &Value) -> &Map<String, Value> {
    value.as_object().unwrap_or(&*EMPTY)
}

pub fn number(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        None => return fallback,
        Some(Value::Null) => Some(0.0),
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => fallback,
    }
}

pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// String form of a scalar: integers without a trailing `.0`.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(n) => Some(number_string(n)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or(0.0);
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// First truthy candidate rendered as text, or an empty string.
pub fn text(candidates: &[Option<&Value>]) -> String {
    candidates
        .iter()
        .copied()
        .find(|candidate| is_truthy(*candidate))
        .flatten()
        .and_then(scalar_string)
        .unwrap_or_default()
}

pub fn trimmed_text(candidates: &[Option<&Value>]) -> String {
    text(candidates).trim().to_string()
}

/// `null` and missing map to `None`; other scalars become an id.
pub fn entity_id(value: Option<&Value>) -> Option<EntityId> {
    match value? {
        Value::Null => None,
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => EntityId::Int(i),
            None => EntityId::Text(number_string(n)),
        }),
        other => scalar_string(other).map(EntityId::Text),
    }
}

/// First present, non-null candidate as an id.
pub fn first_id(candidates: &[Option<&Value>]) -> Option<EntityId> {
    candidates.iter().find_map(|candidate| entity_id(*candidate))
}

/// Array field, or an empty list when absent or of another type.
pub fn list<'a>(value: Option<&'a Value>) -> &'a [Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

/// First candidate that is actually an array, cloned.
pub fn first_list(candidates: &[Option<&Value>]) -> Vec<Value> {
    candidates
        .iter()
        .find_map(|candidate| candidate.and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}
