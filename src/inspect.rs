//! Helpers for reading loosely-shaped response bodies.
//!
//! The nursery API is not consistent about field names across endpoints, so
//! assertions go through these instead of indexing bodies directly.

use std::cmp::Ordering;

use serde_json::Value;

const STOCK_FIELDS: &[&str] = &[
    "stock",
    "quantity",
    "availableStock",
    "remainingStock",
    "currentStock",
];

const NESTED_FIELDS: &[&str] = &["plant", "data", "result"];

const ERROR_FIELDS: &[&str] = &["message", "error", "errors", "path", "status", "timestamp"];

/// Find the stock level of a plant body.
///
/// Direct candidates are tried first (numbers, or strings that parse as
/// numbers), then the same search recurses into `plant`, `data` and `result`.
pub fn extract_stock(body: &Value) -> Option<f64> {
    let obj = body.as_object()?;

    for field in STOCK_FIELDS {
        match obj.get(*field) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64().filter(|v| v.is_finite()) {
                    return Some(v);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<f64>() {
                    if v.is_finite() {
                        return Some(v);
                    }
                }
            }
            _ => {}
        }
    }

    NESTED_FIELDS
        .iter()
        .filter_map(|field| obj.get(*field))
        .find_map(extract_stock)
}

/// True when the body looks like an error payload: non-blank text, or an
/// object carrying any of the usual Spring error fields.
pub fn has_error_field(body: &Value) -> bool {
    match body {
        Value::String(s) => !s.trim().is_empty(),
        Value::Object(obj) => ERROR_FIELDS.iter().any(|f| obj.contains_key(*f)),
        _ => false,
    }
}

/// The human-readable error message: `message`, falling back to `error`.
pub fn error_message(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
}

/// Item list of a response: the body itself when it is an array, or the
/// `content` array of a Spring page.
pub fn items(body: &Value) -> Option<&Vec<Value>> {
    body.as_array()
        .or_else(|| body.get("content").and_then(Value::as_array))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    Unsorted,
}

/// Classify the order of `field` across `items`.
///
/// Items missing the field are ignored. Numbers compare numerically, anything
/// else by case-insensitive text. A list with fewer than two values, or whose
/// values are all equal, counts as ascending.
pub fn sort_order(items: &[Value], field: &str) -> SortOrder {
    let keys: Vec<SortKey> = items
        .iter()
        .filter_map(|item| item.get(field))
        .filter_map(SortKey::from_value)
        .collect();

    let mut ascending = keys.clone();
    ascending.sort_by(SortKey::compare);
    if keys == ascending {
        return SortOrder::Ascending;
    }

    ascending.reverse();
    if keys == ascending {
        SortOrder::Descending
    } else {
        SortOrder::Unsorted
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(SortKey::Number),
            Value::String(s) => Some(SortKey::Text(s.to_lowercase())),
            Value::Bool(b) => Some(SortKey::Text(b.to_string())),
            _ => None,
        }
    }

    fn compare(a: &SortKey, b: &SortKey) -> Ordering {
        match (a, b) {
            (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}
