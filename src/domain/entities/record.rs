use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

/// One row as returned by a data source: field name to JSON value.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    pub data: Vec<Record>,
    pub total_count: usize,
}

impl ResultPage {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub rows_per_page: usize,
}

impl PageWindow {
    pub fn new(page: usize, rows_per_page: usize) -> Self {
        Self {
            page,
            rows_per_page,
        }
    }

    /// Zero rows per page is clamped to one.
    pub fn bounds(&self) -> (usize, usize) {
        let rows = self.rows_per_page.max(1);
        let start = self.page.saturating_mul(rows);
        (start, start.saturating_add(rows))
    }
}

/// Filter values the record pipeline applies, independent of where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordFilter {
    pub active_tab: String,
    pub dropdown: String,
    pub multi_select: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Accepts RFC 3339 timestamps as well as plain `YYYY-MM-DD` dates
/// (single-digit month and day included).
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.naive_utc().date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Text used for equality and membership filters.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

fn value_rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Number(_)) => 3,
        Some(Value::String(_)) => 4,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 5,
    }
}

/// Total order over optional JSON values: missing < null < bool < number < string < composite.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(a @ (Value::Array(_) | Value::Object(_))), Some(b @ (Value::Array(_) | Value::Object(_)))) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => value_rank(left).cmp(&value_rank(right)),
    }
}
