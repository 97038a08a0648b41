use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::entities::record::{
    compare_values, field_text, parse_calendar_date, PageWindow, Record, RecordFilter, ResultPage,
};
use crate::domain::entities::table_state::{SortConfig, SortDirection};

/// Decides which records belong to a named tab.
pub trait TabPredicate: Send + Sync {
    fn admits(&self, tab: &str, record: &Record) -> bool;
}

impl<F> TabPredicate for F
where
    F: Fn(&str, &Record) -> bool + Send + Sync,
{
    fn admits(&self, tab: &str, record: &Record) -> bool {
        self(tab, record)
    }
}

/// Stock buckets: `inStock` above 50, `lowStock` 1 to 50, `outOfStock` at 0.
/// Any other tab (including `all`) passes everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockTabs {
    pub field: String,
}

impl StockTabs {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl TabPredicate for StockTabs {
    fn admits(&self, tab: &str, record: &Record) -> bool {
        let stock = record.get(&self.field).and_then(Value::as_f64);
        match (tab, stock) {
            ("inStock", Some(stock)) => stock > 50.0,
            ("lowStock", Some(stock)) => stock > 0.0 && stock <= 50.0,
            ("outOfStock", Some(stock)) => stock == 0.0,
            ("inStock" | "lowStock" | "outOfStock", None) => false,
            _ => true,
        }
    }
}

/// Which record fields each filter looks at. Unbound filters are no-ops.
#[derive(Clone, Default)]
pub struct FieldBindings {
    pub tab: Option<Arc<dyn TabPredicate>>,
    pub dropdown_field: Option<String>,
    pub multi_select_field: Option<String>,
    pub date_field: Option<String>,
}

impl fmt::Debug for FieldBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBindings")
            .field("tab", &self.tab.as_ref().map(|_| "<predicate>"))
            .field("dropdown_field", &self.dropdown_field)
            .field("multi_select_field", &self.multi_select_field)
            .field("date_field", &self.date_field)
            .finish()
    }
}

fn filter_by_tab(records: Vec<Record>, tab: &str, bindings: &FieldBindings) -> Vec<Record> {
    let Some(predicate) = bindings.tab.as_ref() else {
        return records;
    };
    if tab.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| predicate.admits(tab, record))
        .collect()
}

fn filter_by_dropdown(records: Vec<Record>, selected: &str, bindings: &FieldBindings) -> Vec<Record> {
    let Some(field) = bindings.dropdown_field.as_deref() else {
        return records;
    };
    if selected.is_empty() {
        return records;
    }
    let selected = selected.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            record
                .get(field)
                .and_then(field_text)
                .map(|text| text.to_lowercase() == selected)
                .unwrap_or(false)
        })
        .collect()
}

fn filter_by_multi_select(
    records: Vec<Record>,
    selected: &[String],
    bindings: &FieldBindings,
) -> Vec<Record> {
    let Some(field) = bindings.multi_select_field.as_deref() else {
        return records;
    };
    if selected.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| {
            record
                .get(field)
                .and_then(field_text)
                .map(|text| selected.iter().any(|value| *value == text))
                .unwrap_or(false)
        })
        .collect()
}

fn filter_by_date_range(
    records: Vec<Record>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    bindings: &FieldBindings,
) -> Vec<Record> {
    let Some(field) = bindings.date_field.as_deref() else {
        return records;
    };
    if start.is_none() && end.is_none() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| {
            let Some(date) = record
                .get(field)
                .and_then(Value::as_str)
                .and_then(parse_calendar_date)
            else {
                return false;
            };
            start.map_or(true, |start| date >= start) && end.map_or(true, |end| date <= end)
        })
        .collect()
}

/// Tab, dropdown, multi-select, then date range; each a full pass.
pub fn apply_filters(records: Vec<Record>, filter: &RecordFilter, bindings: &FieldBindings) -> Vec<Record> {
    let records = filter_by_tab(records, &filter.active_tab, bindings);
    let records = filter_by_dropdown(records, &filter.dropdown, bindings);
    let records = filter_by_multi_select(records, &filter.multi_select, bindings);
    filter_by_date_range(records, filter.start_date, filter.end_date, bindings)
}

/// Stable; records with equal keys keep their input order in both directions.
pub fn sort_records(records: &mut [Record], sort: &SortConfig) {
    if sort.is_unsorted() {
        return;
    }
    let key = sort.key.as_str();
    records.sort_by(|a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn paginate(records: Vec<Record>, window: PageWindow) -> ResultPage {
    let total_count = records.len();
    let (start, end) = window.bounds();
    let data = if start >= total_count {
        Vec::new()
    } else {
        records
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect()
    };
    ResultPage { data, total_count }
}

pub fn transform(
    records: Vec<Record>,
    filter: &RecordFilter,
    sort: &SortConfig,
    window: PageWindow,
    bindings: &FieldBindings,
) -> ResultPage {
    let mut filtered = apply_filters(records, filter, bindings);
    sort_records(&mut filtered, sort);
    paginate(filtered, window)
}
