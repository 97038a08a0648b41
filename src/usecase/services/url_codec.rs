//! Query-string form of [`TableState`].
//!
//! Decoding never fails: anything missing or malformed falls back to the
//! caller's [`TableDefaults`]. Encoding only emits what differs from "empty",
//! except `page` and `rowsPerPage`, which are always present.

use std::collections::HashMap;

use chrono::{NaiveDate, SecondsFormat};
use url::form_urlencoded;

use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::record::parse_calendar_date;
use crate::domain::entities::table_state::{SortConfig, SortDirection, TableState};

pub const PAGE: &str = "page";
pub const ROWS_PER_PAGE: &str = "rowsPerPage";
pub const SORT_KEY: &str = "sortKey";
pub const SORT_DIRECTION: &str = "sortDirection";
pub const SEARCH: &str = "search";
pub const ACTIVE_TAB: &str = "activeTab";
pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";
pub const DROPDOWN: &str = "dropdown";
pub const MULTI_SELECT: &str = "multiSelect";

fn query_pairs(query: &str) -> HashMap<String, String> {
    let query = query.trim().trim_start_matches('?');
    let mut pairs = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins, as URLSearchParams.get does.
        pairs.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }
    pairs
}

fn non_empty<'a>(pairs: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    pairs
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn decode_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    let decoded = urlencoding::decode(raw)
        .map(|text| text.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    parse_calendar_date(&decoded)
}

fn decode_multi_select(raw: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for part in raw.split(',') {
        if part.is_empty() || values.iter().any(|existing| existing == part) {
            continue;
        }
        values.push(part.to_string());
    }
    values
}

pub fn decode(query: &str, defaults: &TableDefaults) -> TableState {
    let pairs = query_pairs(query);

    let page = non_empty(&pairs, PAGE)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let rows_per_page = non_empty(&pairs, ROWS_PER_PAGE)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|rows| *rows > 0)
        .unwrap_or(defaults.rows_per_page);

    let sort = SortConfig {
        key: non_empty(&pairs, SORT_KEY)
            .map(str::to_string)
            .unwrap_or_else(|| defaults.sort.key.clone()),
        direction: non_empty(&pairs, SORT_DIRECTION)
            .and_then(SortDirection::parse)
            .unwrap_or(defaults.sort.direction),
    };

    let text_or = |key: &str, fallback: &String| {
        non_empty(&pairs, key)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.clone())
    };

    let multi_select = non_empty(&pairs, MULTI_SELECT)
        .map(decode_multi_select)
        .filter(|values| !values.is_empty())
        .unwrap_or_else(|| defaults.multi_select.clone());

    TableState {
        page,
        rows_per_page,
        sort,
        search: text_or(SEARCH, &defaults.search),
        active_tab: text_or(ACTIVE_TAB, &defaults.active_tab),
        dropdown: text_or(DROPDOWN, &defaults.dropdown),
        multi_select,
        start_date: decode_date(non_empty(&pairs, START_DATE)),
        end_date: decode_date(non_empty(&pairs, END_DATE)),
    }
}

/// Midnight UTC in ISO-8601 with milliseconds, e.g. `2024-03-01T00:00:00.000Z`.
pub fn format_timestamp(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| {
            midnight
                .and_utc()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        })
        .unwrap_or_else(|| date.format("%Y-%m-%d").to_string())
}

pub fn encode(state: &TableState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    query.append_pair(PAGE, &state.page.to_string());
    query.append_pair(ROWS_PER_PAGE, &state.rows_per_page.to_string());

    if !state.sort.is_unsorted() {
        query.append_pair(SORT_KEY, &state.sort.key);
        query.append_pair(SORT_DIRECTION, state.sort.direction.as_str());
    }
    if !state.search.is_empty() {
        query.append_pair(SEARCH, &state.search);
    }
    if !state.active_tab.is_empty() {
        query.append_pair(ACTIVE_TAB, &state.active_tab);
    }
    if let Some(start) = state.start_date {
        query.append_pair(START_DATE, &format_timestamp(start));
    }
    if let Some(end) = state.end_date {
        query.append_pair(END_DATE, &format_timestamp(end));
    }
    if !state.dropdown.is_empty() {
        query.append_pair(DROPDOWN, &state.dropdown);
    }
    if !state.multi_select.is_empty() {
        query.append_pair(MULTI_SELECT, &state.multi_select.join(","));
    }

    query.finish()
}
