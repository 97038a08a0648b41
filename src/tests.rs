use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::filter::{FilterChange, FilterConfig, FilterKind, FilterOption};
use crate::domain::entities::record::{
    compare_values, parse_calendar_date, PageWindow, Record, RecordFilter, ResultPage,
};
use crate::domain::entities::table_state::{SortConfig, SortDirection, TableState};
use crate::infra::http::dummyjson::{records_from_body, DummyJsonSource, BULK_LIMIT};
use crate::infra::memory::source::MemorySource;
use crate::infra::store::url_store::UrlStateStore;
use crate::ui::columns::{
    last_page, pagination_label, rating_stars, Align, BadgeTone, CellContent, CellFormat,
};
use crate::ui::pages::products::{product_bindings, product_filters};
use crate::ui::pages::table_page::{PageKind, TablePage};
use crate::ui::pages::users::user_bindings;
use crate::ui::styles::{table_container_style, table_header_cell_style};
use crate::usecase::ports::data_source::{DataSource, FetchError};
use crate::usecase::ports::state_store::{StateStore, StoreError};
use crate::usecase::services::controller::{FetchOutcome, TableStateController};
use crate::usecase::services::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::usecase::services::transform::{
    apply_filters, paginate, sort_records, transform, FieldBindings, StockTabs, TabPredicate,
};
use crate::usecase::services::url_codec::{decode, encode, format_timestamp};
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("table-explorer-{prefix}-{nanos}"))
}

fn record(value: Value) -> Record {
    value
        .as_object()
        .cloned()
        .expect("fixture should be a JSON object")
}

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("fixture date should parse")
}

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|record| record["id"].as_i64().expect("fixture id should be an integer"))
        .collect()
}

fn product_fixture() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "title": "Mascara", "brand": "Essence", "category": "beauty", "price": 9.99, "stock": 99})),
        record(json!({"id": 2, "title": "Eyeshadow", "brand": "Glamour Beauty", "category": "beauty", "price": 19.99, "stock": 34})),
        record(json!({"id": 3, "title": "Powder", "brand": "Glamour Beauty", "category": "beauty", "price": 14.99, "stock": 0})),
        record(json!({"id": 4, "title": "J'adore", "brand": "Dior", "category": "fragrances", "price": 89.99, "stock": 20})),
        record(json!({"id": 5, "title": "Apple", "category": "groceries", "price": 1.99, "stock": 9})),
        record(json!({"id": 6, "title": "Bed", "brand": "Annibale Colombo", "category": "furniture", "price": 1899.99, "stock": 88})),
    ]
}

fn user_fixture() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "firstName": "Emily", "gender": "female", "birthDate": "1996-5-30", "age": 28})),
        record(json!({"id": 2, "firstName": "Michael", "gender": "male", "birthDate": "1979-4-15", "age": 45})),
        record(json!({"id": 3, "firstName": "Sophia", "gender": "female", "birthDate": "2000-2-28", "age": 24})),
        record(json!({"id": 4, "firstName": "James", "gender": "male", "birthDate": "1989-11-8", "age": 35})),
        record(json!({"id": 5, "firstName": "Ghost", "gender": "male", "age": 99})),
    ]
}

fn stock_thirds() -> Vec<Record> {
    (0..1000)
        .map(|idx| {
            let stock = match idx % 3 {
                0 => 0,
                1 => 30,
                _ => 80,
            };
            record(json!({"id": idx, "stock": stock}))
        })
        .collect()
}

fn products_controller(query: &str) -> (TableStateController, UrlStateStore) {
    let url = UrlStateStore::new(query);
    let page = TablePage::for_kind(PageKind::Products);
    let controller = TableStateController::new(
        page.filter_config.clone(),
        page.defaults.clone(),
        Box::new(url.clone()),
    );
    (controller, url)
}

fn sample_page(ids: &[i64], total: usize) -> ResultPage {
    ResultPage {
        data: ids.iter().map(|id| record(json!({ "id": id }))).collect(),
        total_count: total,
    }
}

// url codec

#[test]
fn decode_reads_pagination_and_sort_and_defaults_the_rest() {
    let state = decode(
        "?page=2&rowsPerPage=5&sortKey=age&sortDirection=desc",
        &TableDefaults::default(),
    );

    assert_eq!(
        state,
        TableState {
            page: 2,
            rows_per_page: 5,
            sort: SortConfig::new("age", SortDirection::Desc),
            ..TableState::default()
        }
    );
}

#[test]
fn decode_empty_query_uses_caller_defaults() {
    let defaults = TableDefaults {
        rows_per_page: 25,
        sort: SortConfig::new("id", SortDirection::Asc),
        active_tab: "all".to_string(),
        ..TableDefaults::default()
    };

    let state = decode("", &defaults);

    assert_eq!(state.page, 0);
    assert_eq!(state.rows_per_page, 25);
    assert_eq!(state.sort, SortConfig::new("id", SortDirection::Asc));
    assert_eq!(state.active_tab, "all");
    assert!(state.search.is_empty());
    assert!(state.multi_select.is_empty());
    assert_eq!(state.start_date, None);
}

#[test]
fn decode_falls_back_on_malformed_values() {
    let state = decode(
        "page=abc&rowsPerPage=0&sortDirection=sideways&startDate=not-a-date&endDate=2024-13-45",
        &TableDefaults::default(),
    );

    assert_eq!(state.page, 0);
    assert_eq!(state.rows_per_page, 10);
    assert_eq!(state.sort.direction, SortDirection::Asc);
    assert_eq!(state.start_date, None);
    assert_eq!(state.end_date, None);

    let negative = decode("page=-3", &TableDefaults::default());
    assert_eq!(negative.page, 0);
}

#[test]
fn decode_parses_timestamps_including_double_encoded_ones() {
    let state = decode(
        "startDate=2024-03-01T00%3A00%3A00.000Z&endDate=2024-03-31T00%253A00%253A00.000Z",
        &TableDefaults::default(),
    );

    assert_eq!(state.start_date, Some(date("2024-03-01")));
    assert_eq!(state.end_date, Some(date("2024-03-31")));

    let plain = decode("startDate=1990-1-5", &TableDefaults::default());
    assert_eq!(plain.start_date, Some(date("1990-01-05")));
}

#[test]
fn decode_splits_multi_select_on_commas() {
    let state = decode("multiSelect=Glamour+Beauty,Dior,,Dior", &TableDefaults::default());

    assert_eq!(state.multi_select, vec!["Glamour Beauty", "Dior"]);
}

#[test]
fn encode_default_state_keeps_url_minimal() {
    assert_eq!(encode(&TableState::default()), "page=0&rowsPerPage=10");
}

#[test]
fn encode_emits_canonical_timestamps_and_joined_selection() {
    let state = TableState {
        search: "red lipstick".to_string(),
        start_date: Some(date("2024-03-01")),
        multi_select: vec!["Essence".to_string(), "Dior".to_string()],
        ..TableState::default()
    };

    let query = encode(&state);

    assert_eq!(format_timestamp(date("2024-03-01")), "2024-03-01T00:00:00.000Z");
    assert!(query.contains("search=red+lipstick"), "query was {query}");
    assert!(query.contains("startDate=2024-03-01T00%3A00%3A00.000Z"), "query was {query}");
    assert!(query.contains("multiSelect=Essence%2CDior"), "query was {query}");
    assert!(!query.contains("endDate"));
    assert!(!query.contains("sortKey"));
}

#[test]
fn encode_always_emits_active_tab_once_set() {
    let state = TableState {
        active_tab: "all".to_string(),
        ..TableState::default()
    };

    assert!(encode(&state).contains("activeTab=all"));
}

#[test]
fn decode_recovers_encoded_state() {
    let defaults = TableDefaults::default();
    let state = TableState {
        page: 3,
        rows_per_page: 25,
        sort: SortConfig::new("price", SortDirection::Desc),
        search: "eau de parfum & more".to_string(),
        active_tab: "lowStock".to_string(),
        dropdown: "fragrances".to_string(),
        multi_select: vec!["Glamour Beauty".to_string(), "Dior".to_string()],
        start_date: Some(date("2023-01-15")),
        end_date: Some(date("2023-12-31")),
    };

    let query = encode(&state);

    assert_eq!(decode(&query, &defaults), state);
    assert_eq!(encode(&decode(&query, &defaults)), query);
}

// record pipeline

#[test]
fn stock_tabs_select_exact_buckets() {
    let bindings = FieldBindings {
        tab: Some(Arc::new(StockTabs::new("stock"))),
        ..FieldBindings::default()
    };
    let records = stock_thirds();

    let low = apply_filters(
        records.clone(),
        &RecordFilter {
            active_tab: "lowStock".to_string(),
            ..RecordFilter::default()
        },
        &bindings,
    );
    let out = apply_filters(
        records.clone(),
        &RecordFilter {
            active_tab: "outOfStock".to_string(),
            ..RecordFilter::default()
        },
        &bindings,
    );
    let all = apply_filters(
        records.clone(),
        &RecordFilter {
            active_tab: "all".to_string(),
            ..RecordFilter::default()
        },
        &bindings,
    );

    let count_with = |stock: i64| records.iter().filter(|r| r["stock"] == json!(stock)).count();
    assert_eq!(low.len(), count_with(30));
    assert!(low.iter().all(|r| r["stock"] == json!(30)));
    assert_eq!(out.len(), count_with(0));
    assert!(out.iter().all(|r| r["stock"] == json!(0)));
    assert_eq!(all.len(), 1000);
}

#[test]
fn closures_can_act_as_tab_predicates() {
    let cheap: Arc<dyn TabPredicate> = Arc::new(|tab: &str, record: &Record| {
        tab != "cheap" || record["price"].as_f64().map(|p| p < 10.0).unwrap_or(false)
    });
    let bindings = FieldBindings {
        tab: Some(cheap),
        ..FieldBindings::default()
    };

    let filtered = apply_filters(
        product_fixture(),
        &RecordFilter {
            active_tab: "cheap".to_string(),
            ..RecordFilter::default()
        },
        &bindings,
    );

    assert_eq!(ids(&filtered), vec![1, 5]);
}

#[test]
fn unfiltered_transform_counts_every_record() {
    let records = product_fixture();
    let total = records.len();

    let page = transform(
        records,
        &RecordFilter::default(),
        &SortConfig::default(),
        PageWindow::new(0, 4),
        &product_bindings(),
    );

    assert_eq!(page.total_count, total);
    assert_eq!(ids(&page.data), vec![1, 2, 3, 4]);
}

#[test]
fn pages_never_exceed_rows_per_page() {
    let records = stock_thirds();
    let filter = RecordFilter {
        active_tab: "inStock".to_string(),
        ..RecordFilter::default()
    };
    let bindings = product_bindings();

    for rows in [1_usize, 3, 7, 10, 50] {
        for page in 0..=(400 / rows + 1) {
            let result = transform(
                records.clone(),
                &filter,
                &SortConfig::default(),
                PageWindow::new(page, rows),
                &bindings,
            );
            assert!(result.data.len() <= rows, "page {page} with {rows} rows");
            assert_eq!(result.total_count, 333);
        }
    }
}

#[test]
fn empty_multi_select_is_identity() {
    let records = product_fixture();

    let filtered = apply_filters(records.clone(), &RecordFilter::default(), &product_bindings());

    assert_eq!(filtered, records);
}

#[test]
fn multi_select_and_dropdown_combine() {
    let filter = RecordFilter {
        dropdown: "BEAUTY".to_string(),
        multi_select: vec!["Glamour Beauty".to_string(), "Dior".to_string()],
        ..RecordFilter::default()
    };

    let filtered = apply_filters(product_fixture(), &filter, &product_bindings());

    assert_eq!(ids(&filtered), vec![2, 3]);
}

#[test]
fn date_range_is_inclusive_and_open_ended() {
    let bindings = user_bindings();
    let range = |start: Option<&str>, end: Option<&str>| {
        let filter = RecordFilter {
            start_date: start.map(date),
            end_date: end.map(date),
            ..RecordFilter::default()
        };
        ids(&apply_filters(user_fixture(), &filter, &bindings))
    };

    assert_eq!(range(Some("1989-11-08"), Some("1996-05-30")), vec![1, 4]);
    assert_eq!(range(Some("1990-01-01"), None), vec![1, 3]);
    assert_eq!(range(None, Some("1980-01-01")), vec![2]);
    assert_eq!(range(None, None), vec![1, 2, 3, 4, 5]);
    assert!(range(Some("2000-01-01"), Some("1990-01-01")).is_empty());
}

#[test]
fn numeric_sort_reverses_between_directions() {
    let mut ascending = product_fixture();
    let mut descending = product_fixture();

    sort_records(&mut ascending, &SortConfig::new("price", SortDirection::Asc));
    sort_records(&mut descending, &SortConfig::new("price", SortDirection::Desc));

    assert_eq!(ids(&ascending), vec![5, 1, 3, 2, 4, 6]);
    let mut reversed = ids(&descending);
    reversed.reverse();
    assert_eq!(ids(&ascending), reversed);
}

#[test]
fn string_sort_is_lexical_and_missing_values_come_first() {
    let mut records = product_fixture();

    sort_records(&mut records, &SortConfig::new("brand", SortDirection::Asc));

    assert_eq!(ids(&records)[0], 5);
    assert_eq!(ids(&records)[1], 6);
    assert_eq!(
        compare_values(Some(&json!(2)), Some(&json!(10))),
        std::cmp::Ordering::Less
    );
    assert_eq!(
        compare_values(Some(&json!("b")), Some(&json!("a"))),
        std::cmp::Ordering::Greater
    );
}

#[test]
fn pagination_past_the_end_is_empty_and_zero_rows_clamp() {
    let records = product_fixture();

    let beyond = paginate(records.clone(), PageWindow::new(5, 4));
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.total_count, 6);

    let clamped = paginate(records, PageWindow::new(2, 0));
    assert_eq!(ids(&clamped.data), vec![3]);

    let empty = paginate(Vec::new(), PageWindow::new(0, 10));
    assert_eq!(empty, ResultPage::empty());
}

#[test]
fn parse_calendar_date_accepts_dates_and_timestamps() {
    assert_eq!(parse_calendar_date("1996-5-30"), Some(date("1996-05-30")));
    assert_eq!(
        parse_calendar_date("2024-02-29T23:00:00.000Z"),
        Some(date("2024-02-29"))
    );
    assert_eq!(parse_calendar_date(""), None);
    assert_eq!(parse_calendar_date("yesterday"), None);
}

// debounce

#[test]
fn debouncer_fires_only_latest_ticket_after_quiet_period() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(100));

    let first = debouncer.arm(start);
    let second = debouncer.arm(start + Duration::from_millis(40));

    assert!(!debouncer.is_current(&first));
    assert!(!debouncer.fire(&first, start + Duration::from_millis(500)));
    assert!(!debouncer.fire(&second, start + Duration::from_millis(120)));
    assert!(debouncer.fire(&second, start + Duration::from_millis(140)));
    assert!(!debouncer.is_pending());
    assert!(!debouncer.fire(&second, start + Duration::from_millis(200)));
}

#[test]
fn cancelled_debounce_never_fires() {
    let start = Instant::now();
    let mut debouncer = Debouncer::default();

    let ticket = debouncer.arm(start);
    debouncer.cancel();

    assert_eq!(debouncer.delay(), SEARCH_DEBOUNCE);
    assert!(!debouncer.fire(&ticket, start + SEARCH_DEBOUNCE * 2));
}

// controller

#[test]
fn controller_reads_initial_state_from_store() {
    let (controller, _url) = products_controller("?page=4&dropdown=beauty");

    assert_eq!(controller.state().page, 4);
    assert_eq!(controller.state().dropdown, "beauty");
    assert_eq!(controller.state().active_tab, "all");
    assert_eq!(controller.state().sort, SortConfig::new("id", SortDirection::Asc));
}

#[test]
fn rapid_keystrokes_commit_only_the_last_value() {
    let (mut controller, url) = products_controller("");
    let start = Instant::now();
    controller.start();

    let a = controller.on_search_input("a".to_string(), start);
    let ab = controller.on_search_input("ab".to_string(), start + Duration::from_millis(120));
    let abc = controller.on_search_input("abc".to_string(), start + Duration::from_millis(240));

    assert_eq!(controller.search_input(), "abc");
    assert!(controller.state().search.is_empty());
    assert!(controller
        .settle_search(a, start + Duration::from_millis(700))
        .is_none());
    assert!(controller
        .settle_search(ab, start + Duration::from_millis(800))
        .is_none());
    assert!(controller
        .settle_search(abc, start + Duration::from_millis(500))
        .is_none());

    let request = controller
        .settle_search(abc, start + Duration::from_millis(240) + SEARCH_DEBOUNCE)
        .expect("latest keystroke should commit");

    assert_eq!(request.params.search, "abc");
    assert_eq!(controller.state().search, "abc");
    assert!(url.query().contains("search=abc"));
    let defaults = controller.defaults().clone();
    for entry in url.history() {
        let search = decode(&entry, &defaults).search;
        assert!(search.is_empty() || search == "abc", "unexpected entry {entry}");
    }
}

#[test]
fn removing_one_brand_keeps_the_others_and_resets_page() {
    let (mut controller, url) = products_controller("page=3&multiSelect=Dior,Essence");

    let request = controller.on_remove_filter(FilterKind::MultiSelect, "Dior");

    assert_eq!(controller.state().multi_select, vec!["Essence"]);
    assert_eq!(controller.state().page, 0);
    assert_eq!(request.params.multi_select, vec!["Essence"]);
    assert!(url.query().contains("multiSelect=Essence"));
    assert!(url.query().starts_with("page=0"));
}

#[test]
fn filter_changes_reset_pagination_and_update_url() {
    let (mut controller, url) = products_controller("page=5&rowsPerPage=25");

    let request = controller.on_filter_change(FilterChange::Dropdown("fragrances".to_string()));

    assert_eq!(controller.state().page, 0);
    assert_eq!(request.params.dropdown, "fragrances");
    assert_eq!(request.params.limit, 25);
    assert!(url.query().contains("dropdown=fragrances"));

    controller.on_page_change(2);
    assert_eq!(controller.state().page, 2);
    controller.on_rows_per_page_change(50);
    assert_eq!(controller.state().page, 0);
    assert_eq!(controller.state().rows_per_page, 50);
    controller.on_rows_per_page_change(0);
    assert_eq!(controller.state().rows_per_page, 1);
}

#[test]
fn removing_single_filters_restores_their_defaults() {
    let (mut controller, url) = products_controller(
        "page=4&search=lip&activeTab=lowStock&startDate=2024-01-01&endDate=2024-02-01&dropdown=beauty",
    );
    let start = Instant::now();
    let ticket = controller.on_search_input("lipstick".to_string(), start);

    controller.on_remove_filter(FilterKind::Search, "lip");
    assert_eq!(controller.state().search, "");
    assert_eq!(controller.search_input(), "");
    assert_eq!(controller.state().page, 0);
    assert!(controller
        .settle_search(ticket, start + SEARCH_DEBOUNCE)
        .is_none());

    controller.on_remove_filter(FilterKind::ActiveTab, "lowStock");
    assert_eq!(controller.state().active_tab, "all");

    controller.on_remove_filter(FilterKind::StartDate, "2024-01-01");
    assert_eq!(controller.state().start_date, None);
    assert_eq!(controller.state().end_date, Some(date("2024-02-01")));

    controller.on_remove_filter(FilterKind::EndDate, "2024-02-01");
    controller.on_remove_filter(FilterKind::Dropdown, "beauty");
    assert_eq!(controller.state().end_date, None);
    assert_eq!(controller.state().dropdown, "");
    assert!(controller.active_filters().is_empty());
    assert_eq!(
        url.query(),
        "page=0&rowsPerPage=10&sortKey=id&sortDirection=asc&activeTab=all"
    );
}

struct ReadOnlyLocation;

impl StateStore for ReadOnlyLocation {
    fn read(&self, defaults: &TableDefaults) -> TableState {
        defaults.initial_state()
    }

    fn write(&mut self, _state: &TableState) -> Result<(), StoreError> {
        Err(StoreError::Message("location is read-only".to_string()))
    }
}

#[test]
fn store_write_failure_does_not_block_the_fetch() {
    let page = TablePage::for_kind(PageKind::Products);
    let mut controller = TableStateController::new(
        page.filter_config,
        page.defaults,
        Box::new(ReadOnlyLocation),
    );

    let request = controller.on_filter_change(FilterChange::Dropdown("beauty".to_string()));

    assert_eq!(request.generation, 1);
    assert_eq!(request.params.dropdown, "beauty");
    assert_eq!(controller.state().dropdown, "beauty");
    assert!(controller.is_loading());
    assert_eq!(
        controller.complete_fetch(request.generation, Ok(sample_page(&[1], 1))),
        FetchOutcome::Applied
    );
}

#[test]
fn empty_multi_select_values_are_ignored() {
    let (mut controller, url) = products_controller("");

    let request = controller.on_filter_change(FilterChange::MultiSelect(vec![
        String::new(),
        "Dior".to_string(),
        String::new(),
    ]));
    assert_eq!(controller.state().multi_select, vec!["Dior"]);
    assert_eq!(request.params.multi_select, vec!["Dior"]);

    controller.on_filter_change(FilterChange::MultiSelect(vec![String::new()]));
    assert!(controller.state().multi_select.is_empty());
    assert!(!url.query().contains("multiSelect"), "query was {}", url.query());
    assert!(controller.active_filters().is_empty());
}

#[test]
fn sort_toggles_between_directions_on_the_same_key() {
    let (mut controller, _url) = products_controller("");

    controller.toggle_sort("price");
    assert_eq!(controller.state().sort, SortConfig::new("price", SortDirection::Asc));
    controller.toggle_sort("price");
    assert_eq!(controller.state().sort, SortConfig::new("price", SortDirection::Desc));
    controller.toggle_sort("title");
    assert_eq!(controller.state().sort, SortConfig::new("title", SortDirection::Asc));

    let request = controller.on_sort_change(SortConfig::new("rating", SortDirection::Desc));
    assert_eq!(request.params.sort, "rating");
    assert_eq!(request.params.order, SortDirection::Desc);
}

#[test]
fn stale_fetch_results_are_discarded() {
    let (mut controller, _url) = products_controller("");

    let slow = controller.on_page_change(1);
    let fast = controller.on_page_change(2);

    assert_eq!(
        controller.complete_fetch(fast.generation, Ok(sample_page(&[21, 22], 30))),
        FetchOutcome::Applied
    );
    assert_eq!(
        controller.complete_fetch(slow.generation, Ok(sample_page(&[11, 12], 30))),
        FetchOutcome::Stale
    );
    assert_eq!(ids(controller.data()), vec![21, 22]);
    assert_eq!(controller.total_count(), 30);
    assert!(!controller.is_loading());
}

#[test]
fn loading_stays_on_until_latest_fetch_completes() {
    let (mut controller, _url) = products_controller("");

    let first = controller.start();
    let second = controller.on_page_change(1);
    controller.complete_fetch(first.generation, Ok(sample_page(&[1], 1)));

    assert!(controller.is_loading());
    controller.complete_fetch(second.generation, Ok(sample_page(&[2], 1)));
    assert!(!controller.is_loading());
}

#[test]
fn failed_fetch_clears_data_and_records_error() {
    let (mut controller, _url) = products_controller("");
    let first = controller.start();
    controller.complete_fetch(first.generation, Ok(sample_page(&[1, 2, 3], 3)));

    let second = controller.on_page_change(1);
    let outcome = controller.complete_fetch(
        second.generation,
        Err(FetchError::Message("connection refused".to_string())),
    );

    assert_eq!(outcome, FetchOutcome::Applied);
    assert!(controller.data().is_empty());
    assert_eq!(controller.total_count(), 0);
    assert!(!controller.is_loading());
    assert_eq!(controller.last_error(), Some("connection refused"));
}

#[test]
fn active_filters_describe_only_non_default_fields() {
    let (mut controller, _url) = products_controller("");
    assert!(controller.active_filters().is_empty());

    controller.on_filter_change(FilterChange::Search("lip".to_string()));
    controller.on_filter_change(FilterChange::ActiveTab("lowStock".to_string()));
    controller.on_filter_change(FilterChange::Dropdown("beauty".to_string()));
    controller.on_filter_change(FilterChange::MultiSelect(vec![
        "Dior".to_string(),
        "Essence".to_string(),
        "Dior".to_string(),
    ]));
    controller.on_filter_change(FilterChange::StartDate(Some(date("2024-01-01"))));

    let filters = controller.active_filters();
    let labels: Vec<&str> = filters.iter().map(|f| f.label.as_str()).collect();
    let ids: Vec<&str> = filters.iter().map(|f| f.id.as_str()).collect();

    assert_eq!(
        labels,
        vec![
            "Search: \"lip\"",
            "Tab: Low Stock",
            "From: 2024-01-01",
            "Category: Beauty",
            "Brands: Dior",
            "Brands: Essence",
        ]
    );
    assert_eq!(
        ids,
        vec![
            "search",
            "activeTab",
            "startDate",
            "dropdown",
            "multiSelect-Dior",
            "multiSelect-Essence",
        ]
    );

    controller.on_filter_change(FilterChange::ActiveTab("all".to_string()));
    assert!(controller
        .active_filters()
        .iter()
        .all(|f| f.kind != FilterKind::ActiveTab));
}

#[test]
fn clear_filters_resets_every_filter_in_one_commit() {
    let (mut controller, url) =
        products_controller("page=2&search=lip&activeTab=inStock&dropdown=beauty&multiSelect=Dior");
    let before = controller.generation();

    let request = controller.clear_filters();

    assert_eq!(request.generation, before + 1);
    assert_eq!(controller.state().search, "");
    assert_eq!(controller.search_input(), "");
    assert_eq!(controller.state().active_tab, "all");
    assert_eq!(controller.state().dropdown, "");
    assert!(controller.state().multi_select.is_empty());
    assert_eq!(controller.state().page, 0);
    assert_eq!(url.query(), "page=0&rowsPerPage=10&sortKey=id&sortDirection=asc&activeTab=all");
}

#[test]
fn direct_search_change_cancels_pending_keystrokes() {
    let (mut controller, _url) = products_controller("");
    let start = Instant::now();

    let ticket = controller.on_search_input("mas".to_string(), start);
    controller.on_filter_change(FilterChange::Search("mascara".to_string()));

    assert!(controller.settle_search(ticket, start + SEARCH_DEBOUNCE).is_none());
    assert_eq!(controller.state().search, "mascara");
}

#[tokio::test]
async fn controller_runs_requests_against_a_source() {
    let source = MemorySource::new(product_fixture(), product_bindings())
        .with_search_fields(["title", "brand"]);
    let (mut controller, _url) = products_controller("rowsPerPage=2");

    let request = controller.start();
    assert_eq!(controller.run(request, &source).await, FetchOutcome::Applied);
    assert_eq!(ids(controller.data()), vec![1, 2]);
    assert_eq!(controller.total_count(), 6);

    let request = controller.on_filter_change(FilterChange::ActiveTab("lowStock".to_string()));
    controller.run(request, &source).await;
    assert_eq!(ids(controller.data()), vec![2, 4]);
    assert_eq!(controller.total_count(), 3);

    let request = controller.on_filter_change(FilterChange::Search("GLAMOUR".to_string()));
    controller.run(request, &source).await;
    assert_eq!(ids(controller.data()), vec![2]);
    assert_eq!(controller.total_count(), 1);
}

// stores

#[test]
fn url_store_tracks_pushed_entries() {
    let mut store = UrlStateStore::new("?page=1");
    let defaults = TableDefaults::default();

    assert_eq!(store.read(&defaults).page, 1);

    let state = TableState {
        page: 2,
        ..TableState::default()
    };
    store.write(&state).expect("write should succeed");
    store.write(&state).expect("write should succeed");

    assert_eq!(store.href(), "?page=2&rowsPerPage=10");
    assert_eq!(store.history(), vec!["page=2&rowsPerPage=10".to_string()]);
}

#[test]
fn launch_query_seeds_only_the_launch_table() {
    let locations = LaunchTarget::parse("users?page=2&dropdown=male").locations();
    let query_for = |kind: PageKind| {
        locations
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, location)| location.query())
            .expect("every table should have a location")
    };

    assert_eq!(locations.len(), PageKind::ALL.len());
    assert_eq!(query_for(PageKind::Users), "page=2&dropdown=male");
    assert_eq!(query_for(PageKind::Products), "");
}

#[test]
fn remounted_table_resumes_from_its_location() {
    let (_, location) = LaunchTarget::parse("products?page=3")
        .locations()
        .into_iter()
        .find(|(kind, _)| *kind == PageKind::Products)
        .expect("products should have a location");
    let page = TablePage::for_kind(PageKind::Products);

    let mut first = TableStateController::new(
        page.filter_config.clone(),
        page.defaults.clone(),
        Box::new(location.clone()),
    );
    assert_eq!(first.state().page, 3);
    first.on_filter_change(FilterChange::Dropdown("beauty".to_string()));
    drop(first);

    let remounted = TableStateController::new(
        page.filter_config.clone(),
        page.defaults.clone(),
        Box::new(location),
    );
    assert_eq!(remounted.state().dropdown, "beauty");
    assert_eq!(remounted.state().page, 0);
}

// http source

#[test]
fn dummyjson_urls_switch_to_search_endpoint() {
    let source = DummyJsonSource::new("products", FieldBindings::default())
        .with_base_url("https://example.test/");

    let listing = source.request_url("").expect("url should build");
    let search = source.request_url("red lipstick").expect("url should build");

    assert_eq!(
        listing.as_str(),
        format!("https://example.test/products?limit={BULK_LIMIT}")
    );
    assert_eq!(
        search.as_str(),
        format!("https://example.test/products/search?q=red+lipstick&limit={BULK_LIMIT}")
    );
}

#[test]
fn records_are_read_from_resource_array() {
    let body = json!({"users": [{"id": 1}, {"id": 2}, 3], "total": 2});

    let records = records_from_body(&body, "users").expect("users array should parse");
    assert_eq!(ids(&records), vec![1, 2]);

    let err = records_from_body(&body, "products").expect_err("missing array should fail");
    assert!(err.to_string().contains("products"), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_api_reports_a_network_error() {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client should build");
    let source = DummyJsonSource::new("products", FieldBindings::default())
        .with_client(client)
        .with_base_url("http://127.0.0.1:1");

    let err = source
        .fetch(&TableState::default().fetch_params())
        .await
        .expect_err("nothing should listen on port 1");

    assert!(matches!(err, FetchError::Network(_)), "unexpected error: {err}");
}

// presentation

#[test]
fn cell_formats_render_presentation_values() {
    let row = record(json!({"title": "Mascara", "price": 9.5, "discountPercentage": 7.17, "stock": 34, "rating": 4.4, "thumbnail": "https://cdn/m.png"}));

    assert_eq!(
        CellFormat::Currency.render(row.get("price"), &row),
        CellContent::Text("$9.50".to_string())
    );
    assert_eq!(
        CellFormat::Percent.render(row.get("discountPercentage"), &row),
        CellContent::Text("7.17%".to_string())
    );
    assert_eq!(
        CellFormat::StockStatus.render(row.get("stock"), &row),
        CellContent::Badge {
            label: "Low Stock".to_string(),
            tone: BadgeTone::Warning,
        }
    );
    assert_eq!(
        CellFormat::Image {
            alt_fields: vec!["title"],
        }
        .render(row.get("thumbnail"), &row),
        CellContent::Image {
            src: "https://cdn/m.png".to_string(),
            alt: "Mascara".to_string(),
        }
    );
    assert_eq!(rating_stars(4.4), "★★★★☆");
    assert_eq!(
        CellFormat::Plain.render(row.get("missing"), &row),
        CellContent::Text(String::new())
    );
}

#[test]
fn pagination_label_and_last_page() {
    assert_eq!(pagination_label(1, 10, 194), "11–20 of 194");
    assert_eq!(pagination_label(19, 10, 194), "191–194 of 194");
    assert_eq!(pagination_label(0, 10, 0), "0–0 of 0");
    assert_eq!(last_page(10, 194), 19);
    assert_eq!(last_page(10, 0), 0);
}

#[test]
fn table_styles_keep_header_sticky_and_body_scrollable() {
    let header = table_header_cell_style(Align::Right);

    assert!(header.contains("position: sticky"));
    assert!(header.contains("text-align: right"));
    assert!(table_container_style().contains("overflow: auto"));
    assert!(table_container_style().contains("flex: 1"));
}

#[test]
fn product_defaults_resolve_first_tab_and_users_have_none() {
    let products = TablePage::for_kind(PageKind::Products);
    let users = TablePage::for_kind(PageKind::Users);

    let product_defaults = products.defaults.clone().resolved_for(&products.filter_config);
    let user_defaults = TableDefaults {
        active_tab: "all".to_string(),
        ..users.defaults.clone()
    }
    .resolved_for(&users.filter_config);

    assert_eq!(product_defaults.active_tab, "all");
    assert_eq!(user_defaults.active_tab, "");
    assert_eq!(product_filters().first_tab(), Some("all"));

    let tabs_without_default = FilterConfig {
        tabs_enabled: true,
        tab_options: vec![FilterOption::new("open", "Open")],
        ..FilterConfig::default()
    };
    assert_eq!(
        TableDefaults::default()
            .resolved_for(&tabs_without_default)
            .active_tab,
        "open"
    );
}

#[test]
fn launch_target_parses_path_and_query() {
    assert_eq!(
        LaunchTarget::parse("users?page=2&dropdown=male"),
        LaunchTarget {
            kind: PageKind::Users,
            query: Some("page=2&dropdown=male".to_string()),
        }
    );
    assert_eq!(
        LaunchTarget::parse("/products?"),
        LaunchTarget {
            kind: PageKind::Products,
            query: None,
        }
    );
    assert_eq!(LaunchTarget::parse("page=3").query.as_deref(), Some("page=3"));
    assert_eq!(LaunchTarget::parse("?page=3").kind, PageKind::Products);
    assert_eq!(LaunchTarget::parse("Users").kind, PageKind::Users);
}

#[test]
fn webview_data_dir_is_created_under_base() {
    let temp_dir = unique_test_dir("webview");

    let webview_dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert!(webview_dir.ends_with("webview2"));
    assert!(webview_dir.is_dir());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
