use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::filter::{
    option_label, ActiveFilterDescriptor, FilterChange, FilterConfig, FilterKind,
};
use crate::domain::entities::record::{Record, ResultPage};
use crate::domain::entities::table_state::{FetchParams, SortConfig, SortDirection, TableState};
use crate::usecase::ports::data_source::{DataSource, FetchError};
use crate::usecase::ports::state_store::StateStore;
use crate::usecase::services::debounce::{DebounceTicket, Debouncer};
use crate::usecase::services::url_codec;

/// A fetch the caller should run; its result must be handed back with the
/// same generation through [`TableStateController::complete_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub params: FetchParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Stale,
}

pub struct TableStateController {
    config: FilterConfig,
    defaults: TableDefaults,
    store: Box<dyn StateStore>,
    state: TableState,
    search_input: String,
    debouncer: Debouncer,
    generation: u64,
    data: Vec<Record>,
    total_count: usize,
    loading: bool,
    last_error: Option<String>,
}

impl TableStateController {
    pub fn new(config: FilterConfig, defaults: TableDefaults, store: Box<dyn StateStore>) -> Self {
        let defaults = defaults.resolved_for(&config);
        let state = store.read(&defaults);
        Self {
            search_input: state.search.clone(),
            config,
            defaults,
            store,
            state,
            debouncer: Debouncer::default(),
            generation: 0,
            data: Vec::new(),
            total_count: 0,
            loading: false,
            last_error: None,
        }
    }

    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn defaults(&self) -> &TableDefaults {
        &self.defaults
    }

    pub fn filter_config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query_string(&self) -> String {
        url_codec::encode(&self.state)
    }

    fn commit(&mut self, reason: &'static str) -> FetchRequest {
        if let Err(err) = self.store.write(&self.state) {
            warn!(reason, error = %err, "failed to write table state");
        }
        self.generation += 1;
        self.loading = true;
        debug!(
            reason,
            generation = self.generation,
            query = %url_codec::encode(&self.state),
            "table state committed"
        );
        FetchRequest {
            generation: self.generation,
            params: self.state.fetch_params(),
        }
    }

    /// Initial fetch at mount; also normalizes the stored URL.
    pub fn start(&mut self) -> FetchRequest {
        self.commit("start")
    }

    pub fn on_filter_change(&mut self, change: FilterChange) -> FetchRequest {
        match change {
            FilterChange::Search(text) => {
                self.debouncer.cancel();
                self.search_input = text.clone();
                self.state.search = text;
            }
            FilterChange::ActiveTab(tab) => self.state.active_tab = tab,
            FilterChange::StartDate(date) => self.state.start_date = date,
            FilterChange::EndDate(date) => self.state.end_date = date,
            FilterChange::Dropdown(value) => self.state.dropdown = value,
            FilterChange::MultiSelect(values) => {
                let mut unique: Vec<String> = Vec::with_capacity(values.len());
                for value in values {
                    if !value.is_empty() && !unique.contains(&value) {
                        unique.push(value);
                    }
                }
                self.state.multi_select = unique;
            }
        }
        self.state.page = 0;
        self.commit("filter")
    }

    pub fn on_page_change(&mut self, page: usize) -> FetchRequest {
        self.state.page = page;
        self.commit("page")
    }

    pub fn on_rows_per_page_change(&mut self, rows_per_page: usize) -> FetchRequest {
        self.state.rows_per_page = rows_per_page.max(1);
        self.state.page = 0;
        self.commit("rows_per_page")
    }

    pub fn on_sort_change(&mut self, sort: SortConfig) -> FetchRequest {
        self.state.sort = sort;
        self.commit("sort")
    }

    /// Header click: ascending first, a second click on the same key flips to descending.
    pub fn toggle_sort(&mut self, key: &str) -> FetchRequest {
        let direction = if self.state.sort.key == key {
            self.state.sort.direction.flipped()
        } else {
            SortDirection::Asc
        };
        self.on_sort_change(SortConfig::new(key, direction))
    }

    fn reset_filter(&mut self, kind: FilterKind, value: &str) {
        match kind {
            FilterKind::Search => {
                self.debouncer.cancel();
                self.state.search = self.defaults.search.clone();
                self.search_input = self.state.search.clone();
            }
            FilterKind::ActiveTab => self.state.active_tab = self.defaults.active_tab.clone(),
            FilterKind::StartDate => self.state.start_date = None,
            FilterKind::EndDate => self.state.end_date = None,
            FilterKind::Dropdown => self.state.dropdown = self.defaults.dropdown.clone(),
            FilterKind::MultiSelect => self.state.multi_select.retain(|selected| selected != value),
        }
    }

    pub fn on_remove_filter(&mut self, kind: FilterKind, value: &str) -> FetchRequest {
        self.reset_filter(kind, value);
        self.state.page = 0;
        self.commit("remove_filter")
    }

    /// Resets every filter field at once; pagination size and sort are kept.
    pub fn clear_filters(&mut self) -> FetchRequest {
        for kind in [
            FilterKind::Search,
            FilterKind::ActiveTab,
            FilterKind::StartDate,
            FilterKind::EndDate,
            FilterKind::Dropdown,
        ] {
            self.reset_filter(kind, "");
        }
        self.state.multi_select = self.defaults.multi_select.clone();
        self.state.page = 0;
        self.commit("clear_filters")
    }

    /// Updates the visible input immediately; the committed search waits for quiet.
    pub fn on_search_input(&mut self, text: String, now: Instant) -> DebounceTicket {
        self.search_input = text;
        self.debouncer.arm(now)
    }

    pub fn settle_search(&mut self, ticket: DebounceTicket, now: Instant) -> Option<FetchRequest> {
        if !self.debouncer.fire(&ticket, now) {
            return None;
        }
        if self.search_input == self.state.search {
            return None;
        }
        self.state.search = self.search_input.clone();
        self.state.page = 0;
        Some(self.commit("search"))
    }

    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: Result<ResultPage, FetchError>,
    ) -> FetchOutcome {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                info!(
                    generation,
                    rows = page.data.len(),
                    total = page.total_count,
                    "table data loaded"
                );
                self.data = page.data;
                self.total_count = page.total_count;
                self.last_error = None;
            }
            Err(err) => {
                error!(generation, error = %err, "error fetching table data");
                self.data.clear();
                self.total_count = 0;
                self.last_error = Some(err.to_string());
            }
        }
        FetchOutcome::Applied
    }

    pub async fn run(&mut self, request: FetchRequest, source: &dyn DataSource) -> FetchOutcome {
        let result = source.fetch(&request.params).await;
        self.complete_fetch(request.generation, result)
    }

    pub fn active_filters(&self) -> Vec<ActiveFilterDescriptor> {
        let state = &self.state;
        let defaults = &self.defaults;
        let config = &self.config;
        let mut filters = Vec::new();

        if !state.search.is_empty() && state.search != defaults.search {
            filters.push(ActiveFilterDescriptor {
                id: FilterKind::Search.param_name().to_string(),
                kind: FilterKind::Search,
                value: state.search.clone(),
                label: format!("Search: \"{}\"", state.search),
            });
        }
        if !state.active_tab.is_empty() && state.active_tab != defaults.active_tab {
            filters.push(ActiveFilterDescriptor {
                id: FilterKind::ActiveTab.param_name().to_string(),
                kind: FilterKind::ActiveTab,
                value: state.active_tab.clone(),
                label: format!("Tab: {}", option_label(&config.tab_options, &state.active_tab)),
            });
        }
        for (kind, date, prefix) in [
            (FilterKind::StartDate, state.start_date, "From"),
            (FilterKind::EndDate, state.end_date, "To"),
        ] {
            if let Some(date) = date {
                let value = date.format("%Y-%m-%d").to_string();
                filters.push(ActiveFilterDescriptor {
                    id: kind.param_name().to_string(),
                    kind,
                    label: format!("{prefix}: {value}"),
                    value,
                });
            }
        }
        if !state.dropdown.is_empty() && state.dropdown != defaults.dropdown {
            filters.push(ActiveFilterDescriptor {
                id: FilterKind::Dropdown.param_name().to_string(),
                kind: FilterKind::Dropdown,
                value: state.dropdown.clone(),
                label: format!(
                    "{}: {}",
                    config.dropdown_label(),
                    option_label(&config.dropdown_options, &state.dropdown)
                ),
            });
        }
        if state.multi_select != defaults.multi_select {
            for value in &state.multi_select {
                filters.push(ActiveFilterDescriptor {
                    id: format!("{}-{value}", FilterKind::MultiSelect.param_name()),
                    kind: FilterKind::MultiSelect,
                    value: value.clone(),
                    label: format!(
                        "{}: {}",
                        config.multi_select_label(),
                        option_label(&config.multi_select_options, value)
                    ),
                });
            }
        }

        filters
    }
}
