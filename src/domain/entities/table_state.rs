use chrono::NaiveDate;

use crate::domain::entities::record::{PageWindow, RecordFilter};

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Only the two canonical spellings are accepted.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn is_unsorted(&self) -> bool {
        self.key.is_empty()
    }
}

/// Everything the user controls about which slice of the data is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub page: usize,
    pub rows_per_page: usize,
    pub sort: SortConfig,
    pub search: String,
    pub active_tab: String,
    pub dropdown: String,
    pub multi_select: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            sort: SortConfig::default(),
            search: String::new(),
            active_tab: String::new(),
            dropdown: String::new(),
            multi_select: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }
}

impl TableState {
    pub fn fetch_params(&self) -> FetchParams {
        FetchParams {
            page: self.page,
            limit: self.rows_per_page,
            sort: self.sort.key.clone(),
            order: self.sort.direction,
            search: self.search.clone(),
            active_tab: self.active_tab.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            dropdown: self.dropdown.clone(),
            multi_select: self.multi_select.clone(),
        }
    }
}

/// Read-only projection of [`TableState`] handed to a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page: usize,
    pub limit: usize,
    pub sort: String,
    pub order: SortDirection,
    pub search: String,
    pub active_tab: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub dropdown: String,
    pub multi_select: Vec<String>,
}

impl FetchParams {
    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter {
            active_tab: self.active_tab.clone(),
            dropdown: self.dropdown.clone(),
            multi_select: self.multi_select.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn sort_config(&self) -> SortConfig {
        SortConfig::new(self.sort.clone(), self.order)
    }

    pub fn page_window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }
}
