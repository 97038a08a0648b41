use crate::domain::entities::filter::FilterConfig;
use crate::domain::entities::table_state::{SortConfig, TableState, DEFAULT_ROWS_PER_PAGE};

/// Caller defaults for every field that can be absent from the URL.
///
/// Decoding, controller start-up, filter removal and active-filter derivation
/// all go through this one type so they agree on what "default" means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefaults {
    pub rows_per_page: usize,
    pub sort: SortConfig,
    pub search: String,
    pub active_tab: String,
    pub dropdown: String,
    pub multi_select: Vec<String>,
}

impl Default for TableDefaults {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            sort: SortConfig::default(),
            search: String::new(),
            active_tab: String::new(),
            dropdown: String::new(),
            multi_select: Vec::new(),
        }
    }
}

impl TableDefaults {
    /// Fills the tab default with the first configured tab when tabs are on
    /// and no explicit default was given. Tabs off means no tab at all.
    pub fn resolved_for(mut self, config: &FilterConfig) -> Self {
        match config.first_tab() {
            Some(first) if self.active_tab.is_empty() => self.active_tab = first.to_string(),
            Some(_) => {}
            None => self.active_tab.clear(),
        }
        self.rows_per_page = self.rows_per_page.max(1);
        self
    }

    pub fn initial_state(&self) -> TableState {
        TableState {
            page: 0,
            rows_per_page: self.rows_per_page,
            sort: self.sort.clone(),
            search: self.search.clone(),
            active_tab: self.active_tab.clone(),
            dropdown: self.dropdown.clone(),
            multi_select: self.multi_select.clone(),
            start_date: None,
            end_date: None,
        }
    }
}
