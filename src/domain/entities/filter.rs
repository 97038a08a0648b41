use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Search,
    ActiveTab,
    StartDate,
    EndDate,
    Dropdown,
    MultiSelect,
}

impl FilterKind {
    /// Name used as the URL parameter and as the prefix of descriptor ids.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterKind::Search => "search",
            FilterKind::ActiveTab => "activeTab",
            FilterKind::StartDate => "startDate",
            FilterKind::EndDate => "endDate",
            FilterKind::Dropdown => "dropdown",
            FilterKind::MultiSelect => "multiSelect",
        }
    }
}

/// A single filter edit coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    ActiveTab(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Dropdown(String),
    MultiSelect(Vec<String>),
}

impl FilterChange {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterChange::Search(_) => FilterKind::Search,
            FilterChange::ActiveTab(_) => FilterKind::ActiveTab,
            FilterChange::StartDate(_) => FilterKind::StartDate,
            FilterChange::EndDate(_) => FilterKind::EndDate,
            FilterChange::Dropdown(_) => FilterKind::Dropdown,
            FilterChange::MultiSelect(_) => FilterKind::MultiSelect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn option_label<'a>(options: &'a [FilterOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label.as_str())
        .unwrap_or(value)
}

/// Which filter controls a table offers, and their options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub search_enabled: bool,
    pub search_placeholder: String,
    pub tabs_enabled: bool,
    pub tab_options: Vec<FilterOption>,
    pub dropdown_enabled: bool,
    pub dropdown_label: String,
    pub dropdown_options: Vec<FilterOption>,
    pub multi_select_enabled: bool,
    pub multi_select_label: String,
    pub multi_select_options: Vec<FilterOption>,
    pub date_range_enabled: bool,
}

impl FilterConfig {
    pub fn first_tab(&self) -> Option<&str> {
        if !self.tabs_enabled {
            return None;
        }
        self.tab_options.first().map(|option| option.value.as_str())
    }

    pub fn dropdown_label(&self) -> &str {
        if self.dropdown_label.is_empty() {
            "Filter"
        } else {
            &self.dropdown_label
        }
    }

    pub fn multi_select_label(&self) -> &str {
        if self.multi_select_label.is_empty() {
            "Multi Select"
        } else {
            &self.multi_select_label
        }
    }
}

/// Display summary of one applied filter; derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilterDescriptor {
    pub id: String,
    pub kind: FilterKind,
    pub value: String,
    pub label: String,
}
