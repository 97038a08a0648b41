use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::filter::{FilterConfig, FilterOption};
use crate::domain::entities::table_state::{SortConfig, SortDirection};
use crate::ui::columns::{Align, CellFormat, ColumnDescriptor};
use crate::ui::pages::table_page::{PageKind, TablePage};
use crate::usecase::services::transform::FieldBindings;

pub fn user_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").sortable(),
        ColumnDescriptor::new("image", "Avatar")
            .align(Align::Center)
            .format(CellFormat::Image {
                alt_fields: vec!["firstName", "lastName"],
            }),
        ColumnDescriptor::new("firstName", "First Name").sortable(),
        ColumnDescriptor::new("lastName", "Last Name").sortable(),
        ColumnDescriptor::new("birthDate", "DOB").sortable(),
        ColumnDescriptor::new("email", "Email").sortable(),
        ColumnDescriptor::new("age", "Age").sortable().align(Align::Right),
        ColumnDescriptor::new("gender", "Gender").align(Align::Center),
    ]
}

pub fn user_filters() -> FilterConfig {
    FilterConfig {
        search_enabled: true,
        search_placeholder: "Search users...".to_string(),
        date_range_enabled: true,
        dropdown_enabled: true,
        dropdown_label: "Gender".to_string(),
        dropdown_options: vec![
            FilterOption::new("", "All"),
            FilterOption::new("male", "Male"),
            FilterOption::new("female", "Female"),
        ],
        ..FilterConfig::default()
    }
}

pub fn user_bindings() -> FieldBindings {
    FieldBindings {
        tab: None,
        dropdown_field: Some("gender".to_string()),
        multi_select_field: None,
        date_field: Some("birthDate".to_string()),
    }
}

pub fn users_page() -> TablePage {
    TablePage {
        kind: PageKind::Users,
        title: "Users Directory",
        resource: "users",
        columns: user_columns(),
        filter_config: user_filters(),
        defaults: TableDefaults {
            sort: SortConfig::new("id", SortDirection::Asc),
            ..TableDefaults::default()
        },
        bindings: user_bindings(),
    }
}
