use std::sync::Arc;

use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::filter::{FilterConfig, FilterOption};
use crate::domain::entities::table_state::{SortConfig, SortDirection};
use crate::ui::columns::{Align, CellFormat, ColumnDescriptor};
use crate::ui::pages::table_page::{PageKind, TablePage};
use crate::usecase::services::transform::{FieldBindings, StockTabs};

pub fn product_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").sortable(),
        ColumnDescriptor::new("thumbnail", "Image")
            .align(Align::Center)
            .format(CellFormat::Image {
                alt_fields: vec!["title"],
            }),
        ColumnDescriptor::new("title", "Name").sortable(),
        ColumnDescriptor::new("brand", "Brand").sortable(),
        ColumnDescriptor::new("category", "Category").sortable(),
        ColumnDescriptor::new("price", "Price")
            .sortable()
            .align(Align::Right)
            .format(CellFormat::Currency),
        ColumnDescriptor::new("discountPercentage", "Discount")
            .sortable()
            .align(Align::Right)
            .format(CellFormat::Percent),
        ColumnDescriptor::new("rating", "Rating")
            .sortable()
            .align(Align::Center)
            .format(CellFormat::Rating),
        ColumnDescriptor::new("stock", "Stock")
            .sortable()
            .align(Align::Right)
            .format(CellFormat::StockStatus),
    ]
}

pub fn product_filters() -> FilterConfig {
    FilterConfig {
        search_enabled: true,
        search_placeholder: "Search products...".to_string(),
        tabs_enabled: true,
        tab_options: vec![
            FilterOption::new("all", "All Products"),
            FilterOption::new("inStock", "In Stock"),
            FilterOption::new("lowStock", "Low Stock"),
            FilterOption::new("outOfStock", "Out of Stock"),
        ],
        dropdown_enabled: true,
        dropdown_label: "Category".to_string(),
        dropdown_options: vec![
            FilterOption::new("", "All Categories"),
            FilterOption::new("beauty", "Beauty"),
            FilterOption::new("fragrances", "Fragrances"),
            FilterOption::new("groceries", "Groceries"),
        ],
        multi_select_enabled: true,
        multi_select_label: "Brands".to_string(),
        multi_select_options: ["Essence", "Glamour Beauty", "Annibale Colombo", "Dior"]
            .into_iter()
            .map(|brand| FilterOption::new(brand, brand))
            .collect(),
        date_range_enabled: false,
    }
}

pub fn product_bindings() -> FieldBindings {
    FieldBindings {
        tab: Some(Arc::new(StockTabs::new("stock"))),
        dropdown_field: Some("category".to_string()),
        multi_select_field: Some("brand".to_string()),
        date_field: None,
    }
}

pub fn products_page() -> TablePage {
    TablePage {
        kind: PageKind::Products,
        title: "Products Catalog",
        resource: "products",
        columns: product_columns(),
        filter_config: product_filters(),
        defaults: TableDefaults {
            sort: SortConfig::new("id", SortDirection::Asc),
            active_tab: "all".to_string(),
            ..TableDefaults::default()
        },
        bindings: product_bindings(),
    }
}
