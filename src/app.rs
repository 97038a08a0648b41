use dioxus::prelude::*;

use crate::domain::entities::filter::{
    option_label, ActiveFilterDescriptor, FilterChange, FilterConfig, FilterOption,
};
use crate::domain::entities::record::{parse_calendar_date, Record};
use crate::domain::entities::table_state::{SortConfig, SortDirection, TableState};
use crate::infra::store::url_store::UrlStateStore;
use crate::ui::columns::{last_page, pagination_label, CellContent, ColumnDescriptor};
use crate::ui::pages::table_page::{PageKind, TablePage};
use crate::ui::state::table_handle::TableHandle;
use crate::ui::styles::{
    badge_style, chip_style, control_style, root_container_style, tab_style,
    table_cell_style, table_container_style, table_header_cell_style,
};
use crate::usecase::services::controller::TableStateController;
use crate::LaunchTarget;

pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

#[component]
fn DropdownSelect(
    label: String,
    options: Vec<FilterOption>,
    selected: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            style: "display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            select {
                style: "{control_style()}",
                value: "{selected}",
                onchange: move |event| on_select.call(event.value()),
                for opt in options.iter() {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == selected,
                        "{opt.label}"
                    }
                }
            }
        }
    }
}

#[component]
fn MultiSelectDropdown(
    label: String,
    options: Vec<FilterOption>,
    selected: Vec<String>,
    on_change: EventHandler<Vec<String>>,
) -> Element {
    let mut is_open = use_signal(|| false);
    let summary = if selected.is_empty() {
        "(none)".to_string()
    } else {
        selected
            .iter()
            .map(|value| option_label(&options, value).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "{control_style()} cursor: pointer; text-align: left;",
                onclick: move |event| {
                    event.stop_propagation();
                    let open = is_open();
                    is_open.set(!open);
                },
                "{summary}"
            }
            if is_open() {
                div {
                    style: "position: absolute; top: 100%; left: 0; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                    onclick: move |event| event.stop_propagation(),
                    {options.iter().map(|opt| {
                        let checked = selected.contains(&opt.value);
                        let value = opt.value.clone();
                        let current = selected.clone();
                        rsx!(
                            label {
                                key: "{opt.value}",
                                style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                                input {
                                    r#type: "checkbox",
                                    checked: checked,
                                    onclick: move |_| {
                                        let mut next = current.clone();
                                        if checked {
                                            next.retain(|existing| *existing != value);
                                        } else {
                                            next.push(value.clone());
                                        }
                                        on_change.call(next);
                                    }
                                }
                                span { "{opt.label}" }
                            }
                        )
                    })}
                }
            }
        }
    }
}

#[component]
fn TableFilters(
    handle: TableHandle,
    config: FilterConfig,
    state: TableState,
    search_input: String,
) -> Element {
    let start_value = state
        .start_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let end_value = state
        .end_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let search_placeholder = if config.search_placeholder.is_empty() {
        "Search".to_string()
    } else {
        config.search_placeholder.clone()
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; margin-bottom: 16px;",

            if config.tabs_enabled && !config.tab_options.is_empty() {
                div {
                    style: "display: flex; border-bottom: 1px solid #e0e0e0;",
                    {config.tab_options.iter().map(|tab| {
                        let value = tab.value.clone();
                        let active = state.active_tab == tab.value;
                        rsx!(
                            button {
                                key: "{tab.value}",
                                style: "{tab_style(active)}",
                                onclick: move |_| {
                                    let value = value.clone();
                                    handle.update(move |controller| {
                                        controller.on_filter_change(FilterChange::ActiveTab(value))
                                    });
                                },
                                "{tab.label}"
                            }
                        )
                    })}
                }
            }

            div {
                style: "display: flex; gap: 16px; flex-wrap: wrap; align-items: center;",

                if config.search_enabled {
                    input {
                        style: "{control_style()} min-width: 220px;",
                        placeholder: "{search_placeholder}",
                        value: "{search_input}",
                        oninput: move |event| handle.input_search(event.value()),
                    }
                }

                if config.dropdown_enabled && !config.dropdown_options.is_empty() {
                    DropdownSelect {
                        label: config.dropdown_label().to_string(),
                        options: config.dropdown_options.clone(),
                        selected: state.dropdown.clone(),
                        on_select: move |value: String| {
                            handle.update(move |controller| {
                                controller.on_filter_change(FilterChange::Dropdown(value))
                            });
                        },
                    }
                }

                if config.multi_select_enabled && !config.multi_select_options.is_empty() {
                    MultiSelectDropdown {
                        label: config.multi_select_label().to_string(),
                        options: config.multi_select_options.clone(),
                        selected: state.multi_select.clone(),
                        on_change: move |values: Vec<String>| {
                            handle.update(move |controller| {
                                controller.on_filter_change(FilterChange::MultiSelect(values))
                            });
                        },
                    }
                }

                if config.date_range_enabled {
                    label {
                        style: "display: inline-flex; align-items: center; gap: 6px;",
                        span { "From" }
                        input {
                            r#type: "date",
                            style: "{control_style()}",
                            value: "{start_value}",
                            oninput: move |event| {
                                let date = parse_calendar_date(&event.value());
                                handle.update(move |controller| {
                                    controller.on_filter_change(FilterChange::StartDate(date))
                                });
                            },
                        }
                    }
                    label {
                        style: "display: inline-flex; align-items: center; gap: 6px;",
                        span { "To" }
                        input {
                            r#type: "date",
                            style: "{control_style()}",
                            value: "{end_value}",
                            oninput: move |event| {
                                let date = parse_calendar_date(&event.value());
                                handle.update(move |controller| {
                                    controller.on_filter_change(FilterChange::EndDate(date))
                                });
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ActiveFilters(handle: TableHandle, filters: Vec<ActiveFilterDescriptor>) -> Element {
    if filters.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            style: "display: flex; gap: 8px; flex-wrap: wrap; align-items: center; margin-bottom: 16px;",
            span { style: "color: #666; font-size: 14px;", "Active filters:" }
            {filters.iter().map(|filter| {
                let kind = filter.kind;
                let value = filter.value.clone();
                rsx!(
                    span {
                        key: "{filter.id}",
                        style: "{chip_style(false)}",
                        "{filter.label}"
                        button {
                            style: "border: none; background: transparent; color: inherit; cursor: pointer; padding: 0 2px;",
                            title: "Remove filter",
                            onclick: move |_| {
                                let value = value.clone();
                                handle.update(move |controller| controller.on_remove_filter(kind, &value));
                            },
                            "×"
                        }
                    }
                )
            })}
            button {
                style: "{chip_style(true)}",
                onclick: move |_| handle.update(TableStateController::clear_filters),
                "Clear filters"
            }
        }
    }
}

fn render_cell(content: CellContent) -> Element {
    match content {
        CellContent::Text(text) => rsx! { "{text}" },
        CellContent::Badge { label, tone } => rsx! {
            span { style: "{badge_style(tone)}", "{label}" }
        },
        CellContent::Image { src, alt } => rsx! {
            img {
                src: "{src}",
                alt: "{alt}",
                style: "width: 48px; height: 48px; object-fit: contain; display: block; margin: 0 auto;",
            }
        },
        CellContent::Rating { value, stars } => rsx! {
            span { title: "{value}", style: "color: #faaf00; letter-spacing: 1px;", "{stars}" }
        },
    }
}

fn sort_indicator(sort: &SortConfig, key: &str) -> &'static str {
    if sort.key != key {
        return "";
    }
    match sort.direction {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

#[component]
fn DynamicTable(
    handle: TableHandle,
    columns: Vec<ColumnDescriptor>,
    data: Vec<Record>,
    loading: bool,
    page: usize,
    rows_per_page: usize,
    total_count: usize,
    sort: SortConfig,
) -> Element {
    let column_count = columns.len();
    let summary = pagination_label(page, rows_per_page, total_count);
    let final_page = last_page(rows_per_page, total_count);
    let has_previous = page > 0;
    let has_next = page < final_page;

    rsx! {
        div {
            style: "{table_container_style()}",
            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        {columns.iter().map(|column| {
                            let key = column.key;
                            let label = column.label;
                            let indicator = sort_indicator(&sort, key);
                            let header_style = table_header_cell_style(column.align);
                            if column.sortable {
                                rsx!(
                                    th {
                                        key: "{key}",
                                        style: "{header_style} cursor: pointer;",
                                        onclick: move |_| handle.update(move |controller| controller.toggle_sort(key)),
                                        "{label}{indicator}"
                                    }
                                )
                            } else {
                                rsx!(
                                    th { key: "{key}", style: "{header_style}", "{label}" }
                                )
                            }
                        })}
                    }
                }
                tbody {
                    if loading {
                        tr {
                            td { colspan: "{column_count}", style: "padding: 24px; text-align: center;", "Loading..." }
                        }
                    } else if data.is_empty() {
                        tr {
                            td { colspan: "{column_count}", style: "padding: 24px; text-align: center;", "No data available" }
                        }
                    } else {
                        for (row_idx, row) in data.iter().enumerate() {
                            tr {
                                key: "{row_idx}",
                                for column in columns.iter() {
                                    td {
                                        key: "{row_idx}-{column.key}",
                                        style: "{table_cell_style(column.align)}",
                                        {render_cell(column.render(row))}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        div {
            style: "display: flex; justify-content: flex-end; align-items: center; gap: 16px; padding: 8px 0;",
            label {
                style: "display: inline-flex; align-items: center; gap: 6px;",
                span { "Rows per page:" }
                select {
                    value: "{rows_per_page}",
                    onchange: move |event| {
                        if let Ok(rows) = event.value().parse::<usize>() {
                            handle.update(move |controller| controller.on_rows_per_page_change(rows));
                        }
                    },
                    for rows in ROWS_PER_PAGE_OPTIONS {
                        option { key: "{rows}", value: "{rows}", selected: rows == rows_per_page, "{rows}" }
                    }
                }
            }
            span { "{summary}" }
            button {
                disabled: !has_previous,
                onclick: move |_| handle.update(move |controller| controller.on_page_change(page.saturating_sub(1))),
                "‹"
            }
            button {
                disabled: !has_next,
                onclick: move |_| handle.update(move |controller| controller.on_page_change(page + 1)),
                "›"
            }
        }
    }
}

#[component]
fn DataTableContainer(kind: PageKind, location: UrlStateStore) -> Element {
    let page = use_hook(|| TablePage::for_kind(kind));
    let handle = TableHandle::new(page.clone(), location);
    use_hook(move || handle.update(TableStateController::start));

    let controller = handle.controller.read();
    let state = controller.state().clone();
    let search_input = controller.search_input().to_string();
    let filters = controller.active_filters();
    let data = controller.data().to_vec();
    let total_count = controller.total_count();
    let loading = controller.is_loading();
    let error = controller.last_error().map(str::to_string);
    let query = controller.query_string();
    drop(controller);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; flex: 1; min-height: 0;",
            h1 { style: "font-weight: 400; margin: 16px 0;", "{page.title}" }
            code {
                style: "display: block; color: #555; background: #f5f5f5; padding: 4px 8px; border-radius: 4px; margin-bottom: 12px; user-select: all;",
                "/{kind.slug()}?{query}"
            }

            TableFilters {
                handle,
                config: page.filter_config.clone(),
                state: state.clone(),
                search_input,
            }

            ActiveFilters { handle, filters }

            {error.map(|error| rsx!(
                p { style: "color: #d32f2f; margin: 0 0 8px 0;", "Failed to load data: {error}" }
            ))}

            DynamicTable {
                handle,
                columns: page.columns.clone(),
                data,
                loading,
                page: state.page,
                rows_per_page: state.rows_per_page,
                total_count,
                sort: state.sort.clone(),
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let launch = use_hook(LaunchTarget::from_args);
    let locations = use_hook(|| launch.locations());
    let mut active_page = use_signal(|| launch.kind);

    let current = active_page();
    let location = locations
        .iter()
        .find(|(kind, _)| *kind == current)
        .map(|(_, location)| location.clone())
        .unwrap_or_default();

    rsx! {
        div {
            style: "{root_container_style()}",
            nav {
                style: "display: flex; gap: 12px; align-items: center; padding: 8px 0; border-bottom: 1px solid #e0e0e0;",
                strong { "Table Explorer" }
                for kind in PageKind::ALL {
                    button {
                        key: "{kind.slug()}",
                        style: "{tab_style(kind == current)}",
                        onclick: move |_| active_page.set(kind),
                        "{kind.nav_label()}"
                    }
                }
            }
            DataTableContainer { key: "{current.slug()}", kind: current, location }
        }
    }
}
