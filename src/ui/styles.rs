use crate::ui::columns::{Align, BadgeTone};

pub fn root_container_style() -> &'static str {
    "font-family: 'Roboto', 'Noto Sans', sans-serif; padding: 12px 24px; background: #fff; height: 100vh; display: flex; flex-direction: column; overflow: hidden; box-sizing: border-box;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #e0e0e0; border-radius: 4px; box-shadow: 0 1px 3px rgba(0,0,0,0.12);"
}

pub fn table_header_cell_style(align: Align) -> String {
    format!(
        "position: sticky; top: 0; z-index: 2; background: #fafafa; font-weight: bold; padding: 10px 12px; border-bottom: 1px solid #e0e0e0; text-align: {}; white-space: nowrap;",
        align.as_css()
    )
}

pub fn table_cell_style(align: Align) -> String {
    format!(
        "padding: 8px 12px; border-bottom: 1px solid #eee; text-align: {};",
        align.as_css()
    )
}

pub fn tab_style(active: bool) -> &'static str {
    if active {
        "padding: 8px 16px; border: none; border-bottom: 2px solid #1976d2; background: transparent; color: #1976d2; cursor: pointer; font-weight: 600;"
    } else {
        "padding: 8px 16px; border: none; border-bottom: 2px solid transparent; background: transparent; color: #555; cursor: pointer;"
    }
}

pub fn badge_style(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Success => "display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 12px; background: #2e7d32; color: #fff;",
        BadgeTone::Warning => "display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 12px; background: #ed6c02; color: #fff;",
        BadgeTone::Error => "display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 12px; background: #d32f2f; color: #fff;",
    }
}

pub fn chip_style(danger: bool) -> &'static str {
    if danger {
        "display: inline-flex; align-items: center; gap: 4px; padding: 2px 10px; border: 1px solid #d32f2f; color: #d32f2f; border-radius: 16px; font-size: 13px; background: #fff; cursor: pointer;"
    } else {
        "display: inline-flex; align-items: center; gap: 4px; padding: 2px 10px; border: 1px solid #1976d2; color: #1976d2; border-radius: 16px; font-size: 13px; background: #fff;"
    }
}

pub fn control_style() -> &'static str {
    "border: 1px solid #bbb; background: #fff; padding: 6px 10px; border-radius: 4px; min-width: 150px;"
}
