use serde_json::Value;

use crate::domain::entities::record::{field_text, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Error,
}

/// What a cell shows once its formatter has run.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Badge { label: String, tone: BadgeTone },
    Image { src: String, alt: String },
    Rating { value: f64, stars: String },
}

/// Per-column formatter; kept apart from the state and transform logic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellFormat {
    #[default]
    Plain,
    Currency,
    Percent,
    Rating,
    StockStatus,
    Image {
        alt_fields: Vec<&'static str>,
    },
}

fn plain_text(value: Option<&Value>) -> String {
    value.and_then(field_text).unwrap_or_default()
}

pub fn rating_stars(value: f64) -> String {
    let filled = (value.round().max(0.0) as usize).min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn stock_status(stock: f64) -> (&'static str, BadgeTone) {
    if stock > 50.0 {
        ("In Stock", BadgeTone::Success)
    } else if stock > 0.0 {
        ("Low Stock", BadgeTone::Warning)
    } else {
        ("Out of Stock", BadgeTone::Error)
    }
}

impl CellFormat {
    pub fn render(&self, value: Option<&Value>, row: &Record) -> CellContent {
        let number = value.and_then(Value::as_f64);
        match (self, number) {
            (CellFormat::Currency, Some(amount)) => CellContent::Text(format!("${amount:.2}")),
            (CellFormat::Percent, Some(_)) => {
                CellContent::Text(format!("{}%", plain_text(value)))
            }
            (CellFormat::Rating, Some(rating)) => CellContent::Rating {
                value: rating,
                stars: rating_stars(rating),
            },
            (CellFormat::StockStatus, Some(stock)) => {
                let (label, tone) = stock_status(stock);
                CellContent::Badge {
                    label: label.to_string(),
                    tone,
                }
            }
            (CellFormat::Image { alt_fields }, _) => CellContent::Image {
                src: plain_text(value),
                alt: alt_fields
                    .iter()
                    .filter_map(|field| row.get(*field).and_then(field_text))
                    .collect::<Vec<_>>()
                    .join(" "),
            },
            _ => CellContent::Text(plain_text(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub align: Align,
    pub sortable: bool,
    pub format: CellFormat,
}

impl ColumnDescriptor {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            align: Align::Left,
            sortable: false,
            format: CellFormat::Plain,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    pub fn render(&self, row: &Record) -> CellContent {
        self.format.render(row.get(self.key), row)
    }
}

/// "11–20 of 194"; "0–0 of 0" when there is nothing to show.
pub fn pagination_label(page: usize, rows_per_page: usize, total: usize) -> String {
    let rows = rows_per_page.max(1);
    let start = page.saturating_mul(rows);
    if total == 0 || start >= total {
        return format!("0–0 of {total}");
    }
    let end = (start + rows).min(total);
    format!("{}–{} of {}", start + 1, end, total)
}

pub fn last_page(rows_per_page: usize, total: usize) -> usize {
    let rows = rows_per_page.max(1);
    total.saturating_sub(1) / rows
}
