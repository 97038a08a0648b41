use async_trait::async_trait;

use crate::domain::entities::record::{field_text, Record, ResultPage};
use crate::domain::entities::table_state::FetchParams;
use crate::usecase::ports::data_source::{DataSource, FetchError};
use crate::usecase::services::transform::{transform, FieldBindings};

/// Serves a fixed record collection through the same pipeline as the HTTP source.
///
/// Free-text search matches a case-insensitive substring of any of the
/// `search_fields`, standing in for the remote search endpoint.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Record>,
    bindings: FieldBindings,
    search_fields: Vec<String>,
}

impl MemorySource {
    pub fn new(records: Vec<Record>, bindings: FieldBindings) -> Self {
        Self {
            records,
            bindings,
            search_fields: Vec::new(),
        }
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    fn matches_search(&self, record: &Record, needle: &str) -> bool {
        self.search_fields.iter().any(|field| {
            record
                .get(field)
                .and_then(field_text)
                .map(|text| text.to_lowercase().contains(needle))
                .unwrap_or(false)
        })
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, params: &FetchParams) -> Result<ResultPage, FetchError> {
        let needle = params.search.trim().to_lowercase();
        let records: Vec<Record> = if needle.is_empty() {
            self.records.clone()
        } else {
            self.records
                .iter()
                .filter(|record| self.matches_search(record, &needle))
                .cloned()
                .collect()
        };

        Ok(transform(
            records,
            &params.record_filter(),
            &params.sort_config(),
            params.page_window(),
            &self.bindings,
        ))
    }
}
