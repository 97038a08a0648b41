use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::entities::record::{Record, ResultPage};
use crate::domain::entities::table_state::FetchParams;
use crate::usecase::ports::data_source::{DataSource, FetchError};
use crate::usecase::services::transform::{transform, FieldBindings};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
pub const API_BASE_ENV: &str = "TABLE_EXPLORER_API_BASE";
/// The demo API is fetched in bulk; everything else happens client-side.
pub const BULK_LIMIT: usize = 1000;

pub fn api_base_url() -> String {
    std::env::var(API_BASE_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn network_error(err: reqwest::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

/// Pulls the record array stored under `resource` (e.g. `"products"`).
pub fn records_from_body(body: &Value, resource: &str) -> Result<Vec<Record>, FetchError> {
    let items = body
        .get(resource)
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Decode(format!("missing `{resource}` array")))?;

    Ok(items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect())
}

#[derive(Debug, Clone)]
pub struct DummyJsonSource {
    client: reqwest::Client,
    base_url: String,
    resource: String,
    bindings: FieldBindings,
}

impl DummyJsonSource {
    pub fn new(resource: impl Into<String>, bindings: FieldBindings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: api_base_url(),
            resource: resource.into(),
            bindings,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// `{base}/{resource}` for a full listing, `{base}/{resource}/search` when searching.
    pub fn request_url(&self, search: &str) -> Result<Url, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        let limit = BULK_LIMIT.to_string();
        let search = search.trim();
        let parsed = if search.is_empty() {
            Url::parse_with_params(
                &format!("{base}/{}", self.resource),
                &[("limit", limit.as_str())],
            )
        } else {
            Url::parse_with_params(
                &format!("{base}/{}/search", self.resource),
                &[("q", search), ("limit", limit.as_str())],
            )
        };
        parsed.map_err(|err| FetchError::Message(format!("invalid API url: {err}")))
    }
}

#[async_trait]
impl DataSource for DummyJsonSource {
    async fn fetch(&self, params: &FetchParams) -> Result<ResultPage, FetchError> {
        let url = self.request_url(&params.search)?;
        debug!(url = %url, "fetching records");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))?;
        let records = records_from_body(&body, &self.resource)?;

        Ok(transform(
            records,
            &params.record_filter(),
            &params.sort_config(),
            params.page_window(),
            &self.bindings,
        ))
    }
}
