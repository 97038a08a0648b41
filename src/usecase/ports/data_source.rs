use async_trait::async_trait;

use crate::domain::entities::record::ResultPage;
use crate::domain::entities::table_state::FetchParams;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("{0}")]
    Message(String),
}

/// Where table rows come from. Implementations shape the page themselves.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, params: &FetchParams) -> Result<ResultPage, FetchError>;
}
