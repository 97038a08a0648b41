use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::table_state::TableState;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Message(String),
}

/// Read/write boundary for the shareable table state (the page URL).
pub trait StateStore {
    fn read(&self, defaults: &TableDefaults) -> TableState;
    fn write(&mut self, state: &TableState) -> Result<(), StoreError>;
}
