use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::table_state::TableState;
use crate::usecase::ports::state_store::{StateStore, StoreError};
use crate::usecase::services::url_codec::{decode, encode};

#[derive(Debug, Default)]
struct Location {
    query: String,
    history: Vec<String>,
}

/// In-memory address bar: the current query string plus every pushed entry.
///
/// Clones share the same location, so a view can keep a handle while the
/// controller owns the store.
#[derive(Debug, Clone, Default)]
pub struct UrlStateStore {
    location: Rc<RefCell<Location>>,
}

impl UrlStateStore {
    pub fn new(initial_query: impl Into<String>) -> Self {
        let query = initial_query.into();
        Self {
            location: Rc::new(RefCell::new(Location {
                query: query.trim_start_matches('?').to_string(),
                history: Vec::new(),
            })),
        }
    }

    pub fn query(&self) -> String {
        self.location.borrow().query.clone()
    }

    /// `?`-prefixed form, as it would appear after the path.
    pub fn href(&self) -> String {
        format!("?{}", self.query())
    }

    pub fn history(&self) -> Vec<String> {
        self.location.borrow().history.clone()
    }
}

/// Two handles are equal when they share one location.
impl PartialEq for UrlStateStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.location, &other.location)
    }
}

impl StateStore for UrlStateStore {
    fn read(&self, defaults: &TableDefaults) -> TableState {
        decode(&self.location.borrow().query, defaults)
    }

    fn write(&mut self, state: &TableState) -> Result<(), StoreError> {
        let query = encode(state);
        let mut location = self.location.borrow_mut();
        // Pushing an identical entry would only add a duplicate back-stop.
        if location.query != query || location.history.is_empty() {
            location.history.push(query.clone());
        }
        location.query = query;
        Ok(())
    }
}
