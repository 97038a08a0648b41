use std::sync::Arc;
use std::time::Instant;

use dioxus::core::Task;
use dioxus::prelude::*;

use crate::infra::store::url_store::UrlStateStore;
use crate::platform::desktop::timer;
use crate::ui::pages::table_page::TablePage;
use crate::usecase::ports::data_source::DataSource;
use crate::usecase::services::controller::{FetchRequest, TableStateController};

/// Signals behind one table screen. Copyable, so event handlers can capture it freely.
#[derive(Clone, Copy, PartialEq)]
pub struct TableHandle {
    pub controller: Signal<TableStateController>,
    source: Signal<Arc<dyn DataSource>>,
    pending_search: Signal<Option<Task>>,
}

impl TableHandle {
    pub fn new(page: TablePage, location: UrlStateStore) -> Self {
        let source_page = page.clone();
        Self {
            source: use_signal(move || source_page.source()),
            controller: use_signal(move || {
                TableStateController::new(
                    page.filter_config.clone(),
                    page.defaults.clone(),
                    Box::new(location),
                )
            }),
            pending_search: use_signal(|| None::<Task>),
        }
    }

    /// Runs the fetch in the background; the controller drops it if a newer one was issued.
    pub fn dispatch(self, request: FetchRequest) {
        let source = self.source.read().clone();
        let mut controller = self.controller;
        spawn(async move {
            let result = source.fetch(&request.params).await;
            controller.write().complete_fetch(request.generation, result);
        });
    }

    pub fn update<F>(self, intent: F)
    where
        F: FnOnce(&mut TableStateController) -> FetchRequest,
    {
        let mut controller = self.controller;
        let request = {
            let mut controller = controller.write();
            intent(&mut controller)
        };
        self.dispatch(request);
    }

    /// Keystroke: show it now, commit it after the quiet period.
    pub fn input_search(self, text: String) {
        let mut controller = self.controller;
        let mut pending_search = self.pending_search;
        if let Some(task) = pending_search.write().take() {
            task.cancel();
        }

        let ticket = controller.write().on_search_input(text, Instant::now());
        let task = spawn(async move {
            timer::sleep(ticket.delay()).await;
            let request = controller.write().settle_search(ticket, Instant::now());
            if let Some(request) = request {
                self.dispatch(request);
            }
        });
        pending_search.set(Some(task));
    }
}
