use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

pub mod app;

pub mod domain {
    pub mod entities {
        pub mod defaults;
        pub mod filter;
        pub mod record;
        pub mod table_state;
    }
}

pub mod usecase {
    pub mod ports {
        pub mod data_source;
        pub mod state_store;
    }
    pub mod services {
        pub mod controller;
        pub mod debounce;
        pub mod transform;
        pub mod url_codec;
    }
}

pub mod infra {
    pub mod http {
        pub mod dummyjson;
    }
    pub mod memory {
        pub mod source;
    }
    pub mod store {
        pub mod url_store;
    }
}

pub mod platform {
    pub mod desktop {
        pub mod timer;
    }
}

pub mod ui {
    pub mod columns;
    pub mod styles;
    pub mod pages {
        pub mod products;
        pub mod table_page;
        pub mod users;
    }
    pub mod state {
        pub mod table_handle;
    }
}

#[cfg(test)]
mod tests;

use crate::infra::store::url_store::UrlStateStore;
use crate::ui::pages::table_page::PageKind;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "TableExplorer", "table-explorer")
        .ok_or_else(|| anyhow!("failed to resolve project directories"))
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_dir).with_context(|| {
        format!(
            "failed to create webview data directory: {}",
            webview_dir.display()
        )
    })?;
    Ok(webview_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(&default_data_dir()?)
}

/// Startup location: which table to open and the query string to seed it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub kind: PageKind,
    pub query: Option<String>,
}

impl Default for LaunchTarget {
    fn default() -> Self {
        Self {
            kind: PageKind::Products,
            query: None,
        }
    }
}

impl LaunchTarget {
    /// Accepts `users?page=2`, `/products?sortKey=price`, or a bare `?page=1`.
    pub fn parse(arg: &str) -> Self {
        let arg = arg.trim();
        let (path, query) = match arg.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None if arg.contains('=') => ("", Some(arg)),
            None => (arg, None),
        };
        let path = path.trim_matches('/');
        let kind = PageKind::from_slug(path).unwrap_or(PageKind::Products);
        Self {
            kind,
            query: query
                .map(|query| query.trim().to_string())
                .filter(|query| !query.is_empty()),
        }
    }

    pub fn from_args() -> Self {
        std::env::args()
            .nth(1)
            .map(|arg| Self::parse(&arg))
            .unwrap_or_default()
    }

    /// One location per table for the whole session. Only the launch table
    /// starts from the given query; the others start empty.
    pub fn locations(&self) -> Vec<(PageKind, UrlStateStore)> {
        PageKind::ALL
            .into_iter()
            .map(|kind| {
                let query = match &self.query {
                    Some(query) if kind == self.kind => query.clone(),
                    _ => String::new(),
                };
                (kind, UrlStateStore::new(query))
            })
            .collect()
    }
}
