use std::sync::Arc;

use crate::domain::entities::defaults::TableDefaults;
use crate::domain::entities::filter::FilterConfig;
use crate::infra::http::dummyjson::DummyJsonSource;
use crate::ui::columns::ColumnDescriptor;
use crate::ui::pages::{products, users};
use crate::usecase::ports::data_source::DataSource;
use crate::usecase::services::transform::FieldBindings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Products,
    Users,
}

impl PageKind {
    pub const ALL: [PageKind; 2] = [PageKind::Products, PageKind::Users];

    pub fn slug(self) -> &'static str {
        match self {
            PageKind::Products => "products",
            PageKind::Users => "users",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(slug))
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            PageKind::Products => "Products",
            PageKind::Users => "Users",
        }
    }
}

/// Everything one table screen needs: columns, filters, defaults and where data comes from.
#[derive(Debug, Clone)]
pub struct TablePage {
    pub kind: PageKind,
    pub title: &'static str,
    pub resource: &'static str,
    pub columns: Vec<ColumnDescriptor>,
    pub filter_config: FilterConfig,
    pub defaults: TableDefaults,
    pub bindings: FieldBindings,
}

impl TablePage {
    pub fn for_kind(kind: PageKind) -> Self {
        match kind {
            PageKind::Products => products::products_page(),
            PageKind::Users => users::users_page(),
        }
    }

    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::new(DummyJsonSource::new(self.resource, self.bindings.clone()))
    }
}
