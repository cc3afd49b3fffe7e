//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::PageCache;
use crate::config::CacheConfig;
use crate::db::InvoiceStore;
use crate::services::InvoiceService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the invoice store, the route page cache, and the mutation service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn InvoiceStore>,
    pages: PageCache,
    invoices: InvoiceService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mutation service revalidates pages in the same cache the read
    /// handlers fill.
    #[must_use]
    pub fn new(store: Arc<dyn InvoiceStore>, cache_config: CacheConfig) -> Self {
        let pages = PageCache::new(cache_config);
        let invoices = InvoiceService::new(store.clone(), Arc::new(pages.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                store,
                pages,
                invoices,
            }),
        }
    }

    /// Get a reference to the invoice store.
    #[must_use]
    pub fn store(&self) -> &dyn InvoiceStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the route page cache.
    #[must_use]
    pub fn pages(&self) -> &PageCache {
        &self.inner.pages
    }

    /// Get a reference to the invoice mutation service.
    #[must_use]
    pub fn invoices(&self) -> &InvoiceService {
        &self.inner.invoices
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pages", &self.inner.pages)
            .finish_non_exhaustive()
    }
}
