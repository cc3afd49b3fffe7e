//! Route page cache.
//!
//! Read handlers store the data they render under their route path; writes
//! call [`RouteCache::revalidate_path`] so the next read rebuilds it.
//! Pages also expire after the configured TTL.
//!
//! Each path carries a generation that every revalidation bumps. A reader
//! takes the generation before it queries the store and hands it back when
//! storing; the page is dropped if a write revalidated the path in between.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::debug;

use tally_core::Invoice;

use crate::config::CacheConfig;

/// Receiver of "this route's data is stale" signals.
#[async_trait]
pub trait RouteCache: Send + Sync {
    /// Mark the cached data for `path` as stale.
    async fn revalidate_path(&self, path: &str);
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CachedPage {
    InvoiceList(Arc<Vec<Invoice>>),
}

/// In-memory page cache keyed by route path.
#[derive(Clone)]
pub struct PageCache {
    inner: Cache<String, CachedPage>,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl PageCache {
    /// Create a cache with the given capacity and TTL.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .build();

        Self {
            inner,
            generations: Arc::default(),
        }
    }

    /// Cached invoice listing for `path`, if present.
    pub async fn invoice_list(&self, path: &str) -> Option<Arc<Vec<Invoice>>> {
        match self.inner.get(path).await {
            Some(CachedPage::InvoiceList(invoices)) => {
                debug!(path, "page cache hit");
                Some(invoices)
            }
            None => None,
        }
    }

    /// Current generation of `path`. Take it before reading the store.
    pub async fn generation(&self, path: &str) -> u64 {
        self.generations
            .lock()
            .await
            .get(path)
            .copied()
            .unwrap_or_default()
    }

    /// Store an invoice listing read at `generation`.
    ///
    /// Returns `false` without caching when `path` was revalidated since.
    pub async fn store_invoice_list(
        &self,
        path: &str,
        generation: u64,
        invoices: Arc<Vec<Invoice>>,
    ) -> bool {
        // Held across the insert so a revalidation cannot slip in between.
        let generations = self.generations.lock().await;
        if generations.get(path).copied().unwrap_or_default() != generation {
            debug!(path, generation, "discarding page read before revalidation");
            return false;
        }

        self.inner
            .insert(path.to_owned(), CachedPage::InvoiceList(invoices))
            .await;
        true
    }

    /// Whether anything is cached for `path`.
    ///
    /// Public so the integration tests can observe revalidation through the
    /// router.
    pub async fn contains(&self, path: &str) -> bool {
        self.inner.get(path).await.is_some()
    }
}

impl std::fmt::Debug for PageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCache")
            .field("entries", &self.inner.entry_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RouteCache for PageCache {
    async fn revalidate_path(&self, path: &str) {
        debug!(path, "revalidating cached page");
        let mut generations = self.generations.lock().await;
        *generations.entry(path.to_owned()).or_default() += 1;
        self.inner.invalidate(path).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use tally_core::{Cents, CustomerId, InvoiceId, InvoiceStatus};

    use super::*;

    fn listing() -> Arc<Vec<Invoice>> {
        Arc::new(vec![Invoice {
            id: InvoiceId::new("inv_1"),
            customer_id: CustomerId::new("cust_1"),
            amount: Cents::from_raw(4550),
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        }])
    }

    #[tokio::test]
    async fn test_store_and_read_listing() {
        let cache = PageCache::new(CacheConfig::default());
        assert!(cache.invoice_list("/dashboard/invoices").await.is_none());

        assert!(
            cache
                .store_invoice_list("/dashboard/invoices", 0, listing())
                .await
        );

        let cached = cache.invoice_list("/dashboard/invoices").await.unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_revalidate_only_drops_that_path() {
        let cache = PageCache::new(CacheConfig::default());
        cache
            .store_invoice_list("/dashboard/invoices", 0, listing())
            .await;
        cache.store_invoice_list("/dashboard", 0, listing()).await;

        cache.revalidate_path("/dashboard/invoices").await;

        assert!(!cache.contains("/dashboard/invoices").await);
        assert!(cache.contains("/dashboard").await);
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = PageCache::new(CacheConfig {
            capacity: 10,
            ttl: Duration::from_millis(50),
        });
        cache
            .store_invoice_list("/dashboard/invoices", 0, listing())
            .await;

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(!cache.contains("/dashboard/invoices").await);
    }

    #[tokio::test]
    async fn test_listing_read_before_revalidation_is_not_cached() {
        let cache = PageCache::new(CacheConfig::default());
        let generation = cache.generation("/dashboard/invoices").await;

        // A write lands while the reader is still querying the store.
        cache.revalidate_path("/dashboard/invoices").await;

        assert!(
            !cache
                .store_invoice_list("/dashboard/invoices", generation, listing())
                .await
        );
        assert!(!cache.contains("/dashboard/invoices").await);

        let fresh = cache.generation("/dashboard/invoices").await;
        assert_eq!(fresh, generation + 1);
        assert!(
            cache
                .store_invoice_list("/dashboard/invoices", fresh, listing())
                .await
        );
        assert!(cache.contains("/dashboard/invoices").await);
    }

    #[tokio::test]
    async fn test_revalidating_other_path_keeps_generation() {
        let cache = PageCache::new(CacheConfig::default());
        let generation = cache.generation("/dashboard/invoices").await;

        cache.revalidate_path("/dashboard").await;

        assert!(
            cache
                .store_invoice_list("/dashboard/invoices", generation, listing())
                .await
        );
    }
}
