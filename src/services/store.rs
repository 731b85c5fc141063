// src/services/store.rs
use chrono::{DateTime, Duration, Utc};
use log::{error, info};
use reqwest::Client;
use tokio::sync::RwLock;

use crate::models::Sale;
use crate::services::sales::{self, SalesError};

struct CachedSales {
    fetched_at: DateTime<Utc>,
    sales: Vec<Sale>,
}

/// Memoized view of the upstream dataset. Every report request reads from
/// here; the upstream is only hit when the cache is older than the TTL, so
/// re-rendering with different filter criteria costs no network call.
pub struct SalesStore {
    client: Client,
    base_url: String,
    ttl: Duration,
    cache: RwLock<Option<CachedSales>>,
}

impl SalesStore {
    pub fn new(base_url: impl Into<String>, ttl_secs: i64) -> Result<Self, SalesError> {
        Ok(Self {
            client: sales::http_client()?,
            base_url: base_url.into(),
            ttl: Duration::seconds(ttl_secs),
            cache: RwLock::new(None),
        })
    }

    /// Current sales collection, served from cache when fresh enough.
    ///
    /// On a refetch failure the stale data is served and the error logged;
    /// the error only propagates when there is nothing cached at all.
    pub async fn get_sales(&self) -> Result<Vec<Sale>, SalesError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at > Utc::now() - self.ttl {
                    return Ok(cached.sales.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at > Utc::now() - self.ttl {
                return Ok(cached.sales.clone());
            }
        }

        info!("Sales cache empty or expired, fetching from upstream");
        match sales::fetch_sales(&self.client, &self.base_url).await {
            Ok(fresh) => {
                let out = fresh.clone();
                *cache = Some(CachedSales {
                    fetched_at: Utc::now(),
                    sales: fresh,
                });
                Ok(out)
            }
            Err(e) => match cache.as_ref() {
                Some(cached) => {
                    error!("Refetch failed, serving stale sales data: {}", e);
                    Ok(cached.sales.clone())
                }
                None => Err(e),
            },
        }
    }
}
