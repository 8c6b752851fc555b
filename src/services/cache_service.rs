use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::config::CacheBackend;
use crate::services::redis_service::RedisService;

pub const FEED_PAGE_TTL_SECS: u64 = 300;
pub const CATEGORY_PAGE_TTL_SECS: u64 = 300;
pub const POST_DETAIL_TTL_SECS: u64 = 600;

pub fn feed_page_key(page: u64) -> String {
    format!("posts_list_page_{}", page)
}

pub fn category_page_key(category_slug: &str, page: u64) -> String {
    format!("category_posts_{}_page_{}", category_slug, page)
}

pub fn post_detail_key(post_slug: &str) -> String {
    format!("post_detail_{}", post_slug)
}

/// In-process TTL store. Expired entries are dropped when touched.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, (Instant, String)>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((expires_at, json)) if *expires_at > Instant::now() => return Some(json.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Lazy cleanup
        self.entries.write().await.remove(key);
        None
    }

    async fn set(&self, key: &str, json: String, ttl: Duration) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, (expires_at, _)| *expires_at > now);
        entries.insert(key.to_string(), (now + ttl, json));
    }
}

/// Page cache in front of storage. Never authoritative: every failure is
/// logged and reported as a miss so callers fall through to the database.
#[derive(Clone)]
pub enum CacheService {
    Redis(RedisService),
    Memory(MemoryCache),
    Disabled,
}

impl CacheService {
    pub async fn from_backend(backend: &CacheBackend) -> Self {
        match backend {
            CacheBackend::Redis(url) => match RedisService::new(url) {
                Ok(redis) => {
                    if let Err(e) = redis.check_connection().await {
                        tracing::warn!("Redis unreachable at startup, reads will fall through to storage: {}", e);
                    }
                    CacheService::Redis(redis)
                }
                Err(e) => {
                    tracing::error!("{}; caching disabled", e);
                    CacheService::Disabled
                }
            },
            CacheBackend::Memory => CacheService::Memory(MemoryCache::new()),
            CacheBackend::Disabled => CacheService::Disabled,
        }
    }

    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        let value = match self {
            CacheService::Redis(redis) => match redis.get(key).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Cache read failed for {}: {}", key, e);
                    None
                }
            },
            CacheService::Memory(memory) => {
                let json = memory.get(key).await?;
                match serde_json::from_str(&json) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!("Cached value for {} is unreadable: {}", key, e);
                        None
                    }
                }
            }
            CacheService::Disabled => None,
        };

        if value.is_some() {
            tracing::debug!("Cache hit: {}", key);
        }
        value
    }

    pub async fn set<V: Serialize>(&self, key: &str, value: &V, ttl_secs: u64) {
        match self {
            CacheService::Redis(redis) => {
                if let Err(e) = redis.set(key, value, ttl_secs).await {
                    tracing::warn!("Cache write failed for {}: {}", key, e);
                }
            }
            CacheService::Memory(memory) => match serde_json::to_string(value) {
                Ok(json) => memory.set(key, json, Duration::from_secs(ttl_secs)).await,
                Err(e) => tracing::warn!("Could not serialize {} for caching: {}", key, e),
            },
            CacheService::Disabled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_cache_round_trips_until_expiry() {
        let cache = CacheService::Memory(MemoryCache::new());
        cache.set("k", &vec![1, 2, 3], 60).await;
        assert_eq!(cache.get::<Vec<i32>>("k").await, Some(vec![1, 2, 3]));

        cache.set("short", &"v", 0).await;
        assert_eq!(cache.get::<String>("short").await, None);
    }

    #[tokio::test]
    async fn disabled_cache_always_misses() {
        let cache = CacheService::Disabled;
        cache.set("k", &1, 60).await;
        assert_eq!(cache.get::<i32>("k").await, None);
    }

    #[tokio::test]
    async fn type_mismatch_is_a_miss() {
        let cache = CacheService::Memory(MemoryCache::new());
        cache.set("k", &"text", 60).await;
        assert_eq!(cache.get::<u64>("k").await, None);
    }

    #[test]
    fn keys_combine_route_parameters() {
        assert_eq!(feed_page_key(2), "posts_list_page_2");
        assert_eq!(category_page_key("travel", 3), "category_posts_travel_page_3");
        assert_eq!(post_detail_key("hello-world"), "post_detail_hello-world");
    }
}
