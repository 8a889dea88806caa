use crate::models::MatchVolunteersResponse;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Match results cached per event
///
/// The in-process tier always exists. The Redis tier is shared between
/// instances and is left out when Redis could not be reached at startup.
pub struct MatchCache {
    local: moka::future::Cache<String, Arc<MatchVolunteersResponse>>,
    redis: Option<Mutex<ConnectionManager>>,
    ttl: Duration,
}

impl MatchCache {
    /// Cache kept in this process only
    pub fn in_memory(capacity: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);
        let local = moka::future::CacheBuilder::new(capacity)
            .time_to_live(ttl)
            .build();

        Self {
            local,
            redis: None,
            ttl,
        }
    }

    /// Cache backed by Redis, falling back to in-memory when unreachable
    pub async fn connect(redis_url: &str, capacity: u64, ttl_secs: u64) -> Self {
        let mut cache = Self::in_memory(capacity, ttl_secs);

        match open_redis(redis_url).await {
            Ok(conn) => cache.redis = Some(Mutex::new(conn)),
            Err(e) => tracing::warn!("Redis unavailable, caching matches in memory only: {}", e),
        }

        cache
    }

    /// Whether results are shared through Redis
    pub fn is_shared(&self) -> bool {
        self.redis.is_some()
    }

    /// Cached matches for an event, if any
    pub async fn get(&self, event_id: &str) -> Result<Option<MatchVolunteersResponse>, CacheError> {
        let key = cache_key(event_id);

        if let Some(hit) = self.local.get(&key).await {
            tracing::trace!("Local cache hit: {}", key);
            return Ok(Some((*hit).clone()));
        }

        let Some(redis) = &self.redis else {
            return Ok(None);
        };

        let stored: Option<String> = {
            let mut conn = redis.lock().await;
            redis::cmd("GET").arg(&key).query_async(&mut *conn).await?
        };

        match stored {
            Some(json) => {
                tracing::trace!("Redis cache hit: {}", key);
                let response: MatchVolunteersResponse = serde_json::from_str(&json)?;
                self.local.insert(key, Arc::new(response.clone())).await;
                Ok(Some(response))
            }
            None => Ok(None),
        }
    }

    /// Store the matches of the event the response describes
    pub async fn put(&self, response: &MatchVolunteersResponse) -> Result<(), CacheError> {
        let key = cache_key(&response.event_id);

        self.local.insert(key.clone(), Arc::new(response.clone())).await;

        if let Some(redis) = &self.redis {
            let json = serde_json::to_string(response)?;
            let mut conn = redis.lock().await;
            redis::cmd("SET")
                .arg(&key)
                .arg(json)
                .arg("EX")
                .arg(self.ttl.as_secs())
                .query_async::<()>(&mut *conn)
                .await?;
        }

        Ok(())
    }

    /// Drop an event's cached matches; true when something was evicted
    pub async fn invalidate(&self, event_id: &str) -> Result<bool, CacheError> {
        let key = cache_key(event_id);
        let mut evicted = self.local.remove(&key).await.is_some();

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let removed: i64 = redis::cmd("DEL").arg(&key).query_async(&mut *conn).await?;
            evicted |= removed > 0;
        }

        Ok(evicted)
    }
}

async fn open_redis(redis_url: &str) -> Result<ConnectionManager, CacheError> {
    let client = redis::Client::open(redis_url)?;
    Ok(ConnectionManager::new(client).await?)
}

fn cache_key(event_id: &str) -> String {
    format!("matches:{}", event_id)
}
