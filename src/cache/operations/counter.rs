use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use thiserror::Error;

/// 计数器存储错误
#[derive(Debug, Error)]
pub enum CounterError {
    #[error("redis命令执行失败: {0}")]
    Redis(#[from] redis::RedisError),
}

/// 原子计数器存储接口
///
/// 限流逻辑依赖的唯一同步原语：increment必须对并发调用保证
/// 自增与读取的原子性，expire为键挂上过期时间。任何替代实现
/// 都必须遵守同一契约。
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// 原子自增并返回自增后的值
    async fn increment(&self, key: &str) -> Result<i64, CounterError>;

    /// 设置键的过期时间
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), CounterError>;
}

/// 基于Redis INCR/EXPIRE的计数器存储
pub struct RedisCounterStore {
    redis: Arc<RedisClient>,
}

impl RedisCounterStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str) -> Result<i64, CounterError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let count: i64 = conn.incr(key, 1).await?;
        Ok(count)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), CounterError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.expire(key, ttl_secs as i64).await?;
        Ok(())
    }
}

struct MemoryCounter {
    value: i64,
    expires_at: Option<Instant>,
}

/// 进程内计数器存储，过期时间在读取时惰性判断
///
/// 供测试和无Redis的本地运行使用，可观察行为与Redis实现一致。
#[derive(Default)]
pub struct MemoryCounterStore {
    counters: Mutex<HashMap<String, MemoryCounter>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取当前计数，键不存在或已过期时返回None
    pub fn current(&self, key: &str) -> Option<i64> {
        let counters = self.counters.lock().unwrap();
        counters
            .get(key)
            .filter(|c| c.expires_at.is_none_or(|at| at > Instant::now()))
            .map(|c| c.value)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str) -> Result<i64, CounterError> {
        let mut counters = self.counters.lock().unwrap();
        let now = Instant::now();
        let counter = counters.entry(key.to_string()).or_insert(MemoryCounter {
            value: 0,
            expires_at: None,
        });
        // 已过期的计数按新窗口处理，从零重新累加
        if counter.expires_at.is_some_and(|at| at <= now) {
            counter.value = 0;
            counter.expires_at = None;
        }
        counter.value += 1;
        Ok(counter.value)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), CounterError> {
        let mut counters = self.counters.lock().unwrap();
        if let Some(counter) = counters.get_mut(key) {
            counter.expires_at = Some(Instant::now() + Duration::from_secs(ttl_secs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn increment_returns_new_value_per_key() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.increment("m:alice:1").await.unwrap(), 1);
        assert_eq!(store.increment("m:alice:1").await.unwrap(), 2);
        assert_eq!(store.increment("m:bob:1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn expired_counter_restarts_from_zero() {
        let store = MemoryCounterStore::new();
        store.increment("k").await.unwrap();
        store.increment("k").await.unwrap();
        // ttl为0的键在下一次自增时视作新窗口
        store.expire("k", 0).await.unwrap();
        assert_eq!(store.increment("k").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn current_reads_live_counter() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.current("k"), None);
        store.increment("k").await.unwrap();
        store.expire("k", 60).await.unwrap();
        assert_eq!(store.current("k"), Some(1));
    }

    #[tokio::test]
    async fn expire_on_missing_key_is_noop() {
        let store = MemoryCounterStore::new();
        store.expire("missing", 60).await.unwrap();
        assert_eq!(store.current("missing"), None);
    }
}
