use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::keys::{
    DAY_WINDOW_TTL_SECS, MINUTE_WINDOW_SECS, day_window_key, minute_window_key,
};
use crate::cache::operations::counter::{CounterError, CounterStore};

/// 限流窗口类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitWindow {
    Minute,
    Day,
}

/// 限流判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Throttled { window: RateLimitWindow, limit: u32 },
}

/// 双窗口限流器
///
/// 对每个identity独立维护分钟和天两个计数窗口，计数全部存放在注入的
/// CounterStore里，进程内不持有任何跨请求状态。
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    per_minute_limit: u32,
    per_day_limit: u32,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CounterStore>, per_minute_limit: u32, per_day_limit: u32) -> Self {
        Self {
            store,
            per_minute_limit,
            per_day_limit,
        }
    }

    /// 为identity记一次调用并判定是否放行
    ///
    /// 计数先于判定发生：被拒绝的请求同样消耗配额，后续环节失败也不回滚。
    /// 存储不可用时返回错误，由调用方拒绝请求，绝不静默放行。
    pub async fn check(&self, identity: &str) -> Result<RateLimitDecision, CounterError> {
        self.check_at(identity, Utc::now()).await
    }

    async fn check_at(
        &self,
        identity: &str,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, CounterError> {
        // 分钟窗口：首次自增时立刻挂上窗口长度的过期时间
        let minute_key = minute_window_key(identity, now);
        let used = self.store.increment(&minute_key).await?;
        if used == 1 {
            self.store.expire(&minute_key, MINUTE_WINDOW_SECS).await?;
        }
        if used > i64::from(self.per_minute_limit) {
            // 分钟窗口已经拒绝，不再触碰天窗口的计数
            return Ok(RateLimitDecision::Throttled {
                window: RateLimitWindow::Minute,
                limit: self.per_minute_limit,
            });
        }

        // 天窗口
        let day_key = day_window_key(identity, now);
        let used = self.store.increment(&day_key).await?;
        if used == 1 {
            self.store.expire(&day_key, DAY_WINDOW_TTL_SECS).await?;
        }
        if used > i64::from(self.per_day_limit) {
            return Ok(RateLimitDecision::Throttled {
                window: RateLimitWindow::Day,
                limit: self.per_day_limit,
            });
        }

        Ok(RateLimitDecision::Allowed)
    }
}
