use chrono::{DateTime, Utc};

/// 分钟窗口计数器键前缀
const MINUTE_WINDOW_PREFIX: &str = "m:";

/// 天窗口计数器键前缀
const DAY_WINDOW_PREFIX: &str = "d:";

/// 分钟窗口长度（秒），同时作为分钟计数器的过期时间
pub const MINUTE_WINDOW_SECS: u64 = 60;

/// 天计数器的过期时间：两个整天，为跨天边界的时钟偏差留出余量
pub const DAY_WINDOW_TTL_SECS: u64 = 172_800;

/// 生成分钟窗口计数器键
///
/// 窗口编号为epoch秒数对窗口长度取整，跨过分钟边界时键整体切换，
/// 不存在计数的滚动或平滑。
pub fn minute_window_key(identity: &str, now: DateTime<Utc>) -> String {
    let minute = now.timestamp() / MINUTE_WINDOW_SECS as i64;
    format!("{}{}:{}", MINUTE_WINDOW_PREFIX, identity, minute)
}

/// 生成天窗口计数器键，窗口编号为UTC日历日期
pub fn day_window_key(identity: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}{}:{}",
        DAY_WINDOW_PREFIX,
        identity,
        now.format("%Y-%m-%d")
    )
}
