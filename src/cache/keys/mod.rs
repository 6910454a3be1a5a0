/// 缓存键模块
/// 提供各种缓存键生成函数

// 限流窗口键模块
pub mod rate_limit_keys;

// 重新导出常用的键生成函数
pub use rate_limit_keys::{
    DAY_WINDOW_TTL_SECS, MINUTE_WINDOW_SECS, day_window_key, minute_window_key,
};
