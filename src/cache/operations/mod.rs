/// 缓存操作
/// 提供计数器存储的功能实现

// 限流计数器存储
pub mod counter;

// 重新导出常用操作
pub use counter::*;
