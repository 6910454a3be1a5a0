// 缓存模块
// 包含限流计数器的键生成和存储操作逻辑

pub mod keys;
pub mod operations;

// 重新导出常用类型和函数，方便其他模块使用
pub use operations::counter::{CounterError, CounterStore, MemoryCounterStore, RedisCounterStore};
