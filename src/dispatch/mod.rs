// 出站分发模块
// 包含分片选择、出站载荷构建与failover投递逻辑

pub mod dispatcher;
pub mod payload;
pub mod shard;

// 重新导出常用类型和函数，方便其他模块使用
pub use dispatcher::{
    DeliveryOutcome, DispatchOutcome, HttpWebhookTransport, WebhookDispatcher, WebhookTransport,
};
pub use payload::{AllowedMentions, MAX_CONTENT_LEN, WebhookPayload};
pub use shard::{fnv1a, select_shard};
