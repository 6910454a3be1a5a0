use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::payload::WebhookPayload;

/// 单次投递的结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 对端接受了消息
    Accepted,
    /// 对端返回非成功状态码（限流、服务端错误或其他客户端错误）
    Rejected(u16),
    /// 网络层失败
    TransportError,
}

/// 单个webhook端点的投递接口
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn deliver(&self, url: &str, payload: &WebhookPayload) -> DeliveryOutcome;
}

/// 基于reqwest的HTTP投递实现，超时按单次尝试计
pub struct HttpWebhookTransport {
    http: reqwest::Client,
}

impl HttpWebhookTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn deliver(&self, url: &str, payload: &WebhookPayload) -> DeliveryOutcome {
        // wait=true要求对端同步处理完成后再返回状态码
        let result = self
            .http
            .post(format!("{}?wait=true", url))
            .json(payload)
            .send()
            .await;
        match result {
            Ok(resp) if resp.status().is_success() => DeliveryOutcome::Accepted,
            Ok(resp) => DeliveryOutcome::Rejected(resp.status().as_u16()),
            Err(e) => {
                tracing::warn!("Webhook request failed: {}", e);
                DeliveryOutcome::TransportError
            }
        }
    }
}

/// 分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { shard: usize },
    AllFailed,
}

/// 顺序failover分发器
///
/// 从起始分片开始逐个尝试，首个接受即停，所有失败类型一律前进到
/// 下一个候选。串行尝试是有意为之：并行发送可能造成重复投递。
/// 不做退避，不重试同一分片，不排队。
pub struct WebhookDispatcher {
    transport: Arc<dyn WebhookTransport>,
    max_tries: usize,
}

impl WebhookDispatcher {
    pub fn new(transport: Arc<dyn WebhookTransport>, max_tries: usize) -> Self {
        Self {
            transport,
            max_tries: max_tries.max(1),
        }
    }

    /// 同步投递一条消息，在max_tries和池大小的较小值内failover
    pub async fn dispatch(
        &self,
        payload: &WebhookPayload,
        pool: &[String],
        start_index: usize,
    ) -> DispatchOutcome {
        let tries = self.max_tries.min(pool.len());
        for t in 0..tries {
            let idx = (start_index + t) % pool.len();
            match self.transport.deliver(&pool[idx], payload).await {
                DeliveryOutcome::Accepted => {
                    tracing::info!("Message delivered via shard {}", idx);
                    return DispatchOutcome::Delivered { shard: idx };
                }
                DeliveryOutcome::Rejected(status) => {
                    tracing::warn!("Shard {} rejected with status {}, trying next", idx, status);
                }
                DeliveryOutcome::TransportError => {
                    tracing::warn!("Shard {} unreachable, trying next", idx);
                }
            }
        }
        DispatchOutcome::AllFailed
    }
}
