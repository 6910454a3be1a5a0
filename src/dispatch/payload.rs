use serde::Serialize;
use serde_json::Value;

/// 出站文本内容的最大长度（字符数），超出部分静默截断
pub const MAX_CONTENT_LEN: usize = 1900;

/// 出站webhook消息体
///
/// 每个被放行的请求只构建一次，分发期间不再变更。
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub content: String,
    /// 透传的富文本嵌入对象，缺失时不出现在请求体里
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    pub allowed_mentions: AllowedMentions,
}

/// 提及策略，parse为空表示禁止广播式提及
#[derive(Debug, Clone, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
}

impl WebhookPayload {
    pub fn new(content: &str, embeds: Option<Vec<Value>>, everyone: bool) -> Self {
        let parse = if everyone {
            vec!["everyone".to_string()]
        } else {
            Vec::new()
        };
        Self {
            content: truncate_content(content),
            embeds,
            allowed_mentions: AllowedMentions { parse },
        }
    }
}

fn truncate_content(content: &str) -> String {
    content.chars().take(MAX_CONTENT_LEN).collect()
}
