use serde::Deserialize;
use serde_json::Value;

/// 中继入站请求体
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    /// 调用方身份提示，缺失时回退到连接元数据
    pub user_id: Option<String>,
    /// 消息文本，超长部分会被静默截断
    pub content: Option<String>,
    /// 透传的富文本嵌入对象
    pub embeds: Option<Vec<Value>>,
    /// 是否允许广播式提及，默认禁止
    #[serde(default)]
    pub everyone: bool,
}
