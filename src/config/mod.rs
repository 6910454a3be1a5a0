use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub api_key: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub rate_limit_per_minute: u32,
    pub rate_limit_per_day: u32,
    pub failover_tries: usize,
    pub webhook_timeout_secs: u64,
    pub webhooks: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // webhook地址池：优先读取JSON数组，失败或为空时回退到单个地址
        let mut webhooks = env::var("WEBHOOKS_JSON")
            .ok()
            .and_then(|json| serde_json::from_str::<Vec<String>>(&json).ok())
            .unwrap_or_default();
        if webhooks.is_empty() {
            if let Ok(url) = env::var("WEBHOOK_URL") {
                webhooks = vec![url];
            }
        }

        Ok(Config {
            redis_url: env::var("REDIS_URL")?,
            api_key: env::var("API_KEY")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".to_string()),
            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            rate_limit_per_day: env::var("RATE_LIMIT_PER_DAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            failover_tries: env::var("FAILOVER_TRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2)
                .max(1),
            webhook_timeout_secs: env::var("WEBHOOK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            webhooks,
        })
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }
}
