use std::collections::HashMap;

/// Resolved runtime settings, produced from `AppConfig` at startup.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub receipts_dir: String,
    /// Bearer token -> owning user id. Empty map rejects every caller.
    pub auth_tokens: HashMap<String, String>,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    pub gemini_api_key: Option<String>,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}
