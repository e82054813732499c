use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub receipts_dir: String,
    /// Bearer token -> user id. The server refuses every request when the
    /// table is empty, so a deployment must configure at least one entry.
    pub auth_tokens: HashMap<String, String>,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    pub gemini_api_key: Option<String>,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            data_dir: "./data/items".to_string(),
            receipts_dir: "./data/receipts".to_string(),
            auth_tokens: HashMap::new(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_api_key: None,
            request_timeout_seconds: 30,
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("ARCHIE_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_key) = &self.gemini_api_key {
            if api_key.trim().is_empty() {
                self.gemini_api_key = None;
            }
        }
        self.auth_tokens
            .retain(|token, user| !token.trim().is_empty() && !user.trim().is_empty());
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        self.receipts_dir = resolve_path(base, &self.receipts_dir);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.receipts_dir.trim().is_empty() {
            return Err(anyhow!("receipts_dir must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("ARCHIE_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("ARCHIE_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("ARCHIE_RECEIPTS_DIR") {
            self.receipts_dir = value;
        }
        if let Ok(value) = env::var("ARCHIE_GEMINI_ENDPOINT") {
            self.gemini_endpoint = value;
        }
        if let Ok(value) = env::var("ARCHIE_GEMINI_MODEL") {
            self.gemini_model = value;
        }
        if let Ok(value) = env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(value);
        }
        if let Ok(value) = env::var("ARCHIE_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("ARCHIE_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("ARCHIE_AUTH_TOKENS") {
            let parsed = parse_env_token_table(&value);
            if !parsed.is_empty() {
                self.auth_tokens = parsed;
            }
        }
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            data_dir: self.data_dir.clone(),
            receipts_dir: self.receipts_dir.clone(),
            auth_tokens: self.auth_tokens.clone(),
            gemini_endpoint: self.gemini_endpoint.clone(),
            gemini_model: self.gemini_model.clone(),
            gemini_api_key: self.gemini_api_key.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

/// `token=user,token=user` pairs; malformed entries are skipped.
fn parse_env_token_table(value: &str) -> HashMap<String, String> {
    value
        .split(',')
        .filter_map(|pair| {
            let (token, user) = pair.split_once('=')?;
            let token = token.trim();
            let user = user.trim();
            if token.is_empty() || user.is_empty() {
                return None;
            }
            Some((token.to_string(), user.to_string()))
        })
        .collect()
}
