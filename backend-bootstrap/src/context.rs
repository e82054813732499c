use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use backend_application::{AppState, Metrics};
use backend_domain::ItemRepository;
use backend_infrastructure::{
    AppConfig, GeminiExtractionService, JsonItemStore, LocalReceiptStorage,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let item_repo = Arc::new(JsonItemStore::new(&runtime_config.data_dir));
        item_repo.ping().await?;

        let receipt_storage = Arc::new(LocalReceiptStorage::new(&runtime_config.receipts_dir));
        let extraction = Arc::new(GeminiExtractionService::new(&runtime_config)?);

        if runtime_config.gemini_api_key.is_none() {
            warn!("no Gemini API key configured, receipt extraction will fail");
        }
        if runtime_config.auth_tokens.is_empty() {
            warn!("no auth tokens configured, all requests will be rejected");
        }

        let state = AppState {
            config: runtime_config,
            item_repo,
            receipt_storage,
            extraction,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
