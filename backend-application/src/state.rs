use std::sync::Arc;

use backend_domain::ports::{ExtractionService, ItemRepository, ReceiptStorage};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub item_repo: Arc<dyn ItemRepository>,
    pub receipt_storage: Arc<dyn ReceiptStorage>,
    pub extraction: Arc<dyn ExtractionService>,
    pub metrics: Arc<Metrics>,
}
