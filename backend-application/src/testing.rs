// In-memory collaborators for application-layer tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use backend_domain::ports::{ExtractionService, ItemRepository, ReceiptStorage};
use backend_domain::{
    sort_items, ItemDraft, ItemId, ItemPatch, ItemRecord, RuntimeConfig, SortKey, UserId,
};

use crate::{AppState, Metrics};

#[derive(Default)]
pub struct MemoryItemRepo {
    items: Mutex<HashMap<String, Vec<ItemRecord>>>,
    seq: AtomicU64,
}

#[async_trait]
impl ItemRepository for MemoryItemRepo {
    async fn list(&self, user: &UserId, sort: SortKey) -> anyhow::Result<Vec<ItemRecord>> {
        let items = self.items.lock().expect("repo lock");
        let mut records = items.get(user.as_str()).cloned().unwrap_or_default();
        sort_items(&mut records, sort);
        Ok(records)
    }

    async fn create(&self, user: &UserId, draft: ItemDraft) -> anyhow::Result<ItemRecord> {
        let record = ItemRecord {
            id: ItemId(format!("item-{}", self.seq.fetch_add(1, Ordering::Relaxed))),
            product_name: draft.product_name,
            product_model: draft.product_model,
            store_name: draft.store_name,
            category: draft.category,
            total_price: draft.total_price,
            currency: draft.currency,
            purchase_date: draft.purchase_date,
            warranty_period: draft.warranty_period,
            warranty_expiration_date: draft.warranty_expiration_date,
            receipt_image_url: draft.receipt_image_url,
            manual_url: draft.manual_url,
            user_notes: draft.user_notes,
            processing_status: draft.processing_status,
            created_at: Utc::now(),
        };
        let mut items = self.items.lock().expect("repo lock");
        items
            .entry(user.as_str().to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn get(&self, user: &UserId, id: &ItemId) -> anyhow::Result<Option<ItemRecord>> {
        let items = self.items.lock().expect("repo lock");
        Ok(items
            .get(user.as_str())
            .and_then(|records| records.iter().find(|record| record.id == *id).cloned()))
    }

    async fn update(&self, user: &UserId, id: &ItemId, patch: ItemPatch) -> anyhow::Result<bool> {
        let mut items = self.items.lock().expect("repo lock");
        let Some(records) = items.get_mut(user.as_str()) else {
            return Ok(false);
        };
        let Some(record) = records.iter_mut().find(|record| record.id == *id) else {
            return Ok(false);
        };
        patch.apply(record);
        Ok(true)
    }

    async fn delete(&self, user: &UserId, id: &ItemId) -> anyhow::Result<bool> {
        let mut items = self.items.lock().expect("repo lock");
        let Some(records) = items.get_mut(user.as_str()) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|record| record.id != *id);
        Ok(records.len() != before)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryReceiptStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_store: bool,
}

impl MemoryReceiptStorage {
    /// Storage whose `store` always fails, for upload-error paths.
    pub fn failing() -> Self {
        Self {
            files: Mutex::default(),
            fail_store: true,
        }
    }
}

#[async_trait]
impl ReceiptStorage for MemoryReceiptStorage {
    async fn store(
        &self,
        user: &UserId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        if self.fail_store {
            anyhow::bail!("storage offline");
        }
        let url = format!("receipts/{}/{}", user.as_str(), file_name);
        self.files
            .lock()
            .expect("storage lock")
            .insert(url.clone(), bytes);
        Ok(url)
    }

    async fn open(&self, user: &UserId, file_url: &str) -> anyhow::Result<Vec<u8>> {
        let prefix = format!("receipts/{}/", user.as_str());
        if !file_url.starts_with(&prefix) {
            anyhow::bail!("file reference outside caller's storage area");
        }
        self.files
            .lock()
            .expect("storage lock")
            .get(file_url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", file_url))
    }
}

#[derive(Clone)]
pub enum StubOutcome {
    Ok(Value),
    Err(String),
}

pub struct StubExtraction {
    pub outcome: StubOutcome,
}

#[async_trait]
impl ExtractionService for StubExtraction {
    async fn extract(&self, _image: &[u8], _schema: &Value) -> anyhow::Result<Value> {
        match &self.outcome {
            StubOutcome::Ok(value) => Ok(value.clone()),
            StubOutcome::Err(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}

pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        data_dir: "data".to_string(),
        receipts_dir: "receipts".to_string(),
        auth_tokens: HashMap::from([("secret".to_string(), "user-1".to_string())]),
        gemini_endpoint: "http://127.0.0.1:1/v1beta".to_string(),
        gemini_model: "gemini-1.5-flash".to_string(),
        gemini_api_key: None,
        request_timeout_seconds: 5,
        max_body_bytes: 1024 * 1024,
    }
}

pub fn test_state(extraction: StubOutcome) -> AppState {
    test_state_with(
        Arc::new(MemoryItemRepo::default()),
        Arc::new(MemoryReceiptStorage::default()),
        extraction,
    )
}

pub fn test_state_with(
    item_repo: Arc<MemoryItemRepo>,
    receipt_storage: Arc<MemoryReceiptStorage>,
    extraction: StubOutcome,
) -> AppState {
    AppState {
        config: test_config(),
        item_repo,
        receipt_storage,
        extraction: Arc::new(StubExtraction { outcome: extraction }),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn user() -> UserId {
    UserId("user-1".to_string())
}
