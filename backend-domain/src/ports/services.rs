use async_trait::async_trait;
use serde_json::Value;

use crate::value_objects::UserId;

/// Blob storage boundary for receipt images. References handed out by
/// `store` resolve only within the owning user's area; `open` must reject
/// any reference outside it.
#[async_trait]
pub trait ReceiptStorage: Send + Sync {
    async fn store(&self, user: &UserId, file_name: &str, bytes: Vec<u8>)
        -> anyhow::Result<String>;
    async fn open(&self, user: &UserId, file_url: &str) -> anyhow::Result<Vec<u8>>;
}

/// The generative-AI boundary: given raw image bytes and a JSON-schema-like
/// description of the wanted shape, returns a JSON object matching the
/// schema with `null` for anything unextractable.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, image: &[u8], schema: &Value) -> anyhow::Result<Value>;
}
