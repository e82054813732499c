use async_trait::async_trait;

use crate::entities::{ItemDraft, ItemPatch, ItemRecord};
use crate::value_objects::{ItemId, SortKey, UserId};

/// Persistence boundary for item records. Every operation is scoped to the
/// owning user; a record is never visible outside that scope. `update`
/// merges partially and `delete` is a hard delete.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn list(&self, user: &UserId, sort: SortKey) -> anyhow::Result<Vec<ItemRecord>>;
    async fn create(&self, user: &UserId, draft: ItemDraft) -> anyhow::Result<ItemRecord>;
    async fn get(&self, user: &UserId, id: &ItemId) -> anyhow::Result<Option<ItemRecord>>;
    async fn update(&self, user: &UserId, id: &ItemId, patch: ItemPatch) -> anyhow::Result<bool>;
    async fn delete(&self, user: &UserId, id: &ItemId) -> anyhow::Result<bool>;
    /// Readiness probe for the backing store.
    async fn ping(&self) -> anyhow::Result<()>;
}
