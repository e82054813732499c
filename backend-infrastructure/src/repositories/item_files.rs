use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use backend_domain::ports::ItemRepository;
use backend_domain::{
    sort_items, ItemDraft, ItemId, ItemPatch, ItemRecord, SortKey, UserId,
};

/// File-backed item store: one JSON document per user under the data
/// directory. A single write lock serializes read-modify-write cycles so a
/// background finalize and a user edit cannot interleave mid-file; the
/// later write wins, which is the storage contract.
pub struct JsonItemStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonItemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn user_file(&self, user: &UserId) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize(user.as_str())))
    }

    async fn load(&self, user: &UserId) -> anyhow::Result<Vec<ItemRecord>> {
        let path = self.user_file(user);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, user: &UserId, records: &[ItemRecord]) -> anyhow::Result<()> {
        let path = self.user_file(user);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string(records)?;
        // Write to a sibling temp file first so a crash mid-write never
        // truncates the live document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// Keeps user ids safe to embed in a file name.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl ItemRepository for JsonItemStore {
    async fn list(&self, user: &UserId, sort: SortKey) -> anyhow::Result<Vec<ItemRecord>> {
        let mut records = self.load(user).await?;
        sort_items(&mut records, sort);
        Ok(records)
    }

    async fn create(&self, user: &UserId, draft: ItemDraft) -> anyhow::Result<ItemRecord> {
        let record = ItemRecord {
            id: ItemId(Uuid::new_v4().to_string()),
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

        let _guard = self.write_lock.lock().await;
        let mut records = self.load(user).await?;
        records.push(record.clone());
        self.save(user, &records).await?;
        Ok(record)
    }

    async fn get(&self, user: &UserId, id: &ItemId) -> anyhow::Result<Option<ItemRecord>> {
        let records = self.load(user).await?;
        Ok(records.into_iter().find(|record| record.id == *id))
    }

    async fn update(&self, user: &UserId, id: &ItemId, patch: ItemPatch) -> anyhow::Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load(user).await?;
        let Some(record) = records.iter_mut().find(|record| record.id == *id) else {
            return Ok(false);
        };
        patch.apply(record);
        self.save(user, &records).await?;
        Ok(true)
    }

    async fn delete(&self, user: &UserId, id: &ItemId) -> anyhow::Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load(user).await?;
        let before = records.len();
        records.retain(|record| record.id != *id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(user, &records).await?;
        Ok(true)
    }

    /// Readiness probe: the data directory must exist or be creatable.
    async fn ping(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{Category, ProcessingStatus};
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonItemStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonItemStore::new(dir.path().join("items"));
        (dir, store)
    }

    fn user(id: &str) -> UserId {
        UserId(id.to_string())
    }

    fn draft(name: &str) -> ItemDraft {
        ItemDraft {
            product_name: name.to_string(),
            ..ItemDraft::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp_and_round_trips() {
        let (_dir, store) = store();
        let owner = user("user-1");
        let created = store.create(&owner, draft("Monitor")).await.expect("create");
        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.processing_status, ProcessingStatus::Processing);

        let loaded = store
            .get(&owner, &created.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(loaded.product_name, "Monitor");
        assert_eq!(loaded.created_at, created.created_at);
    }

    #[tokio::test]
    async fn records_are_scoped_per_user() {
        let (_dir, store) = store();
        let alice = user("alice");
        let bob = user("bob");
        let created = store.create(&alice, draft("Bike")).await.expect("create");

        assert!(store.get(&bob, &created.id).await.expect("get").is_none());
        assert!(store
            .list(&bob, SortKey::default())
            .await
            .expect("list")
            .is_empty());
        assert!(!store.delete(&bob, &created.id).await.expect("delete"));
        assert!(store.get(&alice, &created.id).await.expect("get").is_some());
    }

    #[tokio::test]
    async fn update_merges_partially_and_reports_missing_ids() {
        let (_dir, store) = store();
        let owner = user("user-1");
        let mut with_price = draft("TV");
        with_price.total_price = Some(700.0);
        with_price.category = Category::Electronics;
        let created = store.create(&owner, with_price).await.expect("create");

        let patch = ItemPatch {
            user_notes: Some("wall mounted".to_string()),
            ..ItemPatch::default()
        };
        assert!(store.update(&owner, &created.id, patch).await.expect("update"));

        let loaded = store
            .get(&owner, &created.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(loaded.user_notes.as_deref(), Some("wall mounted"));
        assert_eq!(loaded.total_price, Some(700.0));
        assert_eq!(loaded.category, Category::Electronics);

        let missing = ItemId::from("does-not-exist");
        assert!(!store
            .update(&owner, &missing, ItemPatch::default())
            .await
            .expect("update"));
    }

    #[tokio::test]
    async fn list_orders_server_side() {
        let (_dir, store) = store();
        let owner = user("user-1");
        for (name, price) in [("cheap", 10.0), ("pricey", 90.0), ("mid", 40.0)] {
            let mut d = draft(name);
            d.total_price = Some(price);
            store.create(&owner, d).await.expect("create");
        }
        let records = store.list(&owner, SortKey::PriceDesc).await.expect("list");
        let names: Vec<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["pricey", "mid", "cheap"]);
    }

    #[tokio::test]
    async fn delete_is_hard() {
        let (_dir, store) = store();
        let owner = user("user-1");
        let created = store.create(&owner, draft("Chair")).await.expect("create");
        assert!(store.delete(&owner, &created.id).await.expect("delete"));
        assert!(store.get(&owner, &created.id).await.expect("get").is_none());
        assert!(!store.delete(&owner, &created.id).await.expect("delete again"));
    }

    #[tokio::test]
    async fn hostile_user_ids_stay_inside_the_data_dir() {
        let (_dir, store) = store();
        let sneaky = user("../../etc/passwd");
        let path = store.user_file(&sneaky);
        assert!(path.starts_with(&store.data_dir));
        assert!(!path.to_string_lossy().contains(".."));
    }
}
