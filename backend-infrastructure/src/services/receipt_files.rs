use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use backend_domain::ports::ReceiptStorage;
use backend_domain::UserId;

/// Blob store for receipt images on the local filesystem, one directory per
/// user. References look like `receipts/<user>/<millis>-<name>` and only
/// resolve back through the owning user's prefix.
pub struct LocalReceiptStorage {
    root: PathBuf,
}

impl LocalReceiptStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn user_dir(&self, user: &UserId) -> PathBuf {
        self.root.join(sanitize(user.as_str()))
    }
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl ReceiptStorage for LocalReceiptStorage {
    async fn store(
        &self,
        user: &UserId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        let dir = self.user_dir(user);
        fs::create_dir_all(&dir).await?;
        let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), sanitize(file_name));
        fs::write(dir.join(&stored_name), bytes).await?;
        Ok(format!("receipts/{}/{}", user.as_str(), stored_name))
    }

    async fn open(&self, user: &UserId, file_url: &str) -> anyhow::Result<Vec<u8>> {
        let prefix = format!("receipts/{}/", user.as_str());
        let Some(file_name) = file_url.strip_prefix(prefix.as_str()) else {
            anyhow::bail!("file reference outside caller's storage area");
        };
        if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
            anyhow::bail!("malformed file reference");
        }
        Ok(fs::read(self.user_dir(user).join(file_name)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, LocalReceiptStorage) {
        let dir = TempDir::new().expect("tempdir");
        let storage = LocalReceiptStorage::new(dir.path().join("receipts"));
        (dir, storage)
    }

    fn user(id: &str) -> UserId {
        UserId(id.to_string())
    }

    #[tokio::test]
    async fn stored_files_round_trip_through_their_reference() {
        let (_dir, storage) = storage();
        let owner = user("user-1");
        let url = storage
            .store(&owner, "receipt.jpg", vec![1, 2, 3])
            .await
            .expect("store");
        assert!(url.starts_with("receipts/user-1/"));
        let bytes = storage.open(&owner, &url).await.expect("open");
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn foreign_references_are_rejected() {
        let (_dir, storage) = storage();
        let alice = user("alice");
        let bob = user("bob");
        let url = storage
            .store(&alice, "r.jpg", vec![9])
            .await
            .expect("store");
        let err = storage.open(&bob, &url).await.expect_err("cross-user read");
        assert!(err.to_string().contains("outside caller's storage area"));
    }

    #[tokio::test]
    async fn traversal_attempts_are_rejected() {
        let (_dir, storage) = storage();
        let owner = user("user-1");
        for reference in [
            "receipts/user-1/../other/file.jpg",
            "receipts/user-1/..",
            "receipts/user-1/",
        ] {
            assert!(storage.open(&owner, reference).await.is_err(), "{}", reference);
        }
    }
}
