use chrono::NaiveDate;
use tracing::{error, info, warn};

use backend_domain::{
    derive_expiration, receipt_schema, Category, ExtractedFields, ItemDraft, ItemId, ItemPatch,
    ItemRecord, ProcessingStatus, UserId,
};

use crate::dtos::ReceiptUpload;
use crate::{AppError, AppState};

/// Product name a record carries between upload and extraction.
pub const PLACEHOLDER_PRODUCT_NAME: &str = "Processing Receipt...";
/// Fixed marker written when extraction fails after the record exists.
pub const FAILED_PRODUCT_NAME: &str = "Processing Failed";
pub const FAILED_NOTES: &str = "AI data extraction failed. Please add details manually.";
const UNTITLED_PRODUCT_NAME: &str = "Untitled Item";

/// Drives one receipt from raw image to a placeholder record and hands the
/// placeholder back immediately. Extraction runs detached; its outcome is
/// written into the record, never surfaced to this caller.
///
/// An upload failure aborts the whole attempt with no record created. Once
/// the placeholder exists, every later failure is absorbed into the
/// record's `failed` transition instead.
pub async fn ingest_receipt(
    state: &AppState,
    user: &UserId,
    upload: ReceiptUpload,
) -> Result<ItemRecord, AppError> {
    if upload.bytes.is_empty() {
        return Err(AppError::BadRequest("image body is empty".to_string()));
    }
    if upload.file_name.trim().is_empty() {
        return Err(AppError::BadRequest("file name is empty".to_string()));
    }

    let file_url = state
        .receipt_storage
        .store(user, &upload.file_name, upload.bytes)
        .await
        .map_err(|err| {
            state.metrics.record_ingest_error();
            error!("receipt upload failed for user {}: {}", user.as_str(), err);
            AppError::Internal(err)
        })?;

    let draft = ItemDraft {
        product_name: PLACEHOLDER_PRODUCT_NAME.to_string(),
        receipt_image_url: Some(file_url.clone()),
        processing_status: ProcessingStatus::Processing,
        ..ItemDraft::default()
    };
    let item = state.item_repo.create(user, draft).await.map_err(|err| {
        state.metrics.record_ingest_error();
        AppError::Internal(err)
    })?;

    state.metrics.record_ingest();
    info!(
        "created placeholder item {} for user {}",
        item.id.as_str(),
        user.as_str()
    );
    spawn_extraction(state.clone(), user.clone(), item.id.clone(), file_url);
    Ok(item)
}

/// Dispatches the background half of the pipeline. One attempt per record,
/// no retries, no cancellation: the task runs to completion and writes its
/// outcome whether or not the originating request is still around.
pub fn spawn_extraction(state: AppState, user: UserId, item_id: ItemId, file_url: String) {
    tokio::spawn(async move {
        finalize_extraction(&state, &user, &item_id, &file_url).await;
    });
}

/// Runs extraction for an existing placeholder and transitions it to
/// `completed` or `failed`. Never returns an error: whatever happens, the
/// record must leave the `processing` state.
pub async fn finalize_extraction(state: &AppState, user: &UserId, item_id: &ItemId, file_url: &str) {
    match run_extraction(state, user, file_url).await {
        Ok(fields) => {
            let patch = completion_patch(fields);
            match state.item_repo.update(user, item_id, patch).await {
                Ok(true) => {
                    state.metrics.record_extraction_completed();
                    info!("finalized item {} for user {}", item_id.as_str(), user.as_str());
                }
                Ok(false) => {
                    // Deleted while extraction was in flight; nothing to write.
                    warn!("item {} vanished before finalize", item_id.as_str());
                }
                Err(err) => {
                    error!("failed to finalize item {}: {}", item_id.as_str(), err);
                }
            }
        }
        Err(err) => {
            warn!("extraction failed for item {}: {}", item_id.as_str(), err);
            state.metrics.record_extraction_failed();
            if let Err(update_err) = state
                .item_repo
                .update(user, item_id, failure_patch())
                .await
            {
                error!(
                    "failed to mark item {} as failed: {}",
                    item_id.as_str(),
                    update_err
                );
            }
        }
    }
}

async fn run_extraction(
    state: &AppState,
    user: &UserId,
    file_url: &str,
) -> anyhow::Result<ExtractedFields> {
    let image = state.receipt_storage.open(user, file_url).await?;
    let value = state.extraction.extract(&image, &receipt_schema()).await?;
    Ok(serde_json::from_value(value)?)
}

/// Turns extraction output into a partial update. Fields the provider could
/// not read stay absent so they never erase stored defaults; the expiration
/// date is derived only when both of its inputs came back.
fn completion_patch(fields: ExtractedFields) -> ItemPatch {
    let warranty_expiration_date = match (&fields.purchase_date, &fields.warranty_period) {
        (Some(date), Some(period)) => derive_expiration(date, period),
        _ => None,
    };
    ItemPatch {
        product_name: Some(
            fields
                .product_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_PRODUCT_NAME.to_string()),
        ),
        product_model: fields.product_model,
        store_name: fields.store_name,
        category: Some(
            fields
                .category
                .as_deref()
                .map(Category::parse_lossy)
                .unwrap_or_default(),
        ),
        total_price: fields.total_price,
        currency: fields.currency,
        purchase_date: fields
            .purchase_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()),
        warranty_period: fields.warranty_period,
        warranty_expiration_date,
        processing_status: Some(ProcessingStatus::Completed),
        ..ItemPatch::default()
    }
}

fn failure_patch() -> ItemPatch {
    ItemPatch {
        product_name: Some(FAILED_PRODUCT_NAME.to_string()),
        user_notes: Some(FAILED_NOTES.to_string()),
        processing_status: Some(ProcessingStatus::Failed),
        ..ItemPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        test_state, test_state_with, user, MemoryItemRepo, MemoryReceiptStorage, StubOutcome,
    };
    use backend_domain::{ItemRepository, SortKey};
    use serde_json::json;
    use std::sync::Arc;

    fn upload() -> ReceiptUpload {
        ReceiptUpload {
            file_name: "receipt.jpg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    /// Stores an image and creates the placeholder record without spawning
    /// the detached task, so finalize runs exactly once per test.
    async fn placeholder(state: &AppState, owner: &UserId) -> (ItemRecord, String) {
        let file_url = state
            .receipt_storage
            .store(owner, "receipt.jpg", vec![0xff, 0xd8, 0xff])
            .await
            .expect("store");
        let draft = ItemDraft {
            product_name: PLACEHOLDER_PRODUCT_NAME.to_string(),
            receipt_image_url: Some(file_url.clone()),
            processing_status: ProcessingStatus::Processing,
            ..ItemDraft::default()
        };
        let item = state.item_repo.create(owner, draft).await.expect("create");
        (item, file_url)
    }

    #[tokio::test]
    async fn ingest_creates_placeholder_before_extraction_finishes() {
        let state = test_state(StubOutcome::Err("provider down".to_string()));
        let item = ingest_receipt(&state, &user(), upload()).await.expect("ingest");

        assert_eq!(item.product_name, PLACEHOLDER_PRODUCT_NAME);
        assert_eq!(item.processing_status, ProcessingStatus::Processing);
        assert_eq!(
            item.receipt_image_url.as_deref(),
            Some("receipts/user-1/receipt.jpg")
        );
    }

    #[tokio::test]
    async fn upload_failure_aborts_without_creating_a_record() {
        let repo = Arc::new(MemoryItemRepo::default());
        let storage = Arc::new(MemoryReceiptStorage::failing());
        let state = test_state_with(repo.clone(), storage, StubOutcome::Ok(json!({})));

        let result = ingest_receipt(&state, &user(), upload()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        let items = repo.list(&user(), SortKey::default()).await.expect("list");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn blank_file_name_is_rejected_up_front() {
        let state = test_state(StubOutcome::Ok(json!({})));
        let result = ingest_receipt(
            &state,
            &user(),
            ReceiptUpload { file_name: "  ".to_string(), bytes: vec![1] },
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn empty_body_is_rejected_up_front() {
        let state = test_state(StubOutcome::Ok(json!({})));
        let result = ingest_receipt(
            &state,
            &user(),
            ReceiptUpload { file_name: "r.jpg".to_string(), bytes: Vec::new() },
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn successful_extraction_finalizes_the_record() {
        let extracted = json!({
            "product_name": "Espresso Machine",
            "store_name": "Kitchen World",
            "purchase_date": "2024-01-15",
            "total_price": 499.0,
            "currency": "USD",
            "warranty_period": "2 years",
            "category": "Appliances"
        });
        let state = test_state(StubOutcome::Ok(extracted));
        let owner = user();
        let (item, file_url) = placeholder(&state, &owner).await;

        finalize_extraction(&state, &owner, &item.id, &file_url).await;

        let stored = state
            .item_repo
            .get(&owner, &item.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(stored.product_name, "Espresso Machine");
        assert_eq!(stored.processing_status, ProcessingStatus::Completed);
        assert_eq!(stored.category, Category::Appliances);
        assert_eq!(stored.total_price, Some(499.0));
        assert_eq!(
            stored.purchase_date.map(|d| d.to_string()),
            Some("2024-01-15".to_string())
        );
        assert_eq!(
            stored.warranty_expiration_date.map(|d| d.to_string()),
            Some("2026-01-15".to_string())
        );
    }

    #[tokio::test]
    async fn extraction_failure_marks_the_record_and_keeps_the_image() {
        let state = test_state(StubOutcome::Err("network error".to_string()));
        let owner = user();
        let (item, file_url) = placeholder(&state, &owner).await;

        finalize_extraction(&state, &owner, &item.id, &file_url).await;

        let stored = state
            .item_repo
            .get(&owner, &item.id)
            .await
            .expect("get")
            .expect("record survives failure");
        assert_eq!(stored.product_name, FAILED_PRODUCT_NAME);
        assert_eq!(stored.user_notes.as_deref(), Some(FAILED_NOTES));
        assert_eq!(stored.processing_status, ProcessingStatus::Failed);
        assert_eq!(stored.receipt_image_url.as_deref(), Some(file_url.as_str()));
        assert_eq!(state.metrics.extractions_failed(), 1);
    }

    #[tokio::test]
    async fn missing_fields_fall_back_without_erasing_anything() {
        let state = test_state(StubOutcome::Ok(json!({
            "store_name": null,
            "warranty_period": "lifetime",
            "purchase_date": "2024-03-01"
        })));
        let owner = user();
        let (item, file_url) = placeholder(&state, &owner).await;

        finalize_extraction(&state, &owner, &item.id, &file_url).await;

        let stored = state
            .item_repo
            .get(&owner, &item.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(stored.product_name, UNTITLED_PRODUCT_NAME);
        assert_eq!(stored.category, Category::Other);
        assert!(stored.store_name.is_none());
        // "lifetime" has no integer, so no expiration is derived.
        assert!(stored.warranty_expiration_date.is_none());
        assert_eq!(stored.warranty_period.as_deref(), Some("lifetime"));
    }
}
