use tracing::info;

use backend_domain::{ItemDraft, ItemId, ItemPatch, ItemRecord, ProcessingStatus, UserId};

use crate::{AppError, AppState};

/// Manual record creation, for items entered without a receipt. Manual
/// records have no extraction step, so they are born `completed` regardless
/// of what the caller put in the draft; `processing` is reserved for
/// AI-ingested placeholders.
pub async fn create_item(
    state: &AppState,
    user: &UserId,
    mut draft: ItemDraft,
) -> Result<ItemRecord, AppError> {
    if draft.product_name.trim().is_empty() {
        return Err(AppError::BadRequest("product_name is required".to_string()));
    }
    draft.processing_status = ProcessingStatus::Completed;
    let item = state
        .item_repo
        .create(user, draft)
        .await
        .map_err(AppError::Internal)?;
    Ok(item)
}

pub async fn update_item(
    state: &AppState,
    user: &UserId,
    id: &ItemId,
    patch: ItemPatch,
) -> Result<(), AppError> {
    if patch.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }
    if patch
        .product_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(AppError::BadRequest("product_name cannot be empty".to_string()));
    }
    if let Some(next) = patch.processing_status {
        let current = state
            .item_repo
            .get(user, id)
            .await
            .map_err(AppError::Internal)?
            .ok_or(AppError::NotFound)?;
        // The status only ever moves forward; a terminal record stays put.
        if current.processing_status.is_terminal() && next != current.processing_status {
            return Err(AppError::BadRequest(
                "processing_status cannot leave a terminal state".to_string(),
            ));
        }
    }
    let found = state
        .item_repo
        .update(user, id, patch)
        .await
        .map_err(AppError::Internal)?;
    if !found {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn delete_item(state: &AppState, user: &UserId, id: &ItemId) -> Result<(), AppError> {
    let found = state
        .item_repo
        .delete(user, id)
        .await
        .map_err(AppError::Internal)?;
    if !found {
        return Err(AppError::NotFound);
    }
    info!("deleted item {} for user {}", id.as_str(), user.as_str());
    Ok(())
}
