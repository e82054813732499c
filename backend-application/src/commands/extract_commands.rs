use serde_json::Value;
use tracing::{error, info};

use backend_domain::{ExtractionRequest, UserId};

use crate::{AppError, AppState};

/// The callable extraction surface: resolves the caller's own stored file
/// and proxies it with the supplied schema to the extraction provider.
/// Input problems and provider failures stay distinct error kinds.
pub async fn process_receipt(
    state: &AppState,
    user: &UserId,
    request: ExtractionRequest,
) -> Result<Value, AppError> {
    if request.file_url.trim().is_empty() {
        return Err(AppError::BadRequest("file_url is required".to_string()));
    }
    if !request.schema.is_object() {
        return Err(AppError::BadRequest("schema must be a JSON object".to_string()));
    }

    let image = state
        .receipt_storage
        .open(user, &request.file_url)
        .await
        .map_err(|err| AppError::BadRequest(format!("unresolvable file_url: {}", err)))?;

    let extracted = state
        .extraction
        .extract(&image, &request.schema)
        .await
        .map_err(|err| {
            error!(
                "extraction provider failed for user {}: {}",
                user.as_str(),
                err
            );
            AppError::Internal(err)
        })?;

    info!("extracted receipt fields for user {}", user.as_str());
    Ok(extracted)
}
