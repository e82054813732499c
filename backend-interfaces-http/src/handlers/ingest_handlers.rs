use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::ingest_commands;
use backend_application::dtos::ReceiptUpload;
use backend_application::AppState;
use backend_domain::ItemRecord;

use crate::error::HttpError;
use crate::middleware::authenticate;

#[derive(serde::Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

/// Accepts raw image bytes, stores them, and answers with the placeholder
/// record while extraction continues in the background.
pub async fn upload_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UploadQuery>,
    body: axum::body::Bytes,
) -> Result<(StatusCode, Json<ItemRecord>), HttpError> {
    let user = authenticate(&state.config, &headers)?;
    let file_name = query
        .filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| HttpError::BadRequest("filename query parameter is required".to_string()))?;
    let upload = ReceiptUpload {
        file_name,
        bytes: body.to_vec(),
    };
    let item = ingest_commands::ingest_receipt(&state, &user, upload).await?;
    Ok((StatusCode::ACCEPTED, Json(item)))
}
