use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use backend_application::commands::extract_commands;
use backend_application::AppState;
use backend_domain::ExtractionRequest;

use crate::error::HttpError;
use crate::middleware::authenticate;

/// The callable extraction surface: a stored file reference plus a target
/// schema in, the provider's structured JSON out.
pub async fn process_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<Value>, HttpError> {
    let user = authenticate(&state.config, &headers)?;
    let extracted = extract_commands::process_receipt(&state, &user, request).await?;
    Ok(Json(extracted))
}
