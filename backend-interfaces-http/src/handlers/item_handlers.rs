use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::item_commands;
use backend_application::dtos::ItemView;
use backend_application::queries::item_queries::{self, ListItemsQuery};
use backend_application::AppState;
use backend_domain::{ItemDraft, ItemId, ItemPatch, ItemRecord};

use crate::error::HttpError;
use crate::middleware::authenticate;

pub async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<ItemView>>, HttpError> {
    let user = authenticate(&state.config, &headers)?;
    let views = item_queries::list_items(&state, &user, query).await?;
    Ok(Json(views))
}

pub async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ItemView>, HttpError> {
    let user = authenticate(&state.config, &headers)?;
    let view = item_queries::get_item(&state, &user, &ItemId(id)).await?;
    Ok(Json(view))
}

/// Manual creation, for belongings without a machine-readable receipt.
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<ItemDraft>,
) -> Result<(StatusCode, Json<ItemRecord>), HttpError> {
    let user = authenticate(&state.config, &headers)?;
    let item = item_commands::create_item(&state, &user, draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<ItemPatch>,
) -> Result<StatusCode, HttpError> {
    let user = authenticate(&state.config, &headers)?;
    item_commands::update_item(&state, &user, &ItemId(id), patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let user = authenticate(&state.config, &headers)?;
    item_commands::delete_item(&state, &user, &ItemId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
