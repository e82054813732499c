use chrono::Utc;
use serde::Deserialize;
use tracing::error;

use backend_domain::{classify_warranty, filter_items, Category, ItemId, SortKey, UserId};

use crate::dtos::ItemView;
use crate::{AppError, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct ListItemsQuery {
    pub sort: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Produces the ordered, filtered catalog view for one user. Ordering comes
/// from the repository; search and category narrowing plus the display-only
/// warranty classification happen here.
pub async fn list_items(
    state: &AppState,
    user: &UserId,
    query: ListItemsQuery,
) -> Result<Vec<ItemView>, AppError> {
    let sort = match query.sort.as_deref() {
        None | Some("") => SortKey::default(),
        Some(raw) => SortKey::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown sort key '{}'", raw)))?,
    };
    let category = parse_category_filter(query.category.as_deref())?;

    let records = state.item_repo.list(user, sort).await.map_err(|err| {
        error!("failed to list items for user {}: {}", user.as_str(), err);
        AppError::Internal(err)
    })?;

    let search = query.search.unwrap_or_default();
    let today = Utc::now().date_naive();
    Ok(filter_items(records, &search, category)
        .into_iter()
        .map(|item| {
            let warranty_status = classify_warranty(today, item.warranty_expiration_date);
            ItemView { item, warranty_status }
        })
        .collect())
}

pub async fn get_item(state: &AppState, user: &UserId, id: &ItemId) -> Result<ItemView, AppError> {
    let item = state
        .item_repo
        .get(user, id)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::NotFound)?;
    let warranty_status = classify_warranty(Utc::now().date_naive(), item.warranty_expiration_date);
    Ok(ItemView { item, warranty_status })
}

/// `None` and the literal "all" both mean no category narrowing.
fn parse_category_filter(raw: Option<&str>) -> Result<Option<Category>, AppError> {
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => Category::parse_strict(value)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("unknown category '{}'", value))),
    }
}
