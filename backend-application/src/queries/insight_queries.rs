use chrono::Utc;
use tracing::error;

use backend_domain::{insights_summary, InsightsSummary, SortKey, TimeFilter, UserId};

use crate::{AppError, AppState};

pub async fn summarize(
    state: &AppState,
    user: &UserId,
    period: Option<String>,
) -> Result<InsightsSummary, AppError> {
    let filter = match period.as_deref() {
        None | Some("") => TimeFilter::default(),
        Some(raw) => TimeFilter::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown period '{}'", raw)))?,
    };

    let records = state
        .item_repo
        .list(user, SortKey::default())
        .await
        .map_err(|err| {
            error!("failed to load items for insights: {}", err);
            AppError::Internal(err)
        })?;

    Ok(insights_summary(&records, Utc::now().date_naive(), filter))
}
