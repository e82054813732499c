use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::queries::insight_queries;
use backend_application::AppState;
use backend_domain::InsightsSummary;

use crate::error::HttpError;
use crate::middleware::authenticate;

#[derive(serde::Deserialize)]
pub struct InsightsQuery {
    pub period: Option<String>,
}

pub async fn insights_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<InsightsSummary>, HttpError> {
    let user = authenticate(&state.config, &headers)?;
    let summary = insight_queries::summarize(&state, &user, query.period).await?;
    Ok(Json(summary))
}
