use axum::Router;

use backend_application::AppState;

use crate::handlers::{
    extract_handlers, ingest_handlers, insight_handlers, item_handlers, ops_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/receipts",
            axum::routing::post(ingest_handlers::upload_receipt),
        )
        .route(
            "/v1/items",
            axum::routing::get(item_handlers::list_items).post(item_handlers::create_item),
        )
        .route(
            "/v1/items/:id",
            axum::routing::get(item_handlers::get_item)
                .patch(item_handlers::update_item)
                .delete(item_handlers::delete_item),
        )
        .route(
            "/v1/extract",
            axum::routing::post(extract_handlers::process_receipt),
        )
        .route(
            "/v1/insights/summary",
            axum::routing::get(insight_handlers::insights_summary),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
