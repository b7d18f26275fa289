use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, query_handlers, scan_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/scans",
            axum::routing::post(scan_handlers::perform_scan)
                .get(query_handlers::list_scans)
                .delete(scan_handlers::delete_scan),
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
