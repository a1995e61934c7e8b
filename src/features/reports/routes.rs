use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// All routes require an authority session (session middleware applied by
/// the caller, role checked per handler)
pub fn routes(report_service: Arc<ReportService>) -> Router {
    let state = ReportState { report_service };

    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports),
        )
        .route("/api/reports/refresh", post(handlers::refresh_reports))
        .route(
            "/api/reports/{id}",
            get(handlers::get_report).patch(handlers::update_report),
        )
        .with_state(state)
}
