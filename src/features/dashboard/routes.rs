use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers::{self, DashboardState};
use crate::features::dashboard::services::DashboardService;

/// Create routes for the dashboard feature
///
/// All routes require an authority session (session middleware applied by
/// the caller, role checked per handler)
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    let state = DashboardState { dashboard_service };

    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .route(
            "/api/dashboard/weekly-uploads",
            get(handlers::get_weekly_uploads),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ReportsConfig;
    use crate::features::reports::services::{raw_record, MockReportStore, ReportService};
    use crate::shared::test_helpers::with_authority_session;
    use axum_test::TestServer;
    use chrono::Utc;

    async fn test_server() -> TestServer {
        // one resolved, one unseen report, both uploaded "today"
        let today = Utc::now().format("%Y-%m-%dT10:00:00Z").to_string();
        let mut resolved = raw_record("resolved", &today);
        resolved.progress = Some("Resolved".to_string());
        let unseen = raw_record("unseen", &today);

        let store = Arc::new(MockReportStore::with_records(vec![resolved, unseen]));
        let report_service = Arc::new(ReportService::new(
            store,
            &ReportsConfig {
                fallback_address: "fallback".to_string(),
            },
        ));
        report_service.refresh().await.unwrap();

        let dashboard_service = Arc::new(DashboardService::new(report_service));
        TestServer::new(with_authority_session(routes(dashboard_service))).unwrap()
    }

    #[tokio::test]
    async fn test_summary_returns_exclusive_counts() {
        let server = test_server().await;
        let response = server.get("/api/dashboard/summary").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["resolved_count"], 1);
        assert_eq!(body["data"]["unseen_count"], 1);
        assert_eq!(body["data"]["seen_count"], 0);
        assert_eq!(body["data"]["total_reports"], 2);
    }

    #[tokio::test]
    async fn test_summary_accepts_filter_params() {
        let server = test_server().await;
        let response = server
            .get("/api/dashboard/summary")
            .add_query_param("resolved_filter", "resolved")
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["resolved_count"], 1);
        assert_eq!(body["data"]["total_reports"], 1);
        assert_eq!(body["data"]["resolved_pct"], 100);
    }

    #[tokio::test]
    async fn test_weekly_uploads_returns_seven_buckets() {
        let server = test_server().await;
        let response = server.get("/api/dashboard/weekly-uploads").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let days = body["data"]["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        // both uploads land in today's bucket, the last one
        assert_eq!(days[6]["count"], 2);
    }
}
