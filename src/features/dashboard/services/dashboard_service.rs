use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::features::reports::services::{
    aggregate, weekly_upload_series, DailyUploadCount, ReportFilters, ReportService,
    StatusBreakdown,
};

/// Serves the aggregate views behind the dashboard widgets. All numbers are
/// re-derived from the report service's current snapshot on every call.
pub struct DashboardService {
    report_service: Arc<ReportService>,
}

impl DashboardService {
    pub fn new(report_service: Arc<ReportService>) -> Self {
        Self { report_service }
    }

    /// Status breakdown over the (optionally filtered) canonical set.
    /// Default filters pass the full set through.
    pub async fn status_breakdown(
        &self,
        filters: &ReportFilters,
        now: DateTime<Utc>,
    ) -> StatusBreakdown {
        let visible = self.report_service.visible_reports(filters, now).await;
        aggregate(&visible)
    }

    /// Uploads per day over the trailing seven days, full set
    pub async fn weekly_uploads(&self, now: DateTime<Utc>) -> Vec<DailyUploadCount> {
        let snapshot = self.report_service.snapshot().await;
        weekly_upload_series(&snapshot, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ReportsConfig;
    use crate::features::reports::services::{
        raw_record, MockReportStore, ResolvedFilter, SeenFilter,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    async fn service_with_mixed_reports() -> DashboardService {
        let mut seen = raw_record("seen", "2026-08-06T09:00:00Z");
        seen.status = Some("Seen".to_string());

        let mut resolved = raw_record("resolved", "2026-08-05T09:00:00Z");
        resolved.status = Some("Seen".to_string());
        resolved.progress = Some("Resolved".to_string());

        let unseen = raw_record("unseen", "2026-08-04T09:00:00Z");

        let store = Arc::new(MockReportStore::with_records(vec![seen, resolved, unseen]));
        let report_service = Arc::new(ReportService::new(
            store,
            &ReportsConfig {
                fallback_address: "fallback".to_string(),
            },
        ));
        report_service.refresh().await.unwrap();

        DashboardService::new(report_service)
    }

    #[tokio::test]
    async fn test_breakdown_over_full_set() {
        let service = service_with_mixed_reports().await;
        let breakdown = service
            .status_breakdown(&ReportFilters::default(), now())
            .await;

        assert_eq!(breakdown.seen_not_resolved_count, 1);
        assert_eq!(breakdown.unseen_not_resolved_count, 1);
        assert_eq!(breakdown.resolved_count, 1);
        assert_eq!(breakdown.total_reports, 3);
    }

    #[tokio::test]
    async fn test_breakdown_over_filtered_set() {
        let service = service_with_mixed_reports().await;

        let filters = ReportFilters {
            resolved: ResolvedFilter::Resolved,
            ..Default::default()
        };
        let breakdown = service.status_breakdown(&filters, now()).await;
        assert_eq!(breakdown.resolved_count, 1);
        assert_eq!(breakdown.total_reports, 1);
        assert_eq!(breakdown.resolved_pct, 100);
    }

    #[tokio::test]
    async fn test_breakdown_with_empty_snapshot() {
        let store = Arc::new(MockReportStore::with_records(Vec::new()));
        let report_service = Arc::new(ReportService::new(
            store,
            &ReportsConfig {
                fallback_address: "fallback".to_string(),
            },
        ));
        report_service.refresh().await.unwrap();
        let service = DashboardService::new(report_service);

        let filters = ReportFilters {
            seen: SeenFilter::Seen,
            ..Default::default()
        };
        let breakdown = service.status_breakdown(&filters, now()).await;
        assert_eq!(breakdown.total_reports, 1);
        assert_eq!(breakdown.seen_pct, 0);
    }

    #[tokio::test]
    async fn test_weekly_uploads_cover_trailing_week() {
        let service = service_with_mixed_reports().await;
        let series = service.weekly_uploads(now()).await;

        assert_eq!(series.len(), 7);
        let total: i64 = series.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }
}
