use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::core::config::ReportsConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::clients::{ReportPatch, ReportStore};
use crate::features::reports::models::Report;
use crate::features::reports::services::filter::{project, ReportFilters};
use crate::features::reports::services::normalizer::normalize_reports;

/// Result of a refresh request. `refreshed` is false when the trigger was
/// suppressed because another refresh was already in flight.
#[derive(Debug, Clone, Copy)]
pub struct RefreshOutcome {
    pub refreshed: bool,
    pub total_reports: usize,
}

/// Owns the canonical in-memory report set. The set is rebuilt (full
/// replace) from the store on refresh and patched in place after
/// acknowledged mutations; a failed fetch leaves the previous snapshot
/// untouched.
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    snapshot: RwLock<Vec<Report>>,
    refresh_in_flight: AtomicBool,
    fallback_address: String,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, config: &ReportsConfig) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Vec::new()),
            refresh_in_flight: AtomicBool::new(false),
            fallback_address: config.fallback_address.clone(),
        }
    }

    /// Display address substituted when a report has no usable address
    pub fn fallback_address(&self) -> &str {
        &self.fallback_address
    }

    /// Rebuilds the snapshot from the store. A trigger that arrives while
    /// another refresh is in flight is ignored (advisory suppression, not a
    /// lock) and reports the current snapshot size.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        if self.refresh_in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("Refresh already in flight, ignoring duplicate trigger");
            let total_reports = self.snapshot.read().await.len();
            return Ok(RefreshOutcome {
                refreshed: false,
                total_reports,
            });
        }

        let result = self.fetch_and_replace().await;
        self.refresh_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn fetch_and_replace(&self) -> Result<RefreshOutcome> {
        let raw = self.store.list_reports().await?;
        let reports = normalize_reports(raw);
        let total_reports = reports.len();

        *self.snapshot.write().await = reports;
        tracing::info!("Report snapshot replaced: {} reports", total_reports);

        Ok(RefreshOutcome {
            refreshed: true,
            total_reports,
        })
    }

    /// Current canonical set, most recent first
    pub async fn snapshot(&self) -> Vec<Report> {
        self.snapshot.read().await.clone()
    }

    /// Visible subset for the given filter selections
    pub async fn visible_reports(
        &self,
        filters: &ReportFilters,
        now: DateTime<Utc>,
    ) -> Vec<Report> {
        let snapshot = self.snapshot.read().await;
        project(&snapshot, filters, now)
    }

    pub async fn get(&self, id: &str) -> Result<Report> {
        self.snapshot
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Sends a partial status/progress update to the store and, only after
    /// the store acknowledges, patches the local copy. Frequency is left
    /// alone: the address set did not change.
    pub async fn apply_patch(&self, id: &str, patch: ReportPatch) -> Result<Report> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "Update must set status and/or progress".to_string(),
            ));
        }

        // Unknown ids are rejected before the store sees the request
        if !self.snapshot.read().await.iter().any(|r| r.id == id) {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        self.store.update_report(id, &patch).await?;

        let mut snapshot = self.snapshot.write().await;
        let report = snapshot
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        if let Some(status) = patch.status {
            report.status = status;
        }
        if let Some(progress) = patch.progress {
            report.progress = progress;
        }

        Ok(report.clone())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::reports::clients::{
        RawReportRecord, RawRoadLocation, ReportSubmission, StoreLoginResponse,
    };
    use crate::features::reports::models::{ReportProgress, ReportStatus};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// In-memory stand-in for the report store
    pub(crate) struct MockReportStore {
        pub records: Mutex<Vec<RawReportRecord>>,
        pub fail_listing: AtomicBool,
        pub fail_updates: AtomicBool,
        pub list_calls: AtomicUsize,
        pub update_calls: AtomicUsize,
        pub submit_calls: AtomicUsize,
    }

    impl MockReportStore {
        pub fn with_records(records: Vec<RawReportRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                fail_listing: AtomicBool::new(false),
                fail_updates: AtomicBool::new(false),
                list_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
                submit_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReportStore for MockReportStore {
        async fn list_reports(&self) -> Result<Vec<RawReportRecord>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(AppError::ExternalServiceError("store unreachable".to_string()));
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn update_report(&self, _id: &str, _patch: &ReportPatch) -> Result<()> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(AppError::ExternalServiceError("store unreachable".to_string()));
            }
            Ok(())
        }

        async fn submit_report(&self, _submission: &ReportSubmission) -> Result<()> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<StoreLoginResponse> {
            Ok(StoreLoginResponse {
                success: true,
                user_type: Some("authority".to_string()),
                message: None,
            })
        }
    }

    pub(crate) fn raw_record(id: &str, uploaded_at: &str) -> RawReportRecord {
        RawReportRecord {
            id: id.to_string(),
            user_email: Some(format!("{}@safestreet.test", id)),
            uploaded_at: Some(uploaded_at.to_string()),
            road_location: Some(RawRoadLocation::Text("Main road".to_string())),
            status: None,
            progress: None,
            damage_description: None,
            image_url: None,
            predicted_image_url: None,
        }
    }

    fn test_config() -> ReportsConfig {
        ReportsConfig {
            fallback_address: "fallback address".to_string(),
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let store = Arc::new(MockReportStore::with_records(vec![
            raw_record("r1", "2026-08-01T10:00:00Z"),
            raw_record("r2", "2026-08-02T10:00:00Z"),
        ]));
        let service = ReportService::new(store.clone(), &test_config());

        let outcome = service.refresh().await.unwrap();
        assert!(outcome.refreshed);
        assert_eq!(outcome.total_reports, 2);

        // Full replace, not merge
        *store.records.lock().unwrap() = vec![raw_record("r3", "2026-08-03T10:00:00Z")];
        let outcome = service.refresh().await.unwrap();
        assert_eq!(outcome.total_reports, 1);
        assert_eq!(service.snapshot().await[0].id, "r3");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_prior_snapshot() {
        let store = Arc::new(MockReportStore::with_records(vec![raw_record(
            "r1",
            "2026-08-01T10:00:00Z",
        )]));
        let service = ReportService::new(store.clone(), &test_config());
        service.refresh().await.unwrap();

        store.fail_listing.store(true, Ordering::SeqCst);
        let err = service.refresh().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));

        // stale but consistent
        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "r1");
    }

    #[tokio::test]
    async fn test_duplicate_refresh_trigger_is_ignored() {
        let store = Arc::new(MockReportStore::with_records(vec![raw_record(
            "r1",
            "2026-08-01T10:00:00Z",
        )]));
        let service = ReportService::new(store.clone(), &test_config());
        service.refresh().await.unwrap();

        service.refresh_in_flight.store(true, Ordering::SeqCst);
        let outcome = service.refresh().await.unwrap();
        assert!(!outcome.refreshed);
        assert_eq!(outcome.total_reports, 1);
        // no second listing call went out
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        service.refresh_in_flight.store(false, Ordering::SeqCst);
    }

    #[tokio::test]
    async fn test_refresh_flag_clears_after_failure() {
        let store = Arc::new(MockReportStore::with_records(Vec::new()));
        store.fail_listing.store(true, Ordering::SeqCst);
        let service = ReportService::new(store.clone(), &test_config());

        assert!(service.refresh().await.is_err());

        // next trigger runs again instead of being suppressed forever
        store.fail_listing.store(false, Ordering::SeqCst);
        let outcome = service.refresh().await.unwrap();
        assert!(outcome.refreshed);
    }

    #[tokio::test]
    async fn test_apply_patch_updates_local_copy_after_ack() {
        let store = Arc::new(MockReportStore::with_records(vec![raw_record(
            "r1",
            "2026-08-01T10:00:00Z",
        )]));
        let service = ReportService::new(store.clone(), &test_config());
        service.refresh().await.unwrap();

        let updated = service
            .apply_patch(
                "r1",
                ReportPatch {
                    status: Some(ReportStatus::Seen),
                    progress: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ReportStatus::Seen);
        assert_eq!(updated.progress, ReportProgress::Unresolved);
        assert_eq!(service.get("r1").await.unwrap().status, ReportStatus::Seen);
    }

    #[tokio::test]
    async fn test_failed_ack_leaves_local_copy_unchanged() {
        let store = Arc::new(MockReportStore::with_records(vec![raw_record(
            "r1",
            "2026-08-01T10:00:00Z",
        )]));
        let service = ReportService::new(store.clone(), &test_config());
        service.refresh().await.unwrap();

        store.fail_updates.store(true, Ordering::SeqCst);
        let err = service
            .apply_patch(
                "r1",
                ReportPatch {
                    status: None,
                    progress: Some(ReportProgress::Resolved),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));

        assert_eq!(
            service.get("r1").await.unwrap().progress,
            ReportProgress::Unresolved
        );
    }

    #[tokio::test]
    async fn test_empty_patch_is_rejected_before_the_store() {
        let store = Arc::new(MockReportStore::with_records(vec![raw_record(
            "r1",
            "2026-08-01T10:00:00Z",
        )]));
        let service = ReportService::new(store.clone(), &test_config());
        service.refresh().await.unwrap();

        let err = service.apply_patch("r1", ReportPatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_patch_for_unknown_report_is_not_found() {
        let store = Arc::new(MockReportStore::with_records(Vec::new()));
        let service = ReportService::new(store.clone(), &test_config());
        service.refresh().await.unwrap();

        let err = service
            .apply_patch(
                "ghost",
                ReportPatch {
                    status: Some(ReportStatus::Seen),
                    progress: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 0);
    }
}
