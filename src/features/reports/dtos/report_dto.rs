use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::clients::ReportPatch;
use crate::features::reports::models::{Report, ReportProgress, ReportStatus, StatusLabel};
use crate::features::reports::services::{DateFilter, ReportFilters, ResolvedFilter, SeenFilter};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::{PaginationMeta, PaginationQuery};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query parameters for the report table
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReportListQuery {
    /// Date window ("all", "today", "week", "month")
    #[serde(default)]
    pub date_filter: DateFilter,

    /// Seen-axis filter ("all", "seen", "unseen"); ignored while the
    /// resolved filter is active
    #[serde(default)]
    pub seen_filter: SeenFilter,

    /// Resolved filter ("none", "resolved"); wins over the seen filter
    #[serde(default)]
    pub resolved_filter: ResolvedFilter,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl ReportListQuery {
    pub fn filters(&self) -> ReportFilters {
        ReportFilters {
            date: self.date_filter,
            seen: self.seen_filter,
            resolved: self.resolved_filter,
        }
    }

    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Report row for table views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: String,
    pub reporter_email: Option<String>,
    /// Display address (placeholder substituted when the source record has
    /// no usable address)
    pub location: String,
    /// Number of reports sharing this report's address, itself included
    pub frequency: u32,
    /// "YYYY-MM-DD", or "N/A" when the source timestamp was unusable
    pub uploaded_date: String,
    /// "HH:MM", or "N/A"
    pub uploaded_time: String,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub status: ReportStatus,
    pub progress: ReportProgress,
    /// Label with precedence Resolved > Seen > Unseen
    pub status_label: StatusLabel,
    pub damage_description: Option<String>,
    pub image_url: Option<String>,
    pub annotated_image_url: Option<String>,
}

impl ReportResponseDto {
    pub fn from_report(report: &Report, fallback_address: &str) -> Self {
        Self {
            id: report.id.clone(),
            reporter_email: report.reporter_email.clone(),
            location: report.road_location.display_address(fallback_address),
            frequency: report.frequency,
            uploaded_date: report.uploaded_at.format_date(),
            uploaded_time: report.uploaded_at.format_time(),
            uploaded_at: report.uploaded_at.datetime(),
            status: report.status,
            progress: report.progress,
            status_label: report.status_label(),
            damage_description: report.damage_description.clone(),
            image_url: report.image_url.clone(),
            annotated_image_url: report.annotated_image_url.clone(),
        }
    }
}

/// Paginated report listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportListDto {
    pub reports: Vec<ReportResponseDto>,
    pub pagination: PaginationMeta,
}

/// Partial update for a report; at least one field must be set
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct UpdateReportDto {
    pub status: Option<ReportStatus>,
    pub progress: Option<ReportProgress>,
}

impl From<UpdateReportDto> for ReportPatch {
    fn from(dto: UpdateReportDto) -> Self {
        ReportPatch {
            status: dto.status,
            progress: dto.progress,
        }
    }
}

/// Outcome of a refresh trigger
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponseDto {
    /// False when the trigger was ignored because a refresh was already in
    /// flight
    pub refreshed: bool,
    pub total_reports: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{RoadLocation, UploadTime};

    #[test]
    fn test_dto_substitutes_fallback_address() {
        let report = Report {
            id: "r1".to_string(),
            reporter_email: Some("user@safestreet.test".to_string()),
            uploaded_at: UploadTime::Unparseable,
            road_location: RoadLocation::Structured {
                address: None,
                district: None,
                pincode: None,
            },
            damage_description: None,
            image_url: None,
            annotated_image_url: None,
            status: ReportStatus::Unseen,
            progress: ReportProgress::Unresolved,
            frequency: 1,
        };

        let dto = ReportResponseDto::from_report(&report, "placeholder address");
        assert_eq!(dto.location, "placeholder address");
        assert_eq!(dto.uploaded_date, "N/A");
        assert_eq!(dto.uploaded_time, "N/A");
        assert!(dto.uploaded_at.is_none());
        assert_eq!(dto.status_label, StatusLabel::Unseen);
    }

    #[test]
    fn test_list_query_defaults_to_pass_through_filters() {
        let query: ReportListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.filters(), ReportFilters::default());
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_list_query_parses_filter_values() {
        let query: ReportListQuery = serde_json::from_str(
            r#"{"date_filter":"week","seen_filter":"seen","resolved_filter":"resolved"}"#,
        )
        .unwrap();
        let filters = query.filters();
        assert_eq!(filters.date, DateFilter::Week);
        assert_eq!(filters.seen, SeenFilter::Seen);
        assert_eq!(filters.resolved, ResolvedFilter::Resolved);
    }
}
