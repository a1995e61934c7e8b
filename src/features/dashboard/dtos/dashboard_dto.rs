use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::services::{
    DailyUploadCount, DateFilter, ReportFilters, ResolvedFilter, SeenFilter, StatusBreakdown,
};

/// Optional filter selections for the summary widgets. Defaults aggregate
/// the full canonical set.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// Date window ("all", "today", "week", "month")
    #[serde(default)]
    pub date_filter: DateFilter,

    /// Seen-axis filter ("all", "seen", "unseen")
    #[serde(default)]
    pub seen_filter: SeenFilter,

    /// Resolved filter ("none", "resolved"); wins over the seen filter
    #[serde(default)]
    pub resolved_filter: ResolvedFilter,
}

impl DashboardQuery {
    pub fn filters(&self) -> ReportFilters {
        ReportFilters {
            date: self.date_filter,
            seen: self.seen_filter,
            resolved: self.resolved_filter,
        }
    }
}

/// Mutually exclusive status counts with per-category percentages, consumed
/// by the ring and pie widgets
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusBreakdownDto {
    pub seen_count: i64,
    pub unseen_count: i64,
    pub resolved_count: i64,
    pub unresolved_count: i64,
    pub total_reports: i64,
    /// Percentages are rounded independently and may not sum to 100
    pub seen_pct: i64,
    pub unseen_pct: i64,
    pub resolved_pct: i64,
    pub unresolved_pct: i64,
}

impl From<StatusBreakdown> for StatusBreakdownDto {
    fn from(breakdown: StatusBreakdown) -> Self {
        Self {
            seen_count: breakdown.seen_not_resolved_count,
            unseen_count: breakdown.unseen_not_resolved_count,
            resolved_count: breakdown.resolved_count,
            unresolved_count: breakdown.unresolved_count,
            total_reports: breakdown.total_reports,
            seen_pct: breakdown.seen_pct,
            unseen_pct: breakdown.unseen_pct,
            resolved_pct: breakdown.resolved_pct,
            unresolved_pct: breakdown.unresolved_pct,
        }
    }
}

/// One bar of the weekly uploads chart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyUploadDto {
    /// Weekday abbreviation ("Mon", "Tue", ...)
    pub day: String,
    pub date: NaiveDate,
    pub count: i64,
}

impl From<DailyUploadCount> for DailyUploadDto {
    fn from(bucket: DailyUploadCount) -> Self {
        Self {
            day: bucket.day,
            date: bucket.date,
            count: bucket.count,
        }
    }
}

/// Trailing seven days of uploads, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklyUploadsDto {
    pub days: Vec<DailyUploadDto>,
}
