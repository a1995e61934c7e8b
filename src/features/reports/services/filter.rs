use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::features::reports::models::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeenFilter {
    #[default]
    All,
    Seen,
    Unseen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedFilter {
    #[default]
    None,
    Resolved,
}

/// Active filter selections for a report view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportFilters {
    pub date: DateFilter,
    pub seen: SeenFilter,
    pub resolved: ResolvedFilter,
}

/// Projects the canonical set down to the visible subset, preserving input
/// order. The date filter applies first; on the status axis the resolved
/// filter wins over any seen/unseen selection, and the remaining branches
/// exclude resolved reports. With no status-axis filter active, resolved
/// reports pass through interleaved.
pub fn project(reports: &[Report], filters: &ReportFilters, now: DateTime<Utc>) -> Vec<Report> {
    let mut visible: Vec<Report> = reports
        .iter()
        .filter(|report| in_date_window(report, filters.date, now))
        .cloned()
        .collect();

    match (filters.resolved, filters.seen) {
        (ResolvedFilter::Resolved, _) => visible.retain(|r| r.is_resolved()),
        (ResolvedFilter::None, SeenFilter::Seen) => {
            visible.retain(|r| r.is_seen() && !r.is_resolved())
        }
        (ResolvedFilter::None, SeenFilter::Unseen) => {
            visible.retain(|r| !r.is_seen() && !r.is_resolved())
        }
        (ResolvedFilter::None, SeenFilter::All) => {}
    }

    visible
}

/// Unparseable timestamps fail every dated window but pass `All`.
fn in_date_window(report: &Report, filter: DateFilter, now: DateTime<Utc>) -> bool {
    if filter == DateFilter::All {
        return true;
    }

    let Some(uploaded_at) = report.uploaded_at.datetime() else {
        return false;
    };

    let today = now.date_naive();
    let uploaded = uploaded_at.date_naive();

    match filter {
        DateFilter::All => true,
        DateFilter::Today => uploaded == today,
        // Inclusive boundary: a report from exactly seven days ago stays in
        DateFilter::Week => uploaded >= today - Duration::days(7),
        DateFilter::Month => uploaded >= today.with_day(1).unwrap_or(today),
    }
}
