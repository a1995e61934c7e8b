use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::features::reports::models::Report;

/// Mutually exclusive status counts over a report set. Progress is
/// evaluated first: a resolved report counts only in the resolved bucket,
/// never as seen or unseen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub seen_not_resolved_count: i64,
    pub unseen_not_resolved_count: i64,
    pub resolved_count: i64,
    /// seen_not_resolved_count + unseen_not_resolved_count
    pub unresolved_count: i64,
    /// Sum of the three exclusive counts, floored at 1 so percentage math
    /// never divides by zero
    pub total_reports: i64,
    pub seen_pct: i64,
    pub unseen_pct: i64,
    pub resolved_pct: i64,
    pub unresolved_pct: i64,
}

/// Computes the exclusive breakdown. Percentages are rounded independently
/// and may not sum to exactly 100; consumers treat that as expected
/// rounding drift.
pub fn aggregate(reports: &[Report]) -> StatusBreakdown {
    let mut seen_not_resolved_count = 0i64;
    let mut unseen_not_resolved_count = 0i64;
    let mut resolved_count = 0i64;

    for report in reports {
        if report.is_resolved() {
            resolved_count += 1;
        } else if report.is_seen() {
            seen_not_resolved_count += 1;
        } else {
            unseen_not_resolved_count += 1;
        }
    }

    let unresolved_count = seen_not_resolved_count + unseen_not_resolved_count;
    let total_reports = (seen_not_resolved_count + unseen_not_resolved_count + resolved_count).max(1);

    let pct = |count: i64| ((count as f64 / total_reports as f64) * 100.0).round() as i64;

    StatusBreakdown {
        seen_not_resolved_count,
        unseen_not_resolved_count,
        resolved_count,
        unresolved_count,
        total_reports,
        seen_pct: pct(seen_not_resolved_count),
        unseen_pct: pct(unseen_not_resolved_count),
        resolved_pct: pct(resolved_count),
        unresolved_pct: pct(unresolved_count),
    }
}

/// One bar of the weekly uploads chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUploadCount {
    /// Weekday abbreviation ("Mon", "Tue", ...)
    pub day: String,
    pub date: NaiveDate,
    pub count: i64,
}

/// Buckets reports by calendar day over the trailing seven days (today
/// inclusive), zero-filling empty days, ordered oldest to newest.
pub fn weekly_upload_series(reports: &[Report], now: DateTime<Utc>) -> Vec<DailyUploadCount> {
    let today = now.date_naive();

    let mut series: Vec<DailyUploadCount> = (0..7)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            DailyUploadCount {
                day: date.format("%a").to_string(),
                date,
                count: 0,
            }
        })
        .collect();

    for report in reports {
        let Some(uploaded_at) = report.uploaded_at.datetime() else {
            continue;
        };
        let days_ago = (today - uploaded_at.date_naive()).num_days();
        if (0..7).contains(&days_ago) {
            series[(6 - days_ago) as usize].count += 1;
        }
    }

    series
}
