use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::features::reports::clients::{RawReportRecord, RawRoadLocation};
use crate::features::reports::models::{
    Report, ReportProgress, ReportStatus, RoadLocation, UploadTime,
};

/// Turns raw store records into the canonical report set: defaults applied,
/// per-address frequency derived, sorted most recent first.
///
/// The sort is stable, so records sharing a timestamp keep their source
/// order, and unparseable timestamps land after every real one.
pub fn normalize_reports(raw: Vec<RawReportRecord>) -> Vec<Report> {
    let mut reports: Vec<Report> = raw.into_iter().map(canonicalize).collect();

    // First pass: occurrence count per resolved address
    let mut address_counts: HashMap<String, u32> = HashMap::new();
    for report in &reports {
        *address_counts
            .entry(report.road_location.frequency_key())
            .or_insert(0) += 1;
    }

    // Second pass: assign each report its address frequency
    for report in &mut reports {
        report.frequency = address_counts
            .get(&report.road_location.frequency_key())
            .copied()
            .unwrap_or(1);
    }

    reports.sort_by(
        |a, b| match (a.uploaded_at.datetime(), b.uploaded_at.datetime()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        },
    );

    reports
}

fn canonicalize(raw: RawReportRecord) -> Report {
    Report {
        id: raw.id,
        reporter_email: raw.user_email,
        uploaded_at: parse_upload_time(raw.uploaded_at.as_deref()),
        road_location: convert_location(raw.road_location),
        damage_description: raw.damage_description.filter(|d| !d.trim().is_empty()),
        image_url: raw.image_url,
        annotated_image_url: raw.predicted_image_url,
        status: parse_status(raw.status.as_deref()),
        progress: parse_progress(raw.progress.as_deref()),
        frequency: 1,
    }
}

fn convert_location(raw: Option<RawRoadLocation>) -> RoadLocation {
    match raw {
        Some(RawRoadLocation::Structured {
            address,
            district,
            pincode,
        }) => RoadLocation::Structured {
            address,
            district,
            pincode,
        },
        Some(RawRoadLocation::Text(text)) => RoadLocation::Text(text),
        None => RoadLocation::Text(String::new()),
    }
}

/// Anything other than the literal "Seen" counts as unseen, matching how
/// the store treats the field.
fn parse_status(raw: Option<&str>) -> ReportStatus {
    match raw {
        Some("Seen") => ReportStatus::Seen,
        _ => ReportStatus::Unseen,
    }
}

fn parse_progress(raw: Option<&str>) -> ReportProgress {
    match raw {
        Some("Resolved") => ReportProgress::Resolved,
        _ => ReportProgress::Unresolved,
    }
}

/// Never errors: anything that fails every known format becomes the
/// `Unparseable` sentinel.
fn parse_upload_time(raw: Option<&str>) -> UploadTime {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UploadTime::Unparseable;
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return UploadTime::At(ts.with_timezone(&Utc));
    }

    // Store records written before timestamps were normalized
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return UploadTime::At(naive.and_utc());
        }
    }

    UploadTime::Unparseable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_record(id: &str, uploaded_at: Option<&str>, location: Option<RawRoadLocation>) -> RawReportRecord {
        RawReportRecord {
            id: id.to_string(),
            user_email: Some(format!("{}@safestreet.test", id)),
            uploaded_at: uploaded_at.map(str::to_string),
            road_location: location,
            status: None,
            progress: None,
            damage_description: None,
            image_url: None,
            predicted_image_url: None,
        }
    }

    fn text_location(text: &str) -> Option<RawRoadLocation> {
        Some(RawRoadLocation::Text(text.to_string()))
    }

    #[test]
    fn test_missing_status_and_progress_default() {
        let reports = normalize_reports(vec![raw_record(
            "r1",
            Some("2026-08-01T10:00:00Z"),
            text_location("Main road"),
        )]);
        assert_eq!(reports[0].status, ReportStatus::Unseen);
        assert_eq!(reports[0].progress, ReportProgress::Unresolved);
    }

    #[test]
    fn test_unknown_status_string_falls_back_to_default() {
        let mut record = raw_record("r1", Some("2026-08-01T10:00:00Z"), text_location("Main road"));
        record.status = Some("Reviewed".to_string());
        record.progress = Some("InProgress".to_string());

        let reports = normalize_reports(vec![record]);
        assert_eq!(reports[0].status, ReportStatus::Unseen);
        assert_eq!(reports[0].progress, ReportProgress::Unresolved);
    }

    #[test]
    fn test_frequency_counts_shared_addresses() {
        // Reports at A, A, B normalize to frequencies [2, 2, 1]
        let reports = normalize_reports(vec![
            raw_record("r1", Some("2026-08-03T10:00:00Z"), text_location("Street A")),
            raw_record("r2", Some("2026-08-02T10:00:00Z"), text_location("Street A")),
            raw_record("r3", Some("2026-08-01T10:00:00Z"), text_location("Street B")),
        ]);

        let by_id: std::collections::HashMap<_, _> =
            reports.iter().map(|r| (r.id.as_str(), r.frequency)).collect();
        assert_eq!(by_id["r1"], 2);
        assert_eq!(by_id["r2"], 2);
        assert_eq!(by_id["r3"], 1);
    }

    #[test]
    fn test_blank_addresses_share_the_unknown_bucket() {
        let reports = normalize_reports(vec![
            raw_record("r1", Some("2026-08-03T10:00:00Z"), text_location("")),
            raw_record("r2", Some("2026-08-02T10:00:00Z"), None),
            raw_record(
                "r3",
                Some("2026-08-01T10:00:00Z"),
                Some(RawRoadLocation::Structured {
                    address: None,
                    district: Some("Mahabubnagar".to_string()),
                    pincode: None,
                }),
            ),
        ]);

        for report in &reports {
            assert_eq!(report.frequency, 3, "report {} not grouped", report.id);
        }
    }

    #[test]
    fn test_sorted_most_recent_first() {
        let reports = normalize_reports(vec![
            raw_record("old", Some("2026-08-01T10:00:00Z"), text_location("A")),
            raw_record("new", Some("2026-08-05T10:00:00Z"), text_location("B")),
            raw_record("mid", Some("2026-08-03T10:00:00Z"), text_location("C")),
        ]);

        let ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_timestamps() {
        let reports = normalize_reports(vec![
            raw_record("first", Some("2026-08-05T10:00:00Z"), text_location("A")),
            raw_record("second", Some("2026-08-05T10:00:00Z"), text_location("B")),
            raw_record("third", Some("2026-08-05T10:00:00Z"), text_location("C")),
        ]);

        let ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_malformed_timestamp_sorts_last_and_formats_na() {
        let reports = normalize_reports(vec![
            raw_record("garbage", Some("not-a-date"), text_location("A")),
            raw_record("real", Some("2026-08-05T10:00:00Z"), text_location("B")),
        ]);

        assert_eq!(reports[0].id, "real");
        assert_eq!(reports[1].id, "garbage");
        assert_eq!(reports[1].uploaded_at, UploadTime::Unparseable);
        assert_eq!(reports[1].uploaded_at.format_date(), "N/A");
    }

    #[test]
    fn test_parse_upload_time_accepts_legacy_formats() {
        assert!(matches!(
            parse_upload_time(Some("2026-08-05T10:00:00.123")),
            UploadTime::At(_)
        ));
        assert!(matches!(
            parse_upload_time(Some("2026-08-05 10:00:00")),
            UploadTime::At(_)
        ));
        assert_eq!(parse_upload_time(Some("")), UploadTime::Unparseable);
        assert_eq!(parse_upload_time(None), UploadTime::Unparseable);
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(normalize_reports(Vec::new()).is_empty());
    }
}
