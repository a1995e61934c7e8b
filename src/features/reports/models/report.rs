use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::UNKNOWN_LOCATION;

/// Whether an authority user has opened the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReportStatus {
    Unseen,
    Seen,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Unseen => write!(f, "Unseen"),
            ReportStatus::Seen => write!(f, "Seen"),
        }
    }
}

/// Whether the reported damage has been marked fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReportProgress {
    Unresolved,
    Resolved,
}

impl std::fmt::Display for ReportProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportProgress::Unresolved => write!(f, "Unresolved"),
            ReportProgress::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Label shown in the status column. Resolved wins over the seen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StatusLabel {
    Resolved,
    Seen,
    Unseen,
}

/// Upload timestamp. Source records occasionally carry timestamps the
/// store never validated; those normalize to `Unparseable`, which sorts
/// after every real timestamp and renders as "N/A".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTime {
    At(DateTime<Utc>),
    Unparseable,
}

impl UploadTime {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            UploadTime::At(ts) => Some(*ts),
            UploadTime::Unparseable => None,
        }
    }

    pub fn format_date(&self) -> String {
        match self {
            UploadTime::At(ts) => ts.format("%Y-%m-%d").to_string(),
            UploadTime::Unparseable => "N/A".to_string(),
        }
    }

    pub fn format_time(&self) -> String {
        match self {
            UploadTime::At(ts) => ts.format("%H:%M").to_string(),
            UploadTime::Unparseable => "N/A".to_string(),
        }
    }
}

/// Where the damage was reported. Older records carry a free-form string,
/// newer ones a structured address; neither shape guarantees a usable
/// address value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoadLocation {
    Structured {
        address: Option<String>,
        district: Option<String>,
        pincode: Option<String>,
    },
    Text(String),
}

impl RoadLocation {
    /// Key used for frequency grouping. Reports with no usable address all
    /// collapse into the same `UNKNOWN_LOCATION` bucket.
    pub fn frequency_key(&self) -> String {
        match self {
            RoadLocation::Structured { address, .. } => address
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .unwrap_or(UNKNOWN_LOCATION)
                .to_string(),
            RoadLocation::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    UNKNOWN_LOCATION.to_string()
                } else {
                    trimmed.to_string()
                }
            }
        }
    }

    /// Human-readable address for table rows. Structured locations render
    /// as "address, district pincode"; missing addresses fall back to the
    /// configured placeholder.
    pub fn display_address(&self, fallback: &str) -> String {
        match self {
            RoadLocation::Structured {
                address,
                district,
                pincode,
            } => {
                let address = address.as_deref().map(str::trim).filter(|a| !a.is_empty());
                match address {
                    Some(address) => {
                        let suffix = [district.as_deref(), pincode.as_deref()]
                            .into_iter()
                            .flatten()
                            .map(str::trim)
                            .filter(|part| !part.is_empty())
                            .collect::<Vec<_>>()
                            .join(" ");
                        if suffix.is_empty() {
                            address.to_string()
                        } else {
                            format!("{}, {}", address, suffix)
                        }
                    }
                    None => fallback.to_string(),
                }
            }
            RoadLocation::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    fallback.to_string()
                } else {
                    trimmed.to_string()
                }
            }
        }
    }
}

/// Canonical report entity, rebuilt from raw store records on every
/// refresh. `frequency` is derived at normalization time and never flows
/// back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: String,
    pub reporter_email: Option<String>,
    pub uploaded_at: UploadTime,
    pub road_location: RoadLocation,
    pub damage_description: Option<String>,
    pub image_url: Option<String>,
    pub annotated_image_url: Option<String>,
    pub status: ReportStatus,
    pub progress: ReportProgress,
    pub frequency: u32,
}

impl Report {
    pub fn is_seen(&self) -> bool {
        self.status == ReportStatus::Seen
    }

    pub fn is_resolved(&self) -> bool {
        self.progress == ReportProgress::Resolved
    }

    /// Display label with precedence Resolved > Seen > Unseen
    pub fn status_label(&self) -> StatusLabel {
        if self.is_resolved() {
            StatusLabel::Resolved
        } else if self.is_seen() {
            StatusLabel::Seen
        } else {
            StatusLabel::Unseen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_key_prefers_structured_address() {
        let location = RoadLocation::Structured {
            address: Some("NH-44 service road".to_string()),
            district: Some("Mahabubnagar".to_string()),
            pincode: Some("509001".to_string()),
        };
        assert_eq!(location.frequency_key(), "NH-44 service road");
    }

    #[test]
    fn test_frequency_key_falls_back_when_blank() {
        let blank_structured = RoadLocation::Structured {
            address: Some("   ".to_string()),
            district: None,
            pincode: None,
        };
        assert_eq!(blank_structured.frequency_key(), UNKNOWN_LOCATION);

        let blank_text = RoadLocation::Text(String::new());
        assert_eq!(blank_text.frequency_key(), UNKNOWN_LOCATION);
    }

    #[test]
    fn test_display_address_composes_structured_parts() {
        let location = RoadLocation::Structured {
            address: Some("Road no 10, Vijaynagar colony".to_string()),
            district: Some("Mahabubnagar".to_string()),
            pincode: Some("509001".to_string()),
        };
        assert_eq!(
            location.display_address("fallback"),
            "Road no 10, Vijaynagar colony, Mahabubnagar 509001"
        );
    }

    #[test]
    fn test_display_address_uses_fallback_for_missing_address() {
        let location = RoadLocation::Structured {
            address: None,
            district: Some("Mahabubnagar".to_string()),
            pincode: None,
        };
        assert_eq!(location.display_address("fallback"), "fallback");
    }

    #[test]
    fn test_status_label_precedence() {
        let mut report = Report {
            id: "r1".to_string(),
            reporter_email: None,
            uploaded_at: UploadTime::Unparseable,
            road_location: RoadLocation::Text("somewhere".to_string()),
            damage_description: None,
            image_url: None,
            annotated_image_url: None,
            status: ReportStatus::Seen,
            progress: ReportProgress::Resolved,
            frequency: 1,
        };
        // Resolved wins even when the report was seen
        assert_eq!(report.status_label(), StatusLabel::Resolved);

        report.progress = ReportProgress::Unresolved;
        assert_eq!(report.status_label(), StatusLabel::Seen);

        report.status = ReportStatus::Unseen;
        assert_eq!(report.status_label(), StatusLabel::Unseen);
    }

    #[test]
    fn test_unparseable_upload_time_formats_as_na() {
        assert_eq!(UploadTime::Unparseable.format_date(), "N/A");
        assert_eq!(UploadTime::Unparseable.format_time(), "N/A");
    }
}
