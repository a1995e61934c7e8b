mod report;

pub use report::{Report, ReportProgress, ReportStatus, RoadLocation, StatusLabel, UploadTime};
