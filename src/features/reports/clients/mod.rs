mod report_store_client;

pub use report_store_client::{
    HttpReportStore, RawReportRecord, RawRoadLocation, ReportPatch, ReportStore, ReportSubmission,
    StoreLoginResponse, SubmissionLocation,
};
