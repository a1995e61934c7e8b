pub mod report_handler;

pub use report_handler::{
    get_report, list_reports, refresh_reports, update_report, ReportState,
};
