pub mod dashboard_handler;

pub use dashboard_handler::{get_summary, get_weekly_uploads, DashboardState};
