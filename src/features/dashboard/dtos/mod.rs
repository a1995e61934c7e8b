mod dashboard_dto;

pub use dashboard_dto::{DailyUploadDto, DashboardQuery, StatusBreakdownDto, WeeklyUploadsDto};
