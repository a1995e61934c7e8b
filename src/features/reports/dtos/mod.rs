mod report_dto;

pub use report_dto::{
    RefreshResponseDto, ReportListDto, ReportListQuery, ReportResponseDto, UpdateReportDto,
};
