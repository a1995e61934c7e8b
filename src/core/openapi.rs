use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
    services as reports_services,
};
use crate::features::session::{
    dtos as session_dtos, handlers as session_handlers, models as session_models,
};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        session_handlers::session_handler::login,
        session_handlers::session_handler::logout,
        session_handlers::session_handler::get_me,
        // Reports
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::update_report,
        reports_handlers::report_handler::refresh_reports,
        // Dashboard
        dashboard_handlers::dashboard_handler::get_summary,
        dashboard_handlers::dashboard_handler::get_weekly_uploads,
        // Uploads
        uploads_handlers::upload_handler::submit_upload,
    ),
    components(
        schemas(
            // Shared
            Meta,
            PaginationMeta,
            // Session
            session_models::UserRole,
            session_models::SessionContext,
            session_dtos::LoginRequestDto,
            session_dtos::LoginResponseDto,
            session_dtos::MeResponseDto,
            ApiResponse<session_dtos::LoginResponseDto>,
            ApiResponse<session_dtos::MeResponseDto>,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportProgress,
            reports_models::StatusLabel,
            reports_services::DateFilter,
            reports_services::SeenFilter,
            reports_services::ResolvedFilter,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportListDto,
            reports_dtos::UpdateReportDto,
            reports_dtos::RefreshResponseDto,
            ApiResponse<reports_dtos::ReportListDto>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<reports_dtos::RefreshResponseDto>,
            // Dashboard
            dashboard_dtos::StatusBreakdownDto,
            dashboard_dtos::DailyUploadDto,
            dashboard_dtos::WeeklyUploadsDto,
            ApiResponse<dashboard_dtos::StatusBreakdownDto>,
            ApiResponse<dashboard_dtos::WeeklyUploadsDto>,
            // Uploads
            uploads_dtos::UploadFormDto,
            uploads_dtos::UploadResponseDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "reports", description = "Report table, detail and mutations (authority only)"),
        (name = "dashboard", description = "Status breakdown and weekly uploads (authority only)"),
        (name = "uploads", description = "Road damage photo submission"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "SafeStreet API",
        version = "0.1.0",
        description = "API documentation for SafeStreet",
    )
)]
pub struct ApiDoc;

/// Adds the bearer-token security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
