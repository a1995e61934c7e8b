use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AuthorityUser};
use crate::features::reports::dtos::{
    RefreshResponseDto, ReportListDto, ReportListQuery, ReportResponseDto, UpdateReportDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta, PaginationMeta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
}

/// List reports with filters and pagination (authority only)
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Filtered report listing", body = ApiResponse<ReportListDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority account required")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    AuthorityUser(_session): AuthorityUser,
    State(state): State<ReportState>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<ReportListDto>>> {
    let visible = state
        .report_service
        .visible_reports(&query.filters(), Utc::now())
        .await;

    let pagination = query.pagination();
    let total = visible.len() as i64;
    let offset = pagination.offset().min(total) as usize;
    let limit = pagination.limit() as usize;

    let fallback = state.report_service.fallback_address();
    let reports: Vec<ReportResponseDto> = visible
        .iter()
        .skip(offset)
        .take(limit)
        .map(|r| ReportResponseDto::from_report(r, fallback))
        .collect();

    let dto = ReportListDto {
        reports,
        pagination: PaginationMeta::new(pagination.page, pagination.limit(), total),
    };

    Ok(Json(ApiResponse::success(
        Some(dto),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by ID (authority only)
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    AuthorityUser(_session): AuthorityUser,
    State(state): State<ReportState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get(&id).await?;
    let dto = ReportResponseDto::from_report(&report, state.report_service.fallback_address());
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Update report status and/or progress (authority only)
#[utoipa::path(
    patch,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Empty update"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found"),
        (status = 502, description = "Report store unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_report(
    AuthorityUser(session): AuthorityUser,
    State(state): State<ReportState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.apply_patch(&id, dto.into()).await?;
    tracing::info!(
        "Report {} updated by {}: status={}, progress={}",
        report.id,
        session.email,
        report.status,
        report.progress
    );

    let dto = ReportResponseDto::from_report(&report, state.report_service.fallback_address());
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Rebuild the report snapshot from the store (authority only)
#[utoipa::path(
    post,
    path = "/api/reports/refresh",
    responses(
        (status = 200, description = "Refresh outcome", body = ApiResponse<RefreshResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Report store unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn refresh_reports(
    AuthorityUser(_session): AuthorityUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<RefreshResponseDto>>> {
    let outcome = state.report_service.refresh().await?;

    let message = if outcome.refreshed {
        "Reports refreshed successfully"
    } else {
        "Refresh already in progress"
    };

    let dto = RefreshResponseDto {
        refreshed: outcome.refreshed,
        total_reports: outcome.total_reports as i64,
    };

    Ok(Json(ApiResponse::success(
        Some(dto),
        Some(message.to_string()),
        None,
    )))
}
