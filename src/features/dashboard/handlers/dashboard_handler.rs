use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::core::error::Result;
use crate::core::extractor::AuthorityUser;
use crate::features::dashboard::dtos::{
    DailyUploadDto, DashboardQuery, StatusBreakdownDto, WeeklyUploadsDto,
};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// State for dashboard handlers
#[derive(Clone)]
pub struct DashboardState {
    pub dashboard_service: Arc<DashboardService>,
}

/// Status breakdown for the ring and pie widgets (authority only)
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Mutually exclusive status counts and percentages", body = ApiResponse<StatusBreakdownDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority account required")
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn get_summary(
    AuthorityUser(_session): AuthorityUser,
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<StatusBreakdownDto>>> {
    let breakdown = state
        .dashboard_service
        .status_breakdown(&query.filters(), Utc::now())
        .await;

    Ok(Json(ApiResponse::success(
        Some(breakdown.into()),
        None,
        None,
    )))
}

/// Uploads per day over the trailing week (authority only)
#[utoipa::path(
    get,
    path = "/api/dashboard/weekly-uploads",
    responses(
        (status = 200, description = "Seven daily buckets, oldest first", body = ApiResponse<WeeklyUploadsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority account required")
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn get_weekly_uploads(
    AuthorityUser(_session): AuthorityUser,
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<WeeklyUploadsDto>>> {
    let series = state.dashboard_service.weekly_uploads(Utc::now()).await;

    let dto = WeeklyUploadsDto {
        days: series.into_iter().map(DailyUploadDto::from).collect(),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}
