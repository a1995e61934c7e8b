use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::session::dtos::{LoginRequestDto, LoginResponseDto, MeResponseDto};
use crate::features::session::models::{SessionContext, SessionToken};
use crate::features::session::services::SessionService;
use crate::shared::types::ApiResponse;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 502, description = "Report store unreachable")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (token, context) = service.login(&dto.email, &dto.password).await?;

    let response = LoginResponseDto {
        token,
        token_type: "Bearer".to_string(),
        email: context.email,
        role: context.role,
    };

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session ended"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<SessionService>>,
    SessionToken(token): SessionToken,
) -> Result<Json<ApiResponse<()>>> {
    service.logout(&token).await;
    Ok(Json(ApiResponse::success(
        None,
        Some("Logged out".to_string()),
        None,
    )))
}

/// Current session info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Session info", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn get_me(session: SessionContext) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}
