use std::sync::Arc;

use axum::{extract::Multipart, extract::State, Json};

use crate::core::error::{AppError, Result};
use crate::features::session::models::SessionContext;
use crate::features::uploads::dtos::{UploadFormDto, UploadRequest, UploadResponseDto, UploadedImage};
use crate::features::uploads::services::UploadService;
use crate::shared::types::ApiResponse;

/// State for upload handlers
#[derive(Clone)]
pub struct UploadState {
    pub upload_service: Arc<UploadService>,
}

/// Submit a road damage report (multipart: image, address, district,
/// pincode, description)
#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(
        content = UploadFormDto,
        content_type = "multipart/form-data",
        description = "Road photo with address details",
    ),
    responses(
        (status = 200, description = "Report classified and submitted", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Validation failure (file type, address, classification)"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Classifier or report store unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "uploads"
)]
pub async fn submit_upload(
    session: SessionContext,
    State(state): State<UploadState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponseDto>>> {
    let request = parse_upload_form(multipart).await?;
    let response = state.upload_service.submit(&session.email, request).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

async fn parse_upload_form(mut multipart: Multipart) -> Result<UploadRequest> {
    let mut address = None;
    let mut district = None;
    let mut pincode = None;
    let mut damage_description = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload.jpg")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read image: {}", e)))?;
                image = Some(UploadedImage {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "address" => address = Some(read_text_field(field).await?),
            "district" => district = Some(read_text_field(field).await?),
            "pincode" => pincode = Some(read_text_field(field).await?),
            "description" => damage_description = Some(read_text_field(field).await?),
            _ => {}
        }
    }

    let image =
        image.ok_or_else(|| AppError::Validation("An image file is required".to_string()))?;

    Ok(UploadRequest {
        address: address.unwrap_or_default(),
        district: district.unwrap_or_default(),
        pincode: pincode.unwrap_or_default(),
        damage_description,
        image,
    })
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {}", e)))
}
