use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// OpenAPI schema of the multipart upload form.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFormDto {
    /// The road photo to classify and submit
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    /// Street address of the damage
    pub address: String,
    /// District name
    #[schema(example = "Mahabubnagar")]
    pub district: String,
    /// 6-digit postal code
    #[schema(example = "509001")]
    pub pincode: String,
    /// Optional free-text damage description
    pub description: Option<String>,
}

/// Fields collected from the multipart upload form
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub address: String,
    pub district: String,
    pub pincode: String,
    pub damage_description: Option<String>,
    pub image: UploadedImage,
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Response DTO for a submitted report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    /// Label assigned by the classification service
    pub classification: String,
    pub confidence: f64,
    pub annotated_image_url: Option<String>,
    /// True once the report store accepted the submission
    pub submitted: bool,
}
