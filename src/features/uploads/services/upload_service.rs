use std::sync::Arc;

use base64::prelude::*;

use crate::core::config::ClassifierConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::clients::{ReportStore, ReportSubmission, SubmissionLocation};
use crate::features::uploads::clients::RoadClassifier;
use crate::features::uploads::dtos::{UploadRequest, UploadResponseDto};
use crate::shared::validation::PINCODE_REGEX;

/// Image types accepted for upload
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Districts served by the reporting system
pub const KNOWN_DISTRICTS: [&str; 33] = [
    "Adilabad",
    "Bhadradri Kothagudem",
    "Hyderabad",
    "Jagtial",
    "Jangaon",
    "Jayashankar Bhupalpally",
    "Jogulamba Gadwal",
    "Kamareddy",
    "Karimnagar",
    "Khammam",
    "Komaram Bheem Asifabad",
    "Mahabubabad",
    "Mahabubnagar",
    "Mancherial",
    "Medak",
    "Medchal-Malkajgiri",
    "Mulugu",
    "Nagarkurnool",
    "Nalgonda",
    "Narayanpet",
    "Nirmal",
    "Nizamabad",
    "Peddapalli",
    "Rajanna Sircilla",
    "Rangareddy",
    "Sangareddy",
    "Siddipet",
    "Suryapet",
    "Vikarabad",
    "Wanaparthy",
    "Warangal Rural",
    "Warangal Urban",
    "Yadadri Bhuvanagiri",
];

/// Drives the upload flow: local validation first, then the classification
/// boundary, then submission to the report store. Validation failures never
/// reach the network.
pub struct UploadService {
    classifier: Arc<dyn RoadClassifier>,
    store: Arc<dyn ReportStore>,
    required_label: String,
}

impl UploadService {
    pub fn new(
        classifier: Arc<dyn RoadClassifier>,
        store: Arc<dyn ReportStore>,
        config: &ClassifierConfig,
    ) -> Self {
        Self {
            classifier,
            store,
            required_label: config.required_label.clone(),
        }
    }

    pub async fn submit(
        &self,
        reporter_email: &str,
        request: UploadRequest,
    ) -> Result<UploadResponseDto> {
        validate_image_type(&request.image.content_type)?;
        validate_location(&request.address, &request.district, &request.pincode)?;

        let classification = self
            .classifier
            .classify(
                request.image.bytes.clone(),
                &request.image.filename,
                &request.image.content_type,
            )
            .await?;

        if classification.label != self.required_label {
            return Err(AppError::Validation(format!(
                "Image was classified as '{}'; only '{}' images can be submitted",
                classification.label, self.required_label
            )));
        }

        let submission = ReportSubmission {
            user_email: reporter_email.to_string(),
            road_location: SubmissionLocation {
                address: request.address.trim().to_string(),
                district: request.district.trim().to_string(),
                pincode: request.pincode.trim().to_string(),
            },
            damage_description: request
                .damage_description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            image_name: request.image.filename.clone(),
            image_data: BASE64_STANDARD.encode(&request.image.bytes),
            classification: classification.label.clone(),
            confidence: classification.confidence,
            predicted_image_url: classification.annotated_image_url.clone(),
        };

        self.store.submit_report(&submission).await?;

        tracing::info!(
            "Report submitted by {} for {} ({})",
            reporter_email,
            submission.road_location.address,
            submission.road_location.district
        );

        Ok(UploadResponseDto {
            classification: classification.label,
            confidence: classification.confidence,
            annotated_image_url: classification.annotated_image_url,
            submitted: true,
        })
    }
}

fn validate_image_type(content_type: &str) -> Result<()> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(AppError::Validation(format!(
            "Unsupported file type '{}'; JPEG, JPG and PNG only",
            content_type
        )));
    }
    Ok(())
}

fn validate_location(address: &str, district: &str, pincode: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(AppError::Validation(
            "Address is required before uploading".to_string(),
        ));
    }

    let district = district.trim();
    if district.is_empty() {
        return Err(AppError::Validation(
            "District is required before uploading".to_string(),
        ));
    }
    if !KNOWN_DISTRICTS.contains(&district) {
        return Err(AppError::Validation(format!(
            "Unknown district '{}'",
            district
        )));
    }

    if !PINCODE_REGEX.is_match(pincode.trim()) {
        return Err(AppError::Validation(
            "Pincode must be a valid 6-digit postal code".to_string(),
        ));
    }

    Ok(())
}
