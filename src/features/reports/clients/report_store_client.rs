use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::ReportStoreConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{ReportProgress, ReportStatus};

/// Raw report record as returned by the store's listing endpoint.
/// Field names follow the store's wire contract; nothing past the
/// normalizer sees this shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReportRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: Option<String>,
    pub uploaded_at: Option<String>,
    pub road_location: Option<RawRoadLocation>,
    pub status: Option<String>,
    pub progress: Option<String>,
    pub damage_description: Option<String>,
    pub image_url: Option<String>,
    pub predicted_image_url: Option<String>,
}

/// The store stores locations either as a free-form string (older records)
/// or as a structured object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRoadLocation {
    Structured {
        address: Option<String>,
        district: Option<String>,
        pincode: Option<String>,
    },
    Text(String),
}

/// Partial update accepted by the store's mutation endpoint
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ReportProgress>,
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.progress.is_none()
    }
}

/// New report payload for the store's upload endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    pub user_email: String,
    pub road_location: SubmissionLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_description: Option<String>,
    pub image_name: String,
    /// Base64-encoded image bytes
    pub image_data: String,
    pub classification: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionLocation {
    pub address: String,
    pub district: String,
    pub pincode: String,
}

/// Login response from the store
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreLoginResponse {
    pub success: bool,
    pub user_type: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListImagesResponse {
    success: bool,
    #[serde(default)]
    images: Vec<RawReportRecord>,
    message: Option<String>,
}

/// Source of truth for report records, reached over HTTP in production and
/// substituted with an in-memory fake in tests.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<RawReportRecord>>;
    async fn update_report(&self, id: &str, patch: &ReportPatch) -> Result<()>;
    async fn submit_report(&self, submission: &ReportSubmission) -> Result<()>;
    async fn login(&self, email: &str, password: &str) -> Result<StoreLoginResponse>;
}

/// HTTP client for the report store service
pub struct HttpReportStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportStore {
    pub fn new(config: &ReportStoreConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("SafeStreetCore/1.0 (road-damage-dashboard)")
                .timeout(config.request_timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url.clone(),
        }
    }
}

#[async_trait]
impl ReportStore for HttpReportStore {
    async fn list_reports(&self) -> Result<Vec<RawReportRecord>> {
        let url = format!("{}/api/images", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Report store listing request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Report store request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Report store returned status {}",
                response.status()
            )));
        }

        let body: ListImagesResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse report store listing: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse report store response: {}", e))
        })?;

        if !body.success {
            return Err(AppError::ExternalServiceError(
                body.message
                    .unwrap_or_else(|| "Report store rejected the listing request".to_string()),
            ));
        }

        Ok(body.images)
    }

    async fn update_report(&self, id: &str, patch: &ReportPatch) -> Result<()> {
        let url = format!("{}/api/images/{}", self.base_url, urlencoding::encode(id));

        let response = self
            .client
            .put(&url)
            .json(patch)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Report store update request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Report store request failed: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Report store update returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn submit_report(&self, submission: &ReportSubmission) -> Result<()> {
        let url = format!("{}/api/upload", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Report submission failed: {:?}", e);
                AppError::ExternalServiceError(format!("Report store request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Report submission returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<StoreLoginResponse> {
        let url = format!("{}/api/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Login request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Report store request failed: {}", e))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        if !status.is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Login returned status {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse login response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse report store response: {}", e))
        })
    }
}
