use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::ClassifierConfig;
use crate::core::error::{AppError, Result};

/// Classification result for an uploaded image
#[derive(Debug, Clone)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
    /// URL of the model's annotated copy of the image, when the service
    /// produced one
    pub annotated_image_url: Option<String>,
}

/// Wire response from the classification service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictResponse {
    class: String,
    #[serde(default)]
    confidence: f64,
    predicted_image_url: Option<String>,
}

/// Image classification boundary. The model service is a black box: image
/// in, label plus confidence out.
#[async_trait]
pub trait RoadClassifier: Send + Sync {
    async fn classify(
        &self,
        image: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<Classification>;
}

/// HTTP client for the classification service
pub struct HttpRoadClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoadClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
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
impl RoadClassifier for HttpRoadClassifier {
    async fn classify(
        &self,
        image: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<Classification> {
        let url = format!("{}/predict", self.base_url);

        let part = reqwest::multipart::Part::bytes(image)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Classification request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Classification service failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Classification service returned status {}",
                response.status()
            )));
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse classification response: {:?}", e);
            AppError::ExternalServiceError(format!(
                "Failed to parse classification response: {}",
                e
            ))
        })?;

        tracing::debug!(
            "Image {} classified as {} ({:.2})",
            filename,
            body.class,
            body.confidence
        );

        Ok(Classification {
            label: body.class,
            confidence: body.confidence,
            annotated_image_url: body.predicted_image_url,
        })
    }
}
