//! Token-based adapter: general text detection.
//!
//! Talks to a Rekognition-compatible `DetectText` endpoint and flattens every
//! detection it returns, words and lines alike.

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::decode::decode_image;
use crate::error::{GateError, Result};
use crate::models::Detection;

const TARGET: &str = "RekognitionService.DetectText";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Clone, Debug)]
pub struct TextDetectClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectTextRequest {
    #[serde(rename = "Image")]
    image: ImagePayload,
}

#[derive(Debug, Serialize)]
struct ImagePayload {
    #[serde(rename = "Bytes")]
    bytes: String,
}

#[derive(Debug, Deserialize)]
struct DetectTextResponse {
    #[serde(rename = "TextDetections", default)]
    text_detections: Vec<TextDetection>,
}

// DetectedText is required here: a detection without it fails the whole
// call rather than being silently skipped.
#[derive(Debug, Deserialize)]
struct TextDetection {
    #[serde(rename = "DetectedText")]
    detected_text: String,
    #[serde(rename = "Confidence")]
    confidence: Option<f64>,
}

impl TextDetectClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GateError::TextDetect(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Submits the image and returns one [`Detection`] per item in the
    /// provider's detection list, in provider order.
    pub async fn detect_text(&self, image_b64: &str) -> Result<Vec<Detection>> {
        let image_bytes = decode_image(image_b64)?;

        let request = DetectTextRequest {
            image: ImagePayload {
                bytes: STANDARD.encode(&image_bytes),
            },
        };

        let mut builder = self
            .client
            .post(&self.base_url)
            .header("X-Amz-Target", TARGET)
            .header("Content-Type", CONTENT_TYPE)
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GateError::TextDetect(format!(
                "API request failed: {status} - {body}"
            )));
        }

        let parsed: DetectTextResponse = response
            .json()
            .await
            .map_err(|e| GateError::TextDetect(format!("Failed to parse response: {e}")))?;

        let detections = parsed
            .text_detections
            .into_iter()
            .map(|detection| Detection {
                detected_text: detection.detected_text,
                confidence: detection.confidence.into(),
            })
            .collect();

        Ok(detections)
    }
}
