//! Line-based adapter: document text detection.
//!
//! Talks to a Textract-compatible `DetectDocumentText` endpoint and filters
//! the returned blocks down to full lines of text.

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::decode::decode_image;
use crate::error::{GateError, Result};
use crate::models::Detection;

const TARGET: &str = "Textract.DetectDocumentText";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Block type marking a full line of text in the provider response.
const BLOCK_TYPE_LINE: &str = "LINE";

#[derive(Clone, Debug)]
pub struct DocumentTextClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectDocumentTextRequest {
    #[serde(rename = "Document")]
    document: DocumentPayload,
}

#[derive(Debug, Serialize)]
struct DocumentPayload {
    #[serde(rename = "Bytes")]
    bytes: String,
}

#[derive(Debug, Deserialize)]
struct DetectDocumentTextResponse {
    #[serde(rename = "Blocks", default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(rename = "BlockType")]
    block_type: Option<String>,
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "Confidence")]
    confidence: Option<f64>,
}

impl DocumentTextClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GateError::DocumentDetect(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Submits the image and returns one [`Detection`] per LINE block that
    /// carries a text field, in provider order. Blocks without text and
    /// non-line blocks (pages, words) are dropped; no confidence filtering.
    pub async fn detect_lines(&self, image_b64: &str) -> Result<Vec<Detection>> {
        let image_bytes = decode_image(image_b64)?;

        let request = DetectDocumentTextRequest {
            document: DocumentPayload {
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
            return Err(GateError::DocumentDetect(format!(
                "API request failed: {status} - {body}"
            )));
        }

        let parsed: DetectDocumentTextResponse = response
            .json()
            .await
            .map_err(|e| GateError::DocumentDetect(format!("Failed to parse response: {e}")))?;

        let detections = parsed
            .blocks
            .into_iter()
            .filter(|block| block.block_type.as_deref() == Some(BLOCK_TYPE_LINE))
            .filter_map(|block| {
                block.text.map(|text| Detection {
                    detected_text: text,
                    confidence: block.confidence.into(),
                })
            })
            .collect();

        Ok(detections)
    }
}
