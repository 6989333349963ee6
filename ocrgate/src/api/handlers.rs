//! Invocation handler.
//!
//! [`handle_event`] is total: every failure along the pipeline (envelope
//! parsing, image extraction, base64 decoding, either provider call) is
//! logged and folded into the same 500 envelope. There is no partial-success
//! path: if the first adapter succeeds and the second fails, no results are
//! returned at all.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::config::ImageSource;
use crate::error::{GateError, Result};
use crate::models::{CombinedResult, Event, ImagePayload, ResponseEnvelope};

use super::state::AppState;

/// `POST /invoke`
///
/// The HTTP reply is always 200 with the envelope as its JSON body; the
/// application status lives in the envelope's `statusCode` field, mirroring
/// how function runtimes report handler results.
pub async fn invoke(
    State(state): State<AppState>,
    Json(event): Json<Event>,
) -> Json<ResponseEnvelope> {
    Json(handle_event(&state, event).await)
}

/// Runs one invocation end to end and always produces a response envelope.
pub async fn handle_event(state: &AppState, event: Event) -> ResponseEnvelope {
    match process(state, event).await {
        Ok(body) => ResponseEnvelope {
            status_code: 200,
            body,
        },
        Err(e) => {
            tracing::error!(error = %e, "invocation failed");
            ResponseEnvelope {
                status_code: 500,
                body: json!({"error": e.to_string()}).to_string(),
            }
        }
    }
}

async fn process(state: &AppState, event: Event) -> Result<String> {
    let image_b64 = extract_image(state.config.handler.image_source, &event)?;

    // Sequential by design; each adapter decodes the string itself.
    let textract_results = state.document.detect_lines(&image_b64).await?;
    let rekognition_results = state.text.detect_text(&image_b64).await?;

    let combined = CombinedResult {
        textract_results,
        rekognition_results,
    };

    Ok(serde_json::to_string(&combined)?)
}

/// Pulls the base64 image string out of the event according to the
/// configured source. The source is explicit configuration; the handler
/// never guesses between the two event shapes.
fn extract_image(source: ImageSource, event: &Event) -> Result<String> {
    match source {
        ImageSource::Body => {
            let body = event
                .body
                .as_deref()
                .ok_or_else(|| GateError::Envelope("event has no body".to_string()))?;
            let payload: ImagePayload = serde_json::from_str(body)
                .map_err(|e| GateError::Envelope(format!("body is not a valid image payload: {e}")))?;
            Ok(payload.image)
        }
        ImageSource::Event => event.image.clone().ok_or(GateError::MissingImage),
    }
}

/// Health data for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub document_endpoint: String,
    pub text_endpoint: String,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        document_endpoint: state.config.document.base_url.clone(),
        text_endpoint: state.config.text.base_url.clone(),
    })
}
