use thiserror::Error;

/// Failures that can occur while handling an invocation.
///
/// Every variant is folded into the same `{"statusCode": 500, "body":
/// "{\"error\": ...}"}` envelope at the top of the handler; the variant only
/// shapes the message. Client-caused failures (bad envelope, bad base64) are
/// deliberately not distinguished from provider failures on the wire.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Invalid request envelope: {0}")]
    Envelope(String),

    #[error("Missing image field in request")]
    MissingImage,

    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document text detection error: {0}")]
    DocumentDetect(String),

    #[error("Text detection error: {0}")]
    TextDetect(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
