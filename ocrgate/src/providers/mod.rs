//! Adapters for the two external OCR services.
//!
//! Each adapter owns its own HTTP client, decodes the incoming base64 string
//! independently, makes exactly one outbound call per invocation (no retries,
//! no caching), and maps the provider-specific response shape down to a flat
//! list of [`crate::models::Detection`] values in provider order.

mod document;
mod text;

pub use document::DocumentTextClient;
pub use text::TextDetectClient;
