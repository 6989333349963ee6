//! ocrgate: an HTTP gateway that fans a base64-encoded image out to two
//! external OCR services and merges their results into one response.
//!
//! There is no text-detection logic here; both providers are opaque
//! services. The gateway only decodes input, makes two sequential API calls,
//! reshapes their responses, and serializes the merged output. Any failure
//! along the way yields a uniform 500 envelope with a single error message.

pub mod api;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod providers;
