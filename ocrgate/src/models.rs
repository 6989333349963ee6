//! Wire-level data model.
//!
//! Field names are PascalCase on the wire to match the upstream providers'
//! response shapes, so a caller migrating from talking to the providers
//! directly sees identical JSON.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel string emitted when a provider omits the confidence score.
pub const CONFIDENCE_NOT_AVAILABLE: &str = "N/A";

/// A confidence score, or the `"N/A"` sentinel when the provider did not
/// report one. Serializes as a JSON number or the sentinel string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confidence {
    Score(f64),
    NotAvailable,
}

impl From<Option<f64>> for Confidence {
    fn from(score: Option<f64>) -> Self {
        match score {
            Some(v) => Confidence::Score(v),
            None => Confidence::NotAvailable,
        }
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Confidence::Score(v) => serializer.serialize_f64(*v),
            Confidence::NotAvailable => serializer.serialize_str(CONFIDENCE_NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Score(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Score(v) => Ok(Confidence::Score(v)),
            Raw::Text(s) if s == CONFIDENCE_NOT_AVAILABLE => Ok(Confidence::NotAvailable),
            Raw::Text(s) => Err(D::Error::custom(format!(
                "expected a number or \"{CONFIDENCE_NOT_AVAILABLE}\", got \"{s}\""
            ))),
        }
    }
}

/// A single piece of recognized text plus its confidence, as produced by
/// either adapter from its provider-specific response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "DetectedText")]
    pub detected_text: String,
    #[serde(rename = "Confidence")]
    pub confidence: Confidence,
}

/// The merged payload returned on success. Both lists are independently
/// derived from the same input image; matching lines are never reconciled
/// or deduplicated across them. Empty lists serialize as empty arrays,
/// never as null or omitted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    #[serde(rename = "TextractResults")]
    pub textract_results: Vec<Detection>,
    #[serde(rename = "RekognitionResults")]
    pub rekognition_results: Vec<Detection>,
}

/// Invocation input. Depending on the configured image source the base64
/// string lives either inside the JSON-encoded `body` string or directly in
/// the `image` field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Shape of the JSON carried inside `Event::body`.
#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub image: String,
}

/// Invocation output: a status code plus a serialized JSON body string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_confidence_serializes_as_number() {
        let json = serde_json::to_string(&Confidence::Score(99.2)).unwrap();
        assert_eq!(json, "99.2");
    }

    #[test]
    fn test_confidence_sentinel_serializes_as_string() {
        let json = serde_json::to_string(&Confidence::NotAvailable).unwrap();
        assert_eq!(json, "\"N/A\"");
    }

    #[test]
    fn test_confidence_deserializes_both_shapes() {
        let score: Confidence = serde_json::from_str("98.5").unwrap();
        assert_eq!(score, Confidence::Score(98.5));

        let sentinel: Confidence = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(sentinel, Confidence::NotAvailable);
    }

    #[test]
    fn test_confidence_rejects_other_strings() {
        let result: Result<Confidence, _> = serde_json::from_str("\"high\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_detection_uses_wire_field_names() {
        let detection = Detection {
            detected_text: "HELLO".to_string(),
            confidence: Confidence::Score(99.2),
        };
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"DetectedText": "HELLO", "Confidence": 99.2})
        );
    }

    #[test]
    fn test_combined_result_keeps_empty_lists_present() {
        let combined = CombinedResult {
            textract_results: vec![],
            rekognition_results: vec![],
        };
        let json = serde_json::to_value(&combined).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"TextractResults": [], "RekognitionResults": []})
        );
    }

    #[test]
    fn test_event_accepts_missing_fields() {
        let event: Event = serde_json::from_str("{}").unwrap();
        assert!(event.body.is_none());
        assert!(event.image.is_none());
    }

    #[test]
    fn test_response_envelope_wire_format() {
        let envelope = ResponseEnvelope {
            status_code: 200,
            body: "{}".to_string(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"statusCode": 200, "body": "{}"}));
    }
}
