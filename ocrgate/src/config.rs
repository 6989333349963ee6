use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub handler: HandlerConfig,
    pub document: ProviderConfig,
    pub text: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the handler reads the base64 image string from.
///
/// The invocation event either carries a JSON-encoded `body` string with an
/// `image` field inside it (the API-gateway shape), or the `image` field
/// directly on the event itself (direct invocation). Which one applies is
/// explicit configuration, never inferred from the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Body,
    Event,
}

impl std::str::FromStr for ImageSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(ImageSource::Body),
            "event" => Ok(ImageSource::Event),
            other => Err(format!("expected 'body' or 'event', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    pub image_source: ImageSource,
}

/// Connection settings for one external OCR provider endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let region = env::var("OCRGATE_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Self {
            server: ServerConfig {
                host: env::var("OCRGATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("OCRGATE_PORT", 3000),
            },
            handler: HandlerConfig {
                image_source: parse_env_or("OCRGATE_IMAGE_SOURCE", ImageSource::Body),
            },
            document: ProviderConfig {
                base_url: env::var("DOCUMENT_OCR_BASE_URL")
                    .unwrap_or_else(|_| format!("https://textract.{region}.amazonaws.com")),
                api_key: env::var("DOCUMENT_OCR_API_KEY").ok(),
                timeout_secs: parse_env_or("DOCUMENT_OCR_TIMEOUT", 60),
            },
            text: ProviderConfig {
                base_url: env::var("TEXT_OCR_BASE_URL")
                    .unwrap_or_else(|_| format!("https://rekognition.{region}.amazonaws.com")),
                api_key: env::var("TEXT_OCR_API_KEY").ok(),
                timeout_secs: parse_env_or("TEXT_OCR_TIMEOUT", 60),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_server_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("OCRGATE_HOST");
        std::env::remove_var("OCRGATE_PORT");

        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_image_source_defaults_to_body() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("OCRGATE_IMAGE_SOURCE");

        let config = Config::default();
        assert_eq!(config.handler.image_source, ImageSource::Body);
    }

    #[test]
    fn test_image_source_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("OCRGATE_IMAGE_SOURCE", "event");
        let config = Config::default();
        assert_eq!(config.handler.image_source, ImageSource::Event);
        std::env::remove_var("OCRGATE_IMAGE_SOURCE");
    }

    #[test]
    fn test_invalid_image_source_falls_back_to_default() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("OCRGATE_IMAGE_SOURCE", "headers");
        let config = Config::default();
        assert_eq!(config.handler.image_source, ImageSource::Body);
        std::env::remove_var("OCRGATE_IMAGE_SOURCE");
    }

    #[test]
    fn test_provider_defaults_derive_from_region() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("DOCUMENT_OCR_BASE_URL");
        std::env::remove_var("TEXT_OCR_BASE_URL");
        std::env::set_var("OCRGATE_REGION", "eu-west-2");

        let config = Config::default();
        assert_eq!(
            config.document.base_url,
            "https://textract.eu-west-2.amazonaws.com"
        );
        assert_eq!(
            config.text.base_url,
            "https://rekognition.eu-west-2.amazonaws.com"
        );

        std::env::remove_var("OCRGATE_REGION");
    }

    #[test]
    fn test_provider_base_url_override() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("DOCUMENT_OCR_BASE_URL", "http://localhost:9999");
        let config = Config::default();
        assert_eq!(config.document.base_url, "http://localhost:9999");
        std::env::remove_var("DOCUMENT_OCR_BASE_URL");
    }

    #[test]
    fn test_provider_timeout_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("DOCUMENT_OCR_TIMEOUT");
        std::env::remove_var("TEXT_OCR_TIMEOUT");

        let config = Config::default();
        assert_eq!(config.document.timeout_secs, 60);
        assert_eq!(config.text.timeout_secs, 60);
    }

    #[test]
    fn test_parse_env_or_valid_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("__TEST_PARSE_PORT", "8080");
        let result: u16 = parse_env_or("__TEST_PARSE_PORT", 3000);
        assert_eq!(result, 8080);
        std::env::remove_var("__TEST_PARSE_PORT");
    }
}
