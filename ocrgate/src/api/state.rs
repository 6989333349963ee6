use std::sync::Arc;

use crate::config::Config;
use crate::providers::{DocumentTextClient, TextDetectClient};

/// Shared application state.
///
/// The two clients are constructed once at startup and live for the process
/// lifetime; they hold no per-request mutable state, so concurrent
/// invocations share them safely. No teardown is needed.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub document: DocumentTextClient,
    pub text: TextDetectClient,
}

impl AppState {
    pub fn new(config: Config, document: DocumentTextClient, text: TextDetectClient) -> Self {
        Self {
            config: Arc::new(config),
            document,
            text,
        }
    }
}
