use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use configkit::{
    ConfigClient, ConfigError, Configuration, ErrorCode, FetchResponse, RemoteSource, Result,
    Tracker,
};

/// Remote source that always succeeds with a fixed response.
pub struct StaticSource {
    pub values: HashMap<String, String>,
    pub debug: bool,
}

impl StaticSource {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[async_trait]
impl RemoteSource for StaticSource {
    async fn fetch_values(&self, _known_keys: &[String]) -> Result<FetchResponse> {
        Ok(FetchResponse {
            values: self.values.clone(),
            debug: self.debug,
        })
    }
}

/// Remote source that always fails with the given code.
pub struct FailingSource {
    pub code: ErrorCode,
}

#[async_trait]
impl RemoteSource for FailingSource {
    async fn fetch_values(&self, _known_keys: &[String]) -> Result<FetchResponse> {
        Err(ConfigError::fetch_failure(self.code, "injected failure"))
    }
}

/// Remote source that records the known keys it was asked about.
#[derive(Default)]
pub struct RecordingSource {
    pub seen_keys: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl RemoteSource for RecordingSource {
    async fn fetch_values(&self, known_keys: &[String]) -> Result<FetchResponse> {
        self.seen_keys.lock().push(known_keys.to_vec());
        Ok(FetchResponse::default())
    }
}

/// Tracker that counts calls.
#[derive(Default)]
pub struct CountingTracker {
    pub events: Mutex<Vec<String>>,
    pub flushes: Mutex<usize>,
}

impl Tracker for CountingTracker {
    fn track(&self, event_name: &str) {
        self.events.lock().push(event_name.to_string());
    }

    fn flush(&self) {
        *self.flushes.lock() += 1;
    }
}

pub fn defaults(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn configuration(defaults: HashMap<String, String>) -> Configuration {
    Configuration::builder()
        .app_id("25732")
        .sdk_token("430BBA69FBBC434AA6C1529F1E160EAD")
        .defaults(defaults)
        .build()
        .unwrap()
}

pub fn client_with(source: impl RemoteSource + 'static, pairs: &[(&str, &str)]) -> ConfigClient {
    ConfigClient::with_source(configuration(defaults(pairs)), Arc::new(source)).unwrap()
}
