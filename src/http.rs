use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::Configuration;
use crate::error::{ConfigError, ErrorCode, Result};
use crate::source::{FetchResponse, RemoteSource};

const DEFAULT_BASE_URL: &str = "https://api.configkit.dev";
const MOBILE_API_PATH: &str = "api/mobile";
const EXPERIMENTS_PATH: &str = "experiments";

pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExperimentsResponse {
    #[serde(default)]
    experiments: Vec<Experiment>,
    #[serde(default)]
    meta: Meta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Experiment {
    key: String,
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    debug: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

/// HTTP implementation of [`RemoteSource`].
///
/// One GET per fetch cycle, bounded by the configured timeout. No
/// retries and no request de-duplication; a failed cycle is reported to
/// the caller, who may simply fetch again.
pub struct HttpSource {
    client: Client,
    configuration: Configuration,
}

impl HttpSource {
    pub fn new(configuration: Configuration) -> Result<Self> {
        let client = Client::builder()
            .timeout(configuration.fetch_timeout)
            .build()
            .map_err(|e| {
                ConfigError::with_source(
                    ErrorCode::NetworkError,
                    "Failed to create HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            configuration,
        })
    }

    fn experiments_url(&self) -> String {
        let base = self
            .configuration
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL);
        format!("{}/{}/{}", base, MOBILE_API_PATH, EXPERIMENTS_PATH)
    }

    fn query(&self, known_keys: &[String]) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = known_keys
            .iter()
            .map(|key| ("knownKeys[]", key.clone()))
            .collect();
        query.sort_by(|a, b| a.1.cmp(&b.1));

        for (name, value) in &self.configuration.device_properties {
            query.push(("properties[]", format!("{}:{}", name, value)));
        }

        query
    }

    async fn do_fetch(&self, known_keys: &[String]) -> Result<ExperimentsResponse> {
        let mut request = self
            .client
            .get(self.experiments_url())
            .query(&self.query(known_keys))
            .header("Content-Type", "application/json")
            .header("SDK-App-ID", &self.configuration.app_id)
            .header(
                "Authorization",
                format!("Bearer {}", self.configuration.sdk_token),
            )
            .header("Device-ID", &self.configuration.device_id)
            .header("AppVersion", SDK_VERSION);

        if let Some(ref id) = self.configuration.appsflyer_id {
            request = request.header("AppsFlyer-ID", id);
        }
        if let Some(ref id) = self.configuration.amplitude_user_id {
            request = request.header("Amplitude-User-ID", id);
        }
        if let Some(ref id) = self.configuration.my_tracker_id {
            request = request.header("MyTracker-ID", id);
        }

        let response = request.send().await.map_err(convert_error)?;
        handle_response(response).await
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_values(&self, known_keys: &[String]) -> Result<FetchResponse> {
        let response = self.do_fetch(known_keys).await?;

        let values: HashMap<String, String> = response
            .experiments
            .into_iter()
            .map(|experiment| (experiment.key, experiment.value))
            .collect();

        tracing::debug!(
            count = values.len(),
            debug = response.meta.debug,
            "Fetched experiment values"
        );

        Ok(FetchResponse {
            values,
            debug: response.meta.debug,
        })
    }
}

async fn handle_response(response: reqwest::Response) -> Result<ExperimentsResponse> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await.map_err(|e| {
            ConfigError::with_source(ErrorCode::HttpInvalidResponse, "Failed to read response", e)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ConfigError::with_source(
                ErrorCode::HttpInvalidResponse,
                format!("Failed to parse response: {}", e),
                e,
            )
        })
    } else {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(status_to_error(status, &message))
    }
}

fn status_to_error(status: StatusCode, message: &str) -> ConfigError {
    let (code, category) = match status {
        StatusCode::BAD_REQUEST => (ErrorCode::HttpBadRequest, "Client Error"),
        StatusCode::UNAUTHORIZED => (ErrorCode::HttpUnauthorized, "Authentication Error"),
        StatusCode::FORBIDDEN => (ErrorCode::HttpForbidden, "Authorization Error"),
        StatusCode::NOT_FOUND => (ErrorCode::HttpNotFound, "Not Found"),
        StatusCode::TOO_MANY_REQUESTS => (ErrorCode::HttpRateLimited, "Rate Limited"),
        s if s.is_server_error() => (ErrorCode::HttpServerError, "Server Error"),
        s if s.is_client_error() => (ErrorCode::HttpBadRequest, "Client Error"),
        _ => (ErrorCode::HttpServerError, "Server Error"),
    };

    ConfigError::fetch_failure(
        code,
        format!("{}: {} - {}", category, status.as_u16(), message),
    )
}

fn convert_error(error: reqwest::Error) -> ConfigError {
    if error.is_timeout() {
        ConfigError::with_source(ErrorCode::NetworkTimeout, "Request timed out", error)
    } else if error.is_connect() {
        ConfigError::with_source(ErrorCode::NetworkError, "Connection failed", error)
    } else {
        ConfigError::with_source(ErrorCode::NetworkError, error.to_string(), error)
    }
}
