use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// A well-formed response from the remote value source.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// Key/value pairs to merge over the current store contents.
    pub values: HashMap<String, String>,
    /// Whether the server enabled debug mode for this device.
    pub debug: bool,
}

impl FetchResponse {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            values,
            debug: false,
        }
    }
}

/// The remote value source the client fetches from.
///
/// The production implementation is [`HttpSource`](crate::http::HttpSource);
/// tests inject their own. Implementations report every failure (network,
/// malformed response, server error) as an error value, never a panic.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Performs one retrieval cycle.
    ///
    /// `known_keys` carries the keys the client already holds defaults
    /// for, so the server can scope its response.
    async fn fetch_values(&self, known_keys: &[String]) -> Result<FetchResponse>;
}
