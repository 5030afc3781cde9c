//! ConfigKit Rust SDK
//!
//! Client SDK for remote configuration and A/B experiment values:
//! builder-based setup, asynchronous fetch with exactly-once outcome
//! delivery, and synchronous keyed lookup with default fallback.
//!
//! # Quick Start
//!
//! ```no_run
//! use configkit::{ConfigClient, Configuration};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> configkit::Result<()> {
//!     let mut defaults = HashMap::new();
//!     defaults.insert("buttonColor".to_string(), "blue".to_string());
//!
//!     let client = ConfigClient::new(
//!         Configuration::builder()
//!             .app_id("your_app_id")
//!             .sdk_token("your_sdk_token")
//!             .defaults(defaults)
//!             .build()?,
//!     )?;
//!
//!     // Defaults answer immediately; the remote value wins after a
//!     // successful fetch.
//!     let _ = client.get_value("buttonColor");
//!     let _ = client.fetch().await;
//!     let _ = client.get_value("buttonColor");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod source;
pub mod store;
mod client;

pub use client::{ConfigClient, FetchOutcome, EXPERIMENT_KEY_PREFIX};
pub use config::{Configuration, ConfigurationBuilder, DEFAULT_FETCH_TIMEOUT};
pub use error::{ConfigError, ErrorCode, Result};
pub use host::{DebugLauncher, Tracker};
pub use http::{HttpSource, SDK_VERSION};
pub use source::{FetchResponse, RemoteSource};
pub use store::ValueStore;
