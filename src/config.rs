use std::collections::HashMap;
use std::time::Duration;

use crate::error::{ConfigError, ErrorCode, Result};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Immutable client configuration.
///
/// Built once through [`ConfigurationBuilder`] and owned by the
/// [`ConfigClient`](crate::ConfigClient) for its entire lifetime.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub app_id: String,
    pub sdk_token: String,
    pub device_id: String,
    pub defaults: HashMap<String, String>,
    pub using_shake: bool,
    pub show_logs: bool,
    pub fetch_timeout: Duration,
    pub appsflyer_id: Option<String>,
    pub amplitude_user_id: Option<String>,
    pub my_tracker_id: Option<String>,
    pub device_properties: HashMap<String, String>,
    pub base_url: Option<String>,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(ConfigError::invalid_configuration(
                ErrorCode::ConfigMissingAppId,
                "App id must not be empty",
            ));
        }

        if self.sdk_token.is_empty() {
            return Err(ConfigError::invalid_configuration(
                ErrorCode::ConfigMissingSdkToken,
                "SDK token must not be empty",
            ));
        }

        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::invalid_configuration(
                ErrorCode::ConfigInvalidTimeout,
                "Fetch timeout must be positive",
            ));
        }

        if let Some(ref url) = self.base_url {
            if url.is_empty() {
                return Err(ConfigError::invalid_configuration(
                    ErrorCode::ConfigInvalidBaseUrl,
                    "Base URL must not be empty when set",
                ));
            }
        }

        Ok(())
    }
}

/// Builder for [`Configuration`].
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    app_id: String,
    sdk_token: String,
    device_id: Option<String>,
    defaults: HashMap<String, String>,
    using_shake: bool,
    show_logs: bool,
    fetch_timeout: Option<Duration>,
    appsflyer_id: Option<String>,
    amplitude_user_id: Option<String>,
    my_tracker_id: Option<String>,
    device_properties: HashMap<String, String>,
    base_url: Option<String>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            using_shake: true,
            ..Default::default()
        }
    }

    /// Sets the application identifier.
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Sets the SDK access token.
    pub fn sdk_token(mut self, sdk_token: impl Into<String>) -> Self {
        self.sdk_token = sdk_token.into();
        self
    }

    /// Sets a unique device id. A UUIDv4 is generated when not supplied.
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Sets the default key/value map used as fallback when no remote
    /// value has been fetched.
    pub fn defaults(mut self, defaults: HashMap<String, String>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Turns the shake-to-open-debug-mode gesture on or off. On by default.
    pub fn using_shake(mut self, enable: bool) -> Self {
        self.using_shake = enable;
        self
    }

    /// Sets the timeout for fetch requests to the remote servers.
    ///
    /// A fetch call fails once the timeout elapses; previously fetched
    /// values or the defaults remain available through `get_value`.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Switches internal dev logs on and off. Off by default.
    pub fn show_logs(mut self, enable: bool) -> Self {
        self.show_logs = enable;
        self
    }

    /// Sets an AppsFlyer correlation id forwarded to the remote source.
    pub fn appsflyer_id(mut self, id: impl Into<String>) -> Self {
        self.appsflyer_id = Some(id.into());
        self
    }

    /// Sets an Amplitude user id forwarded to the remote source.
    pub fn amplitude_user_id(mut self, id: impl Into<String>) -> Self {
        self.amplitude_user_id = Some(id.into());
        self
    }

    /// Sets a MyTracker correlation id forwarded to the remote source.
    pub fn my_tracker_id(mut self, id: impl Into<String>) -> Self {
        self.my_tracker_id = Some(id.into());
        self
    }

    /// Sets extra device properties (e.g. install date) sent with fetches.
    pub fn device_properties(mut self, properties: HashMap<String, String>) -> Self {
        self.device_properties = properties;
        self
    }

    /// Overrides the remote endpoint base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-configuration error when the app id or SDK
    /// token is empty or the fetch timeout is zero. No partial
    /// configuration is produced on failure.
    pub fn build(self) -> Result<Configuration> {
        let configuration = Configuration {
            app_id: self.app_id,
            sdk_token: self.sdk_token,
            device_id: self
                .device_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            defaults: self.defaults,
            using_shake: self.using_shake,
            show_logs: self.show_logs,
            fetch_timeout: self.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT),
            appsflyer_id: self.appsflyer_id,
            amplitude_user_id: self.amplitude_user_id,
            my_tracker_id: self.my_tracker_id,
            device_properties: self.device_properties,
            base_url: self.base_url,
        };

        configuration.validate()?;
        Ok(configuration)
    }
}
