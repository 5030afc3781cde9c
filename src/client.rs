use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Configuration;
use crate::error::{ConfigError, Result};
use crate::host::{DebugLauncher, Tracker};
use crate::http::HttpSource;
use crate::source::RemoteSource;
use crate::store::ValueStore;

/// Prefix prepended to experiment keys by [`ConfigClient::experiments`].
pub const EXPERIMENT_KEY_PREFIX: &str = "[ConfigKit] ";

/// Outcome of one fetch cycle. Exactly one outcome is produced per
/// `fetch` call; there are no observable interim states.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The store was updated with the remote values.
    Success,
    /// The store was left untouched; the cause is carried opaquely.
    Failure(ConfigError),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success)
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            FetchOutcome::Success => Ok(()),
            FetchOutcome::Failure(err) => Err(err),
        }
    }
}

/// Remote-configuration client.
///
/// Owns an immutable [`Configuration`] and a [`ValueStore`] seeded from
/// its defaults. `get_value` is a pure synchronous read and is safe to
/// call while a fetch is in flight; `fetch` runs one remote cycle and
/// merges the response over the store on success.
///
/// ```no_run
/// use configkit::{ConfigClient, Configuration};
/// use std::collections::HashMap;
///
/// # #[tokio::main]
/// # async fn main() -> configkit::Result<()> {
/// let mut defaults = HashMap::new();
/// defaults.insert("buttonColor".to_string(), "blue".to_string());
///
/// let client = ConfigClient::new(
///     Configuration::builder()
///         .app_id("25732")
///         .sdk_token("430BBA69FBBC434AA6C1529F1E160EAD")
///         .defaults(defaults)
///         .build()?,
/// )?;
///
/// // Defaults are available before any fetch.
/// assert_eq!(client.get_value("buttonColor").as_deref(), Some("blue"));
///
/// if client.fetch().await.is_success() {
///     // Remote value, if the server returned one.
///     let _color = client.get_value("buttonColor");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigClient {
    configuration: Configuration,
    source: Arc<dyn RemoteSource>,
    store: ValueStore,
    debug_overrides: RwLock<HashMap<String, String>>,
    in_debug_mode: AtomicBool,
    last_fetch_duration: Mutex<Option<Duration>>,
    tracker: Option<Arc<dyn Tracker>>,
}

impl ConfigClient {
    /// Creates a client backed by the HTTP remote source.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-configuration error when the configuration
    /// does not validate; no partial client is produced.
    pub fn new(configuration: Configuration) -> Result<Self> {
        configuration.validate()?;
        let source = Arc::new(HttpSource::new(configuration.clone())?);
        Self::with_source(configuration, source)
    }

    /// Creates a client with an injected remote source.
    pub fn with_source(
        configuration: Configuration,
        source: Arc<dyn RemoteSource>,
    ) -> Result<Self> {
        configuration.validate()?;
        let store = ValueStore::new(&configuration.defaults);

        Ok(Self {
            configuration,
            source,
            store,
            debug_overrides: RwLock::new(HashMap::new()),
            in_debug_mode: AtomicBool::new(false),
            last_fetch_duration: Mutex::new(None),
            tracker: None,
        })
    }

    /// Attaches an analytics tracker. Fetch outcomes are reported to it
    /// as fire-and-forget events.
    pub fn with_tracker(mut self, tracker: Arc<dyn Tracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the current value for `key`.
    ///
    /// Never blocks and never triggers a fetch. While debug mode is
    /// active, host-written overrides shadow the stored value.
    pub fn get_value(&self, key: &str) -> Option<String> {
        if self.in_debug_mode.load(Ordering::Acquire) {
            if let Some(value) = self.debug_overrides.read().get(key) {
                return Some(value.clone());
            }
        }
        self.store.get(key)
    }

    /// Returns all current experiment values.
    ///
    /// With `with_prefix` set, keys are prepended with
    /// [`EXPERIMENT_KEY_PREFIX`] for forwarding to analytics tools.
    pub fn experiments(&self, with_prefix: bool) -> HashMap<String, String> {
        let mut snapshot = self.store.snapshot();

        if self.in_debug_mode.load(Ordering::Acquire) {
            for (key, value) in self.debug_overrides.read().iter() {
                if snapshot.contains_key(key) {
                    snapshot.insert(key.clone(), value.clone());
                }
            }
        }

        if with_prefix {
            snapshot
                .into_iter()
                .map(|(key, value)| (format!("{}{}", EXPERIMENT_KEY_PREFIX, key), value))
                .collect()
        } else {
            snapshot
        }
    }

    /// Runs one remote retrieval cycle.
    ///
    /// On a well-formed response, merges the returned key/value pairs
    /// into the store (remote wins per key, keys absent from the
    /// response keep their current value) and reports
    /// [`FetchOutcome::Success`]. On any failure the store is left
    /// untouched and the cause is carried in
    /// [`FetchOutcome::Failure`]. Concurrent calls are independent;
    /// outcomes may complete out of issue order.
    pub async fn fetch(&self) -> FetchOutcome {
        let known_keys: Vec<String> = self.configuration.defaults.keys().cloned().collect();
        let started = Instant::now();

        let result = self.source.fetch_values(&known_keys).await;
        *self.last_fetch_duration.lock() = Some(started.elapsed());

        match result {
            Ok(response) => {
                self.store.merge(response.values);
                self.in_debug_mode.store(response.debug, Ordering::Release);

                if response.debug {
                    tracing::warn!(
                        "Debug mode is enabled. Don't forget to disable it before release."
                    );
                }
                if self.configuration.show_logs {
                    tracing::debug!(keys = self.store.len(), "Fetch succeeded");
                }
                self.track_event("config_fetch_succeeded");

                FetchOutcome::Success
            }
            Err(err) => {
                if self.configuration.show_logs {
                    tracing::debug!(error = %err, "Fetch failed");
                }
                self.track_event("config_fetch_failed");

                FetchOutcome::Failure(err)
            }
        }
    }

    /// Listener-style variant of [`fetch`](Self::fetch).
    ///
    /// Spawns the cycle onto the runtime and invokes exactly one of the
    /// two handlers once the outcome is known. Each call's handlers are
    /// independent of any other in-flight call.
    pub fn fetch_with<S, E>(self: &Arc<Self>, on_success: S, on_error: E)
    where
        S: FnOnce() + Send + 'static,
        E: FnOnce(ConfigError) + Send + 'static,
    {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            match client.fetch().await {
                FetchOutcome::Success => on_success(),
                FetchOutcome::Failure(err) => on_error(err),
            }
        });
    }

    /// Duration of the latest completed fetch cycle, successful or not.
    pub fn last_fetch_duration(&self) -> Option<Duration> {
        *self.last_fetch_duration.lock()
    }

    /// Whether the server enabled debug mode for this device.
    pub fn is_in_debug_mode(&self) -> bool {
        self.in_debug_mode.load(Ordering::Acquire)
    }

    /// Hands control to the host debug surface.
    ///
    /// Returns `false` without launching when debug mode is not active.
    pub fn launch_debug_mode(&self, launcher: &dyn DebugLauncher) -> bool {
        if self.is_in_debug_mode() {
            launcher.launch();
            true
        } else {
            false
        }
    }

    /// Writes a debug override for `key`. Overrides shadow stored values
    /// only while debug mode is active; the store itself is untouched.
    pub fn set_debug_override(&self, key: impl Into<String>, value: impl Into<String>) {
        self.debug_overrides.write().insert(key.into(), value.into());
    }

    /// Drops all debug overrides, restoring base lookups.
    pub fn clear_debug_overrides(&self) {
        self.debug_overrides.write().clear();
    }

    /// Records a named event through the attached tracker, if any.
    pub fn track(&self, event_name: &str) {
        self.track_event(event_name);
    }

    /// Asks the attached tracker to deliver buffered events now.
    pub fn flush_tracking(&self) {
        if let Some(ref tracker) = self.tracker {
            tracker.flush();
        }
    }

    fn track_event(&self, event_name: &str) {
        if let Some(ref tracker) = self.tracker {
            tracker.track(event_name);
        }
    }
}
