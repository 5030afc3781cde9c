//! Host-side collaborators.
//!
//! The client never renders UI or talks to an analytics backend itself;
//! both are handed in by the host application through these traits.

/// Analytics collaborator. Fire-and-forget: the client never consumes a
/// return value from either call.
pub trait Tracker: Send + Sync {
    /// Records a named event.
    fn track(&self, event_name: &str);

    /// Asks the tracker to deliver any buffered events now.
    fn flush(&self);
}

/// Host-provided debug surface.
///
/// [`ConfigClient::launch_debug_mode`](crate::ConfigClient::launch_debug_mode)
/// hands control here when debug mode is active; what the surface renders
/// is entirely up to the host.
pub trait DebugLauncher {
    fn launch(&self);
}
