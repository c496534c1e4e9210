//! # Plugins: event-type registration for the publish pipeline.
//!
//! A [`Plugin`] names itself (the key callers use to route per-publish
//! data), declares which event types it handles, and exposes its
//! publishers. [`RollbarPlugin`] registers all seven Rollbar event
//! types and owns the one [`RollbarPublisher`] for the process.

use std::sync::Arc;

use crate::catalog::EventType;
use crate::config::RollbarOptions;
use crate::error::ConfigError;
use crate::publishers::{Publisher, RollbarPublisher};

/// Extension point grouping event-type registration with publishers.
pub trait Plugin: Send + Sync {
    /// Plugin name; callers key per-publish plugin data by this.
    fn name(&self) -> &'static str;

    /// Event types this plugin's publishers handle.
    fn event_types(&self) -> &[EventType];

    /// The plugin's publishers, invoked per matching publish cycle.
    fn publishers(&self) -> Vec<Arc<dyn Publisher>>;
}

/// Rollbar plugin: registers severity + identity event types and owns
/// the publisher.
///
/// ## Example
/// ```
/// use stratum_rollbar::{RollbarOptions, RollbarPlugin};
///
/// let plugin = RollbarPlugin::new(
///     RollbarOptions::new().with_access_token("post-server-token"),
/// )?;
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// assert!(plugin.is_available().await);
/// # });
/// # Ok::<(), stratum_rollbar::ConfigError>(())
/// ```
pub struct RollbarPlugin {
    publisher: Arc<RollbarPublisher>,
}

impl RollbarPlugin {
    /// Routing key for per-publish plugin data.
    pub const NAME: &'static str = "rollbar";

    /// Validates options and constructs the plugin's publisher.
    ///
    /// # Errors
    /// [`ConfigError::MissingToken`] when the options carry neither a
    /// token nor a pre-built client instance.
    pub fn new(options: RollbarOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            publisher: Arc::new(RollbarPublisher::new(options)?),
        })
    }

    /// True when the underlying publisher holds a live client handle.
    pub async fn is_available(&self) -> bool {
        self.publisher.is_available().await
    }
}

impl Plugin for RollbarPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn event_types(&self) -> &[EventType] {
        &EventType::ALL
    }

    fn publishers(&self) -> Vec<Arc<dyn Publisher>> {
        vec![self.publisher.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::RecordingClient;
    use crate::config::Runtime;

    #[test]
    fn test_construction_requires_token_or_instance() {
        assert!(matches!(
            RollbarPlugin::new(RollbarOptions::new()),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_registers_all_event_types() {
        let plugin = RollbarPlugin::new(
            RollbarOptions::new().with_instance(Arc::new(RecordingClient::default())),
        )
        .expect("plugin");
        assert_eq!(plugin.event_types().len(), 7);
        assert_eq!(plugin.publishers().len(), 1);
        assert_eq!(plugin.name(), "rollbar");
    }

    #[tokio::test]
    async fn test_availability_tracks_publisher() {
        let available = RollbarPlugin::new(
            RollbarOptions::new().with_instance(Arc::new(RecordingClient::default())),
        )
        .expect("plugin");
        assert!(available.is_available().await);

        let unavailable = RollbarPlugin::new(
            RollbarOptions::new()
                .with_server_access_token("server-only")
                .with_runtime(Runtime::Client),
        )
        .expect("plugin");
        assert!(!unavailable.is_available().await);
    }
}
