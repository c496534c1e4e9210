//! # Publisher trait.
//!
//! [`Publisher`] is the extension point the publish pipeline drives for
//! each plugin. The pipeline calls, in order and per publish cycle:
//!
//! ```text
//! should_publish_event(&snapshot)          suppression gate
//!        └─► get_event_output(&model, &snapshot)   extraction
//!                 └─► publish(output, &snapshot)   dispatch (async, infallible)
//! ```
//!
//! `publish` receives whatever `get_event_output` returned; a `None`
//! output must be a silent no-op so extraction can drop events that were
//! not addressed to the plugin.

use async_trait::async_trait;

use crate::catalog::{EventType, Properties, Snapshot};
use crate::model::EventModel;

/// Derived value handed from extraction to dispatch.
///
/// Transient; exists only between `get_event_output` and `publish`.
#[derive(Clone, Debug, PartialEq)]
pub struct EventOutput {
    /// Catalog event id; doubles as the report title.
    pub event_name: String,
    /// Runtime property values routed to the plugin.
    pub properties: Properties,
    /// Event classification driving dispatch.
    pub event_type: EventType,
}

/// Event publisher driven by the publish pipeline.
///
/// Implementations must be cheap to call concurrently: dispatch reads
/// only its arguments and the handle(s) fixed at construction.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publisher name used in logs.
    fn name(&self) -> &'static str;

    /// Suppression gate; the default publishes every event.
    fn should_publish_event(&self, _snapshot: &Snapshot) -> bool {
        true
    }

    /// Extracts the output to publish from the current cycle.
    ///
    /// Returning `None` drops the event for this publisher.
    fn get_event_output(&self, model: &EventModel, snapshot: &Snapshot) -> Option<EventOutput>;

    /// Dispatches previously extracted output. Never fails; operational
    /// problems degrade to logged warnings.
    async fn publish(&self, content: Option<EventOutput>, snapshot: &Snapshot);

    /// True when the publisher holds a live client handle. No network
    /// check is performed.
    async fn is_available(&self) -> bool;

    /// Releases publisher resources; the default resolves immediately.
    async fn shutdown(&self) {}
}
