//! # Per-publish snapshots.
//!
//! A [`Snapshot`] is the ephemeral bundle the service builds for each
//! publish call: the matched catalog definition plus whatever data the
//! caller routed to the plugin being invoked. It is created, consumed
//! once by the event model and the publisher, then discarded.
//!
//! Routing works by plugin name: the caller keys plugin payloads by
//! name, and the service copies the entry for the current plugin into
//! `event_options.data`. A snapshot with no
//! `data` therefore means "the caller did not address this plugin", and
//! the publisher drops the event instead of forwarding every catalog
//! event unconditionally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::event::{EventDef, Properties};

/// Caller-supplied payload addressed to one plugin for one publish call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginData {
    /// Runtime property values for catalog validation and dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl PluginData {
    /// Payload with no runtime properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a payload from a JSON value.
    ///
    /// An object becomes the runtime property map (an empty object is a
    /// present-but-empty map); any other value means "no properties".
    ///
    /// ```
    /// use serde_json::json;
    /// use stratum_rollbar::PluginData;
    ///
    /// let data = PluginData::from_properties(json!({"page": "checkout"}));
    /// assert!(data.properties.as_ref().is_some_and(|p| p.contains_key("page")));
    ///
    /// assert_eq!(PluginData::from_properties(json!(null)).properties, None);
    /// ```
    pub fn from_properties(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                properties: Some(map),
            },
            _ => Self { properties: None },
        }
    }
}

/// Per-call event options carried by a snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventOptions {
    /// Plugin-targeted data, present only when the caller addressed the
    /// plugin this snapshot was built for.
    pub data: Option<PluginData>,
}

/// Ephemeral per-publish bundle: the matched definition plus call data.
///
/// Only `event` and `event_options` are read by the Rollbar publisher;
/// the product fields identify the embedding application in logs.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// The catalog definition the publish call resolved to.
    pub event: Arc<EventDef>,
    /// Call-scoped options routed to the current plugin.
    pub event_options: Option<EventOptions>,
    /// Name of the embedding application, when known.
    pub product_name: Option<String>,
    /// Version of the embedding application, when known.
    pub product_version: Option<String>,
}

impl Snapshot {
    /// Creates a snapshot for the given definition with no call data.
    pub fn new(event: Arc<EventDef>) -> Self {
        Self {
            event,
            event_options: None,
            product_name: None,
            product_version: None,
        }
    }

    /// Attaches plugin-targeted data to this snapshot.
    pub fn with_data(mut self, data: PluginData) -> Self {
        self.event_options = Some(EventOptions { data: Some(data) });
        self
    }

    /// Attaches the embedding application's identity.
    pub fn with_product(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self.product_version = Some(version.into());
        self
    }

    /// Runtime properties supplied by the caller, if any link in
    /// `event_options.data.properties` is present.
    pub fn runtime_properties(&self) -> Option<&Properties> {
        self.event_options
            .as_ref()?
            .data
            .as_ref()?
            .properties
            .as_ref()
    }
}
