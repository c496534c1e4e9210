//! # Service: the publish pipeline.
//!
//! [`Service`] wires a [`Catalog`] to a set of [`Plugin`]s and runs the
//! per-publish pipeline:
//!
//! ```text
//! publish(event_id, options)
//!   └─ catalog lookup ─► EventDef            (UnknownEvent otherwise)
//!        └─ per plugin handling def.event_type:
//!             build Snapshot                  (route options.plugin_data[plugin.name]
//!                │                            into event_options.data)
//!             EventModel::get_data(&snapshot) (validation; errors propagate)
//!                │
//!             per publisher:
//!               should_publish_event ─► get_event_output ─► publish
//! ```
//!
//! Validation failures abort the call and surface to the caller; a
//! publisher with no live client drops its event with a warning and the
//! call still succeeds. Plugins the caller did not address see a
//! snapshot without routed data and extract nothing.
//!
//! ## Example
//! ```no_run
//! use stratum_rollbar::{
//!     Catalog, EventDef, EventType, PluginData, PublishOptions, RollbarOptions,
//!     RollbarPlugin, Service, ServiceOptions,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::new([
//!     EventDef::new("BUTTON_CLICK", "Button clicked", EventType::Info)
//!         .with_property("button_name", "string"),
//! ])?;
//! let plugin = RollbarPlugin::new(RollbarOptions::new().with_access_token("token"))?;
//!
//! let service = Service::new(ServiceOptions {
//!     catalog,
//!     plugins: vec![Arc::new(plugin)],
//!     product_name: "demo-app".into(),
//!     product_version: "1.0.0".into(),
//! });
//!
//! service
//!     .publish(
//!         "BUTTON_CLICK",
//!         PublishOptions::new().with_plugin_data(
//!             RollbarPlugin::NAME,
//!             PluginData::from_properties(json!({"button_name": "submit"})),
//!         ),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{Catalog, EventOptions, PluginData, Snapshot};
use crate::error::ServiceError;
use crate::model::EventModel;
use crate::plugin::Plugin;

/// Options for constructing a [`Service`].
pub struct ServiceOptions {
    /// The application's event catalog.
    pub catalog: Catalog,
    /// Plugins participating in the publish pipeline.
    pub plugins: Vec<Arc<dyn Plugin>>,
    /// Name of the embedding application (recorded on snapshots).
    pub product_name: String,
    /// Version of the embedding application (recorded on snapshots).
    pub product_version: String,
}

/// Per-publish-call options: plugin payloads keyed by plugin name.
#[derive(Clone, Debug, Default)]
pub struct PublishOptions {
    /// Payloads routed to individual plugins.
    pub plugin_data: HashMap<String, PluginData>,
}

impl PublishOptions {
    /// Options with no plugin payloads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a payload to the named plugin for this call.
    pub fn with_plugin_data(mut self, plugin: impl Into<String>, data: PluginData) -> Self {
        self.plugin_data.insert(plugin.into(), data);
        self
    }
}

/// Drives catalog events through registered plugins.
pub struct Service {
    catalog: Catalog,
    plugins: Vec<Arc<dyn Plugin>>,
    product_name: String,
    product_version: String,
}

impl Service {
    /// Builds a service from its options.
    pub fn new(options: ServiceOptions) -> Self {
        Self {
            catalog: options.catalog,
            plugins: options.plugins,
            product_name: options.product_name,
            product_version: options.product_version,
        }
    }

    /// The service's catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a registered plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|plugin| plugin.name() == name)
    }

    /// True when the named plugin exists and all its publishers hold a
    /// live client handle. False when the plugin is not registered.
    pub async fn is_plugin_available(&self, name: &str) -> bool {
        let Some(plugin) = self.plugin(name) else {
            return false;
        };
        for publisher in plugin.publishers() {
            if !publisher.is_available().await {
                return false;
            }
        }
        true
    }

    /// Publishes a catalog event through every plugin handling its type.
    ///
    /// # Errors
    /// [`ServiceError::UnknownEvent`] when the id is not in the catalog;
    /// [`ServiceError::Model`] when runtime properties fail validation.
    pub async fn publish(
        &self,
        event_id: &str,
        options: PublishOptions,
    ) -> Result<(), ServiceError> {
        let def = self
            .catalog
            .get(event_id)
            .ok_or_else(|| ServiceError::UnknownEvent {
                id: event_id.to_owned(),
            })?;

        for plugin in &self.plugins {
            if !plugin.event_types().contains(&def.event_type) {
                continue;
            }

            let mut snapshot = Snapshot::new(def.clone())
                .with_product(self.product_name.clone(), self.product_version.clone());
            snapshot.event_options = options
                .plugin_data
                .get(plugin.name())
                .cloned()
                .map(|data| EventOptions { data: Some(data) });

            let model = EventModel::new(def.clone());
            model.get_data(Some(&snapshot))?;

            for publisher in plugin.publishers() {
                if !publisher.should_publish_event(&snapshot) {
                    continue;
                }
                let output = publisher.get_event_output(&model, &snapshot);
                publisher.publish(output, &snapshot).await;
            }
        }

        Ok(())
    }

    /// Gracefully shuts down every publisher of every plugin.
    pub async fn shutdown(&self) {
        for plugin in &self.plugins {
            for publisher in plugin.publishers() {
                publisher.shutdown().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EventDef, EventType};
    use crate::client::testing::{Call, RecordingClient};
    use crate::client::{CapturedError, Person, RollbarConfig};
    use crate::config::RollbarOptions;
    use crate::error::ModelError;
    use crate::plugin::RollbarPlugin;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new([
            EventDef::new("BUTTON_CLICK", "Button clicked", EventType::Info)
                .with_property("button_name", "string")
                .with_property("page", "string"),
            EventDef::new("API_ERROR", "API request failed", EventType::Error)
                .with_property("error", json!({}))
                .with_property("path", "string")
                .with_property("status", json!(0)),
            EventDef::new("RATE_LIMIT", "Rate limit warning", EventType::Warning)
                .with_property("limit", json!(0))
                .with_property("current", json!(0)),
            EventDef::new("USER_ACTION", "User action", EventType::Debug)
                .with_property("action", "string"),
            EventDef::new("USER_SIGNED_IN", "User identified", EventType::Identify)
                .with_property("id", "string")
                .with_property("username", "string")
                .with_property("email", "string"),
            EventDef::new("USER_SIGNED_OUT", "Clear person", EventType::ClearPerson)
                .with_properties(Default::default()),
            EventDef::new("SIMPLE_EVENT", "No required properties", EventType::Info)
                .with_properties(Default::default()),
        ])
        .expect("catalog")
    }

    fn service() -> (Arc<RecordingClient>, Service) {
        let client = Arc::new(RecordingClient::default());
        let plugin = RollbarPlugin::new(RollbarOptions::new().with_instance(client.clone()))
            .expect("plugin");
        let service = Service::new(ServiceOptions {
            catalog: catalog(),
            plugins: vec![Arc::new(plugin)],
            product_name: "test-app".into(),
            product_version: "1.0.0".into(),
        });
        (client, service)
    }

    fn routed(properties: serde_json::Value) -> PublishOptions {
        PublishOptions::new()
            .with_plugin_data(RollbarPlugin::NAME, PluginData::from_properties(properties))
    }

    fn props(value: serde_json::Value) -> crate::catalog::Properties {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_info_event_reaches_client_with_original_event() {
        let (client, service) = service();
        service
            .publish(
                "BUTTON_CLICK",
                routed(json!({"button_name": "submit", "page": "checkout"})),
            )
            .await
            .expect("publish");

        assert_eq!(
            client.take(),
            vec![Call::Info {
                message: "BUTTON_CLICK".into(),
                extra: props(json!({
                    "button_name": "submit",
                    "page": "checkout",
                    "originalEvent": "BUTTON_CLICK",
                })),
            }]
        );
    }

    #[tokio::test]
    async fn test_error_event_with_captured_error() {
        let (client, service) = service();
        let captured = CapturedError::new("Error", "Network timeout");
        service
            .publish(
                "API_ERROR",
                routed(json!({
                    "error": captured.to_value(),
                    "path": "/api/orders",
                    "status": 504,
                })),
            )
            .await
            .expect("publish");

        assert_eq!(
            client.take(),
            vec![Call::Error {
                message: "API_ERROR".into(),
                error: Some(captured),
                extra: props(json!({
                    "path": "/api/orders",
                    "status": 504,
                    "originalEvent": "API_ERROR",
                })),
            }]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_propagates_and_blocks_dispatch() {
        let (client, service) = service();
        let result = service
            .publish("USER_ACTION", routed(json!({"action": 42})))
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Model(ModelError::TypeMismatch { .. }))
        ));
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_missing_declared_property_propagates() {
        let (client, service) = service();
        let result = service
            .publish("RATE_LIMIT", routed(json!({"limit": 100})))
            .await;

        match result {
            Err(ServiceError::Model(ModelError::MissingProperty { property })) => {
                assert_eq!(property, "current");
            }
            other => panic!("expected MissingProperty, got {other:?}"),
        }
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_event_id_fails() {
        let (client, service) = service();
        let result = service.publish("NOPE", PublishOptions::new()).await;
        assert!(matches!(result, Err(ServiceError::UnknownEvent { id }) if id == "NOPE"));
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_unrouted_event_is_dropped_by_null_gate() {
        let (client, service) = service();
        service
            .publish("SIMPLE_EVENT", PublishOptions::new())
            .await
            .expect("publish succeeds");
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_minimal_routed_data_publishes_with_empty_properties() {
        let (client, service) = service();
        service
            .publish(
                "SIMPLE_EVENT",
                PublishOptions::new()
                    .with_plugin_data(RollbarPlugin::NAME, PluginData::new()),
            )
            .await
            .expect("publish");

        assert_eq!(
            client.take(),
            vec![Call::Info {
                message: "SIMPLE_EVENT".into(),
                extra: props(json!({"originalEvent": "SIMPLE_EVENT"})),
            }]
        );
    }

    #[tokio::test]
    async fn test_identify_then_event_then_clear_person_flow() {
        let (client, service) = service();

        service
            .publish(
                "USER_SIGNED_IN",
                routed(json!({
                    "id": "usr-1",
                    "username": "bob",
                    "email": "bob@example.com",
                })),
            )
            .await
            .expect("identify");
        service
            .publish(
                "BUTTON_CLICK",
                routed(json!({"button_name": "save", "page": "settings"})),
            )
            .await
            .expect("event");
        service
            .publish("USER_SIGNED_OUT", routed(json!({})))
            .await
            .expect("clear");

        let calls = client.take();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            Call::Configure(RollbarConfig::person_update(Person {
                id: Some(json!("usr-1")),
                username: Some(json!("bob")),
                email: Some(json!("bob@example.com")),
            }))
        );
        assert!(matches!(&calls[1], Call::Info { message, .. } if message == "BUTTON_CLICK"));
        assert_eq!(
            calls[2],
            Call::Configure(RollbarConfig::person_update(Person::cleared()))
        );
    }

    #[tokio::test]
    async fn test_plugin_availability_surface() {
        let (_, service) = service();
        assert!(service.is_plugin_available(RollbarPlugin::NAME).await);
        assert!(!service.is_plugin_available("absent").await);
    }

    #[tokio::test]
    async fn test_shutdown_is_a_no_op() {
        let (client, service) = service();
        service.shutdown().await;
        assert!(client.is_empty());
    }
}
