//! # stratum-rollbar
//!
//! **stratum-rollbar** publishes catalog-declared observability events to
//! [Rollbar](https://rollbar.com).
//!
//! Applications declare their events once in a [`Catalog`] — id,
//! description, severity/identity type, and a property schema — and
//! publish by id. The pipeline validates runtime properties against the
//! declared schema, resolves which Rollbar project token applies to the
//! current runtime (server vs. client), and dispatches each event to the
//! matching client method: severity events become Rollbar log items,
//! identity events manage the tracked person.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐      ┌───────────────────────────────────────┐
//!     │   Catalog    │      │  Service (publish pipeline)           │
//!     │  (EventDefs) ├─────►│  - lookup + per-plugin Snapshot       │
//!     └──────────────┘      │  - EventModel validation              │
//!                           │  - Publisher extraction + dispatch    │
//!                           └──────┬────────────────────────────────┘
//!                                  ▼
//!                      ┌───────────────────────┐
//!                      │   RollbarPlugin       │
//!                      │   └─ RollbarPublisher │
//!                      └──────────┬────────────┘
//!                                 ▼
//!                    ┌─────────────────────────┐
//!                    │  dyn RollbarClient      │
//!                    │  ├─ HttpTransport       │  POST /api/1/item/
//!                    │  └─ pre-built instance  │  (embedder-owned)
//!                    └─────────────────────────┘
//! ```
//!
//! ### Publish cycle
//! ```text
//! service.publish(id, options)
//!   ├─► Catalog lookup                    (UnknownEvent on miss)
//!   ├─► Snapshot { event, routed data }   (options.plugin_data[plugin])
//!   ├─► EventModel::get_data              (TypeMismatch / MissingProperty)
//!   ├─► Publisher::get_event_output       (None unless data was routed)
//!   └─► Publisher::publish                (infallible; drops + warns when
//!                                          no client handle exists)
//! ```
//!
//! ## Features
//! | Area            | Description                                             | Key types / traits                      |
//! |-----------------|---------------------------------------------------------|-----------------------------------------|
//! | **Catalog**     | Declare events and property schemas, build registries.  | [`Catalog`], [`EventDef`], [`EventType`]|
//! | **Validation**  | Match runtime property kinds against declared schemas.  | [`EventModel`], [`ValueKind`]           |
//! | **Publishing**  | Token resolution, extraction, severity/person dispatch. | [`RollbarPublisher`], [`Publisher`]     |
//! | **Client seam** | Swap the transport for a pre-built or recording client. | [`RollbarClient`], [`CapturedError`]    |
//! | **Pipeline**    | Wire catalog + plugins, publish by id.                  | [`Service`], [`RollbarPlugin`]          |
//! | **Errors**      | Typed construction/validation/pipeline errors.          | [`ConfigError`], [`ModelError`]         |
//!
//! ## Optional features
//! - `transport` *(default)*: HTTP delivery to the Rollbar Item API via
//!   `reqwest`. Without it, supply a pre-built client instance.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use stratum_rollbar::{
//!     Catalog, EventDef, EventType, PluginData, PublishOptions, RollbarConfig,
//!     RollbarOptions, RollbarPlugin, Runtime, Service, ServiceOptions,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::new([
//!         EventDef::new("API_ERROR", "API request failed", EventType::Error)
//!             .with_property("path", "string")
//!             .with_property("status", 0),
//!         EventDef::new("USER_SIGNED_IN", "User identified", EventType::Identify)
//!             .with_property("id", "string"),
//!     ])?;
//!
//!     let plugin = RollbarPlugin::new(
//!         RollbarOptions::new()
//!             .with_server_access_token("post-server-token")
//!             .with_runtime(Runtime::Server)
//!             .with_config(RollbarConfig {
//!                 environment: Some("production".into()),
//!                 ..Default::default()
//!             }),
//!     )?;
//!
//!     let service = Service::new(ServiceOptions {
//!         catalog,
//!         plugins: vec![Arc::new(plugin)],
//!         product_name: "demo-app".into(),
//!         product_version: "1.0.0".into(),
//!     });
//!
//!     service
//!         .publish(
//!             "API_ERROR",
//!             PublishOptions::new().with_plugin_data(
//!                 RollbarPlugin::NAME,
//!                 PluginData::from_properties(json!({"path": "/api/users", "status": 503})),
//!             ),
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod config;
mod error;
mod model;
mod plugin;
mod publishers;
mod service;

// ---- Public re-exports ----

pub use catalog::{Catalog, EventDef, EventOptions, EventType, Level, PluginData, Properties, Snapshot};
pub use client::{CapturedError, Payload, Person, RollbarClient, RollbarConfig};
pub use config::{RollbarOptions, Runtime};
pub use error::{CatalogError, ConfigError, ModelError, ServiceError};
pub use model::{EventModel, ValueKind};
pub use plugin::{Plugin, RollbarPlugin};
pub use publishers::{EventOutput, Publisher, RollbarPublisher};
pub use service::{PublishOptions, Service, ServiceOptions};

// Optional: HTTP delivery to the Rollbar Item API.
// Enable with: `--features transport` (on by default).
#[cfg(feature = "transport")]
pub use client::HttpTransport;
