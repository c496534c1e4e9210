//! # Rollbar publisher: token resolution and event dispatch.
//!
//! [`RollbarPublisher`] owns the zero-or-one client handle for its
//! lifetime and maps extracted event output onto the client surface:
//!
//! ```text
//! EventOutput { event_name, properties, event_type }
//!     │
//!     ├─ identify      ──► configure(payload.person { id, username, email })
//!     │                      id = properties.id ?? distinct_id ?? user_id
//!     ├─ clear_person  ──► configure(payload.person { id: null })
//!     │
//!     ├─ critical/error ─► client.critical|error(name, captured?, extra)
//!     │                      captured = properties.error when it parses
//!     │                      as a CapturedError (then removed from extra)
//!     └─ warning/info/debug ─► client.warning|info|debug(name, extra)
//!
//! extra = properties (minus a captured error) + originalEvent: name
//! ```
//!
//! ## Rules
//! - Construction decides the client handle once; it is never rebuilt.
//! - `None` content and a missing client handle are silent drops (the
//!   latter with a warning), never errors: monitoring being unreachable
//!   in one runtime must not crash the application.
//! - Extraction returns `None` unless the caller explicitly routed data
//!   to this plugin (`snapshot.event_options.data` present).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{EventType, Level, Properties, Snapshot};
use crate::client::{CapturedError, Person, RollbarClient, RollbarConfig};
use crate::config::RollbarOptions;
use crate::error::ConfigError;
use crate::model::EventModel;
use crate::publishers::publisher::{EventOutput, Publisher};

/// Publishes catalog events to Rollbar.
///
/// ## Example
/// ```
/// use stratum_rollbar::{Publisher, RollbarOptions, RollbarPublisher, Runtime};
///
/// // A server-only token in a client runtime: construction succeeds but
/// // the publisher stays uninitialized on purpose.
/// let publisher = RollbarPublisher::new(
///     RollbarOptions::new()
///         .with_server_access_token("post-server-token")
///         .with_runtime(Runtime::Client),
/// )?;
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// assert!(!publisher.is_available().await);
/// # });
/// # Ok::<(), stratum_rollbar::ConfigError>(())
/// ```
pub struct RollbarPublisher {
    client: Option<Arc<dyn RollbarClient>>,
    debug: bool,
}

impl RollbarPublisher {
    /// Constructs the publisher and resolves its client handle.
    ///
    /// A pre-built instance is adopted directly (a warning is logged if
    /// a token was also supplied). Otherwise at least one token field
    /// must be non-empty, and the token matching `options.runtime` is
    /// used to build the HTTP transport; when no token matches, the
    /// publisher stays uninitialized and drops events with a warning.
    ///
    /// # Errors
    /// [`ConfigError::MissingToken`] when neither a token nor a
    /// pre-built instance is supplied.
    pub fn new(options: RollbarOptions) -> Result<Self, ConfigError> {
        let client = Self::resolve_client(&options)?;
        Ok(Self {
            client,
            debug: options.debug,
        })
    }

    fn resolve_client(
        options: &RollbarOptions,
    ) -> Result<Option<Arc<dyn RollbarClient>>, ConfigError> {
        if let Some(instance) = &options.instance {
            if options.has_any_token() {
                warn!(
                    "Rollbar plugin: both a pre-built client and an access token were provided; \
                     using the pre-built client and ignoring token options"
                );
            }
            return Ok(Some(instance.clone()));
        }

        if !options.has_any_token() {
            return Err(ConfigError::MissingToken);
        }

        match options.token_for_runtime() {
            #[cfg(feature = "transport")]
            Some(token) => Ok(Some(Arc::new(crate::client::HttpTransport::new(
                options.resolved_config(token),
            )))),
            #[cfg(not(feature = "transport"))]
            Some(_token) => {
                warn!(
                    "Rollbar plugin: built without the `transport` feature; \
                     supply a pre-built client instance to publish"
                );
                Ok(None)
            }
            None => {
                if options.debug {
                    debug!(
                        runtime = ?options.runtime,
                        "Rollbar plugin: no token for this runtime; Rollbar will not be initialized"
                    );
                }
                Ok(None)
            }
        }
    }

    fn publish_identity(&self, client: &Arc<dyn RollbarClient>, properties: &Properties) {
        let person = Person {
            id: first_defined(properties, &["id", "distinct_id", "user_id"]),
            username: defined(properties, "username"),
            email: defined(properties, "email"),
        };
        client.configure(RollbarConfig::person_update(person));
    }

    fn publish_severity(
        &self,
        client: &Arc<dyn RollbarClient>,
        level: Level,
        event_name: String,
        mut properties: Properties,
    ) {
        let error = properties
            .get("error")
            .and_then(CapturedError::from_value);
        if error.is_some() {
            properties.remove("error");
        }
        properties.insert(
            "originalEvent".to_owned(),
            Value::String(event_name.clone()),
        );

        match level {
            Level::Critical => client.critical(&event_name, error.as_ref(), &properties),
            Level::Error => client.error(&event_name, error.as_ref(), &properties),
            Level::Warning => client.warning(&event_name, &properties),
            Level::Info => client.info(&event_name, &properties),
            Level::Debug => client.debug(&event_name, &properties),
        }
    }
}

#[async_trait]
impl Publisher for RollbarPublisher {
    fn name(&self) -> &'static str {
        "RollbarPublisher"
    }

    /// Extracts output only for events the caller routed to this plugin.
    ///
    /// `snapshot.event_options.data` is the routing marker the pipeline
    /// sets from the caller's plugin data; without it every catalog
    /// event would be forwarded to Rollbar unconditionally.
    fn get_event_output(&self, model: &EventModel, snapshot: &Snapshot) -> Option<EventOutput> {
        let data = snapshot.event_options.as_ref()?.data.as_ref()?;

        Some(EventOutput {
            event_name: snapshot.event.id.clone(),
            properties: data.properties.clone().unwrap_or_default(),
            event_type: model.event_type(),
        })
    }

    async fn publish(&self, content: Option<EventOutput>, _snapshot: &Snapshot) {
        let Some(output) = content else {
            if self.debug {
                debug!("Rollbar plugin: no content to publish");
            }
            return;
        };

        let Some(client) = &self.client else {
            warn!("Rollbar plugin: Rollbar not initialized");
            return;
        };

        if self.debug {
            debug!(
                event = %output.event_name,
                event_type = %output.event_type,
                "Rollbar plugin: publishing"
            );
        }

        let EventOutput {
            event_name,
            properties,
            event_type,
        } = output;

        match event_type {
            EventType::Identify => self.publish_identity(client, &properties),
            EventType::ClearPerson => {
                client.configure(RollbarConfig::person_update(Person::cleared()));
            }
            EventType::Critical
            | EventType::Error
            | EventType::Warning
            | EventType::Info
            | EventType::Debug => {
                let level = event_type.level().unwrap_or(Level::Info);
                self.publish_severity(client, level, event_name, properties);
            }
        }
    }

    async fn is_available(&self) -> bool {
        self.client.is_some()
    }
}

/// First non-null runtime value among the given keys.
fn first_defined(properties: &Properties, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| defined(properties, key))
}

/// Runtime value for a key, with null degrading to absent.
fn defined(properties: &Properties, key: &str) -> Option<Value> {
    properties.get(key).filter(|v| !v.is_null()).cloned()
}
