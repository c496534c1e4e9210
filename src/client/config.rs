//! # Rollbar client configuration.
//!
//! [`RollbarConfig`] mirrors the subset of the Rollbar configuration
//! reference this crate acts on. Every field is optional so the same
//! type serves three roles:
//!
//! - the **base/override configs** supplied through
//!   [`RollbarOptions`](crate::RollbarOptions), combined with the
//!   shallow [`RollbarConfig::merged`] (later overrides earlier, whole
//!   sections replaced — object-spread semantics);
//! - the **resolved config** a transport is constructed with;
//! - the **configure updates** sent at runtime (person changes), folded
//!   in with [`RollbarConfig::apply`], which merges the payload section
//!   field-wise so a person update does not wipe context/environment.
//!
//! ## Example
//! ```
//! use stratum_rollbar::{Level, RollbarConfig};
//!
//! let base = RollbarConfig {
//!     environment: Some("shared".into()),
//!     report_level: Some(Level::Info),
//!     ..Default::default()
//! };
//! let overrides = RollbarConfig {
//!     environment: Some("production".into()),
//!     ..Default::default()
//! };
//!
//! let resolved = base.merged(overrides);
//! assert_eq!(resolved.environment.as_deref(), Some("production"));
//! assert_eq!(resolved.report_level, Some(Level::Info));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Level, Properties};

/// Person (user) identity attached to subsequent Rollbar reports.
///
/// `id` distinguishes three states the wire format cares about:
/// `None` (absent — no id supplied), `Some(Value::Null)` (explicit null —
/// clears the person), and `Some(value)` (a concrete id).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Person id; explicit null clears the tracked person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Optional username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Value>,
    /// Optional email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

impl Person {
    /// Person with all fields absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicit-null person used to clear identity tracking.
    pub fn cleared() -> Self {
        Self {
            id: Some(Value::Null),
            ..Self::default()
        }
    }

    /// True when the person carries a concrete (non-null) id.
    pub fn has_id(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.is_null())
    }
}

/// Payload section of the Rollbar configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Environment recorded on each item (falls back to the top-level
    /// config environment).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Application context string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Person identity attached to reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    /// Free-form custom data merged into every item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Properties>,
}

impl Payload {
    /// Field-wise merge: fields set in `overrides` win.
    fn merged(self, overrides: Payload) -> Payload {
        Payload {
            environment: overrides.environment.or(self.environment),
            context: overrides.context.or(self.context),
            person: overrides.person.or(self.person),
            custom: overrides.custom.or(self.custom),
        }
    }
}

/// Rollbar client configuration (all fields optional).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbarConfig {
    /// Project access token sent with each item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Master switch; `None` counts as enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Environment name (e.g. `production`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Code version reported with items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_version: Option<String>,
    /// Minimum severity forwarded by the transport; `None` sends all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_level: Option<Level>,
    /// Item API endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Property names whose values are masked before sending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrub_fields: Option<Vec<String>>,
    /// Log every outgoing item at debug level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    /// Payload section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl RollbarConfig {
    /// Shallow merge with object-spread semantics: any field set in
    /// `overrides` replaces the base field wholesale, including the
    /// whole `payload` section.
    pub fn merged(self, overrides: RollbarConfig) -> RollbarConfig {
        RollbarConfig {
            access_token: overrides.access_token.or(self.access_token),
            enabled: overrides.enabled.or(self.enabled),
            environment: overrides.environment.or(self.environment),
            code_version: overrides.code_version.or(self.code_version),
            report_level: overrides.report_level.or(self.report_level),
            endpoint: overrides.endpoint.or(self.endpoint),
            scrub_fields: overrides.scrub_fields.or(self.scrub_fields),
            verbose: overrides.verbose.or(self.verbose),
            payload: overrides.payload.or(self.payload),
        }
    }

    /// Folds a runtime configure update into this config.
    ///
    /// Same as [`RollbarConfig::merged`] except the payload section is
    /// combined field-wise, so `configure(person update)` keeps the
    /// configured context, environment, and custom data.
    pub fn apply(&mut self, update: RollbarConfig) {
        let mut update = update;
        let payload = match (self.payload.take(), update.payload.take()) {
            (Some(base), Some(overrides)) => Some(base.merged(overrides)),
            (base, overrides) => overrides.or(base),
        };
        let mut merged = std::mem::take(self).merged(update);
        merged.payload = payload;
        *self = merged;
    }

    /// A configure update that only sets the tracked person.
    pub fn person_update(person: Person) -> RollbarConfig {
        RollbarConfig {
            payload: Some(Payload {
                person: Some(person),
                ..Payload::default()
            }),
            ..RollbarConfig::default()
        }
    }

    /// `enabled` with the default applied.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
