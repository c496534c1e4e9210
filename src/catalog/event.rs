//! # Catalog event types and definitions.
//!
//! [`EventType`] is the closed set of event classifications this crate
//! publishes to Rollbar:
//!
//! - **Severity events** (`critical`, `error`, `warning`, `info`, `debug`)
//!   map 1:1 to the Rollbar client's log methods.
//! - **Identity events** (`identify`, `clear_person`) manage the Rollbar
//!   person associated with subsequent reports.
//!
//! [`EventDef`] is the static, author-declared shape of a catalog event:
//! an id, a description, an event type, and an optional property schema.
//! The schema maps property names to *placeholder values*; the JSON kind
//! of each placeholder is the declared type for that property. A catalog
//! entry such as
//!
//! ```json
//! { "id": "API_ERROR", "description": "API request failed",
//!   "eventType": "error",
//!   "properties": { "error": {}, "path": "string", "status": 0 } }
//! ```
//!
//! declares `error` as an object and `path` as a string: the placeholder
//! `"string"` is itself a string. Note that the placeholder `"number"`
//! also declares a *string* (it is a string that reads "number"); a
//! numeric property needs a numeric placeholder such as `0`. Placeholder
//! content beyond its kind is documentation for catalog readers.
//!
//! ## Example
//! ```
//! use stratum_rollbar::{EventDef, EventType, Level};
//!
//! let def = EventDef::new("BUTTON_CLICK", "Button clicked", EventType::Info)
//!     .with_property("button_name", "string")
//!     .with_property("page", "string");
//!
//! assert_eq!(def.id, "BUTTON_CLICK");
//! assert_eq!(def.event_type.level(), Some(Level::Info));
//! assert!(def.event_type.is_severity());
//! assert!(!EventType::Identify.is_severity());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime property values and catalog placeholder maps.
///
/// Keyed by property name; values are arbitrary JSON.
pub type Properties = serde_json::Map<String, Value>;

/// Classification of catalog events.
///
/// Closed enumeration: the five severity variants plus the two
/// person-identity variants. Serialized in snake_case (`clear_person`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Log at critical severity.
    Critical,
    /// Log at error severity.
    Error,
    /// Log at warning severity.
    Warning,
    /// Log at info severity.
    Info,
    /// Log at debug severity.
    Debug,
    /// Set the current person (user) for Rollbar.
    Identify,
    /// Clear the current person (e.g. on logout).
    ClearPerson,
}

impl EventType {
    /// Returns the snake_case wire name of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Critical => "critical",
            EventType::Error => "error",
            EventType::Warning => "warning",
            EventType::Info => "info",
            EventType::Debug => "debug",
            EventType::Identify => "identify",
            EventType::ClearPerson => "clear_person",
        }
    }

    /// Maps a severity event type to its report [`Level`].
    ///
    /// Identity event types (`identify`, `clear_person`) have no level and
    /// return `None`.
    pub fn level(&self) -> Option<Level> {
        match self {
            EventType::Critical => Some(Level::Critical),
            EventType::Error => Some(Level::Error),
            EventType::Warning => Some(Level::Warning),
            EventType::Info => Some(Level::Info),
            EventType::Debug => Some(Level::Debug),
            EventType::Identify | EventType::ClearPerson => None,
        }
    }

    /// True for the five severity variants, false for identity variants.
    pub fn is_severity(&self) -> bool {
        self.level().is_some()
    }

    /// All seven event types, in severity-then-identity order.
    pub const ALL: [EventType; 7] = [
        EventType::Critical,
        EventType::Error,
        EventType::Warning,
        EventType::Info,
        EventType::Debug,
        EventType::Identify,
        EventType::ClearPerson,
    ];
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report severity level, ordered `debug < info < warning < error < critical`.
///
/// Used both for dispatching to the matching client method and for the
/// transport's `report_level` gate (items below the configured level are
/// not sent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Lowest severity.
    Debug,
    Info,
    Warning,
    Error,
    /// Highest severity.
    Critical,
}

impl Level {
    /// Returns the lowercase wire name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static, author-declared catalog event definition.
///
/// Immutable after catalog construction. The optional `properties` map
/// declares the runtime property schema: each entry's placeholder value
/// sets the expected JSON kind for the runtime value of the same name.
/// Entries with a `null` placeholder are optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDef {
    /// Unique id within a catalog; doubles as the Rollbar message title.
    pub id: String,
    /// Human-readable description for catalog readers.
    pub description: String,
    /// Event classification.
    pub event_type: EventType,
    /// Declared property schema (name → placeholder value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl EventDef {
    /// Creates a definition with no declared properties.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        event_type: EventType,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            event_type,
            properties: None,
        }
    }

    /// Replaces the declared property schema wholesale.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Declares a single property with the given placeholder value.
    ///
    /// The placeholder's JSON kind is the declared type; its content is
    /// documentation. An empty map is created on first use, so an event
    /// declared only through `with_property` calls has `Some` properties.
    pub fn with_property(mut self, name: impl Into<String>, placeholder: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(name.into(), placeholder.into());
        self
    }
}
