//! # Catalog: id-keyed registry of event definitions.
//!
//! A [`Catalog`] is built once at startup from the application's declared
//! events and stays immutable afterwards. Construction rejects duplicate
//! ids so that a publish call always resolves to exactly one definition.
//!
//! Catalogs can be declared in code with the [`EventDef`] builders or
//! loaded from a JSON array via [`Catalog::from_json`].
//!
//! ## Example
//! ```
//! use stratum_rollbar::{Catalog, EventDef, EventType};
//!
//! let catalog = Catalog::new([
//!     EventDef::new("BUTTON_CLICK", "Button clicked", EventType::Info)
//!         .with_property("button_name", "string"),
//!     EventDef::new("USER_SIGNED_OUT", "Clear Rollbar person", EventType::ClearPerson),
//! ])?;
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.get("BUTTON_CLICK").is_some());
//! assert!(catalog.get("NOPE").is_none());
//! # Ok::<(), stratum_rollbar::CatalogError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::event::EventDef;
use crate::error::CatalogError;

/// Immutable registry of catalog event definitions, keyed by id.
///
/// Definitions are stored behind `Arc` so per-publish snapshots can
/// reference them without cloning the schema maps.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: HashMap<String, Arc<EventDef>>,
}

impl Catalog {
    /// Builds a catalog from event definitions.
    ///
    /// Fails with [`CatalogError::DuplicateEvent`] when two definitions
    /// share an id.
    pub fn new(defs: impl IntoIterator<Item = EventDef>) -> Result<Self, CatalogError> {
        let mut items = HashMap::new();
        for def in defs {
            let id = def.id.clone();
            if items.insert(id.clone(), Arc::new(def)).is_some() {
                return Err(CatalogError::DuplicateEvent { id });
            }
        }
        Ok(Self { items })
    }

    /// Parses a catalog from a JSON array of event definitions.
    ///
    /// ```
    /// use stratum_rollbar::Catalog;
    ///
    /// let catalog = Catalog::from_json(
    ///     r#"[{"id": "PING", "description": "Ping", "eventType": "debug"}]"#,
    /// )?;
    /// assert!(catalog.get("PING").is_some());
    /// # Ok::<(), stratum_rollbar::CatalogError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<EventDef> = serde_json::from_str(json)?;
        Self::new(defs)
    }

    /// Looks up a definition by id.
    pub fn get(&self, id: &str) -> Option<&Arc<EventDef>> {
        self.items.get(id)
    }

    /// Number of definitions in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all definitions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EventDef>> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::event::EventType;

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new([
            EventDef::new("EV", "first", EventType::Info),
            EventDef::new("EV", "second", EventType::Error),
        ]);
        match result {
            Err(CatalogError::DuplicateEvent { id }) => assert_eq!(id, "EV"),
            other => panic!("expected DuplicateEvent, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_returns_declared_definition() {
        let catalog = Catalog::new([
            EventDef::new("A", "a", EventType::Info).with_property("foo", "string")
        ])
        .expect("catalog");
        let def = catalog.get("A").expect("present");
        assert_eq!(def.description, "a");
        assert!(def.properties.as_ref().is_some_and(|p| p.contains_key("foo")));
    }

    #[test]
    fn test_from_json_parses_definitions() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "X", "description": "x", "eventType": "warning",
                 "properties": {"limit": "number"}},
                {"id": "Y", "description": "y", "eventType": "clear_person"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Y").expect("y").event_type, EventType::ClearPerson);
    }

    #[test]
    fn test_from_json_rejects_bad_event_type() {
        let result = Catalog::from_json(r#"[{"id": "X", "description": "x", "eventType": "fatal"}]"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
