//! # Event model: catalog/runtime property validation.
//!
//! [`EventModel`] wraps one catalog [`EventDef`] and enforces the
//! type-matching contract between the declared property schema and the
//! runtime values a caller supplies at publish time.
//!
//! ## Validation rules
//! Validation runs only when **both** sides exist: the catalog declares
//! `properties` *and* the snapshot carries runtime properties. Then, for
//! each declared property name:
//!
//! 1. a runtime value of a different [`ValueKind`] than the declared
//!    placeholder fails with [`ModelError::TypeMismatch`];
//! 2. a missing runtime entry for a declared (non-null placeholder)
//!    property fails with [`ModelError::MissingProperty`].
//!
//! Runtime properties with no declared counterpart pass through
//! unchecked, and a `null` placeholder marks a declared property as
//! optional.
//!
//! On success [`EventModel::get_data`] returns the merged event record.
//! Its `properties` echo the **catalog's declared descriptors**, not the
//! runtime values: validation reads the runtime side, but the returned
//! record is catalog metadata. Downstream dispatch re-reads the runtime
//! values from the snapshot, so nothing consumes the echoed descriptors
//! as data.
//!
//! All seven event types share this exact logic; the type tag rides
//! along in the wrapped [`EventDef`] purely for registration/dispatch.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use stratum_rollbar::{EventDef, EventModel, EventType, PluginData, Snapshot};
//!
//! let def = EventDef::new("EVENT_WITH_FOO", "Event with foo", EventType::Info)
//!     .with_property("foo", "string");
//! let model = EventModel::new(Arc::new(def));
//!
//! let snap = Snapshot::new(model.item().clone().into())
//!     .with_data(PluginData::from_properties(json!({"foo": "bar"})));
//! let merged = model.get_data(Some(&snap))?;
//!
//! assert_eq!(merged.id, "EVENT_WITH_FOO");
//! // Echoes the catalog descriptor, not the runtime value:
//! assert_eq!(merged.properties.unwrap()["foo"], json!("string"));
//! # Ok::<(), stratum_rollbar::ModelError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::catalog::{EventDef, EventType, Snapshot};
use crate::error::ModelError;

/// JSON value kinds as seen by the validation contract.
///
/// Mirrors the JS `typeof` view of JSON data: arrays and `null` count as
/// objects, so a catalog placeholder of `{}`, `[]`, or a runtime object
/// all share the `object` kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON string.
    String,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON object, array, or null.
    Object,
}

impl ValueKind {
    /// Classifies a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null | Value::Array(_) | Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns the lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates and merges one catalog event against per-call runtime data.
///
/// One model type serves all seven event types; the tag lives in the
/// wrapped definition.
#[derive(Clone, Debug)]
pub struct EventModel {
    item: Arc<EventDef>,
}

impl EventModel {
    /// Wraps a catalog definition.
    pub fn new(item: Arc<EventDef>) -> Self {
        Self { item }
    }

    /// The wrapped definition's id.
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// The wrapped definition's event type.
    pub fn event_type(&self) -> EventType {
        self.item.event_type
    }

    /// The wrapped catalog definition.
    pub fn item(&self) -> &EventDef {
        &self.item
    }

    /// Validates runtime properties against the declared schema and
    /// returns the merged event record.
    ///
    /// No validation is performed when the catalog declares no
    /// properties or when the snapshot carries no runtime properties;
    /// the declaration is returned unchanged in both cases.
    ///
    /// # Errors
    /// [`ModelError::TypeMismatch`] when a runtime value's kind differs
    /// from its declared placeholder; [`ModelError::MissingProperty`]
    /// when a declared (non-null) property has no runtime entry.
    pub fn get_data(&self, snapshot: Option<&Snapshot>) -> Result<EventDef, ModelError> {
        let runtime = snapshot.and_then(Snapshot::runtime_properties);

        if let (Some(runtime), Some(declared)) = (runtime, self.item.properties.as_ref()) {
            for (name, placeholder) in declared {
                match runtime.get(name) {
                    Some(value) => {
                        let expected = ValueKind::of(placeholder);
                        let actual = ValueKind::of(value);
                        if expected != actual {
                            return Err(ModelError::TypeMismatch {
                                property: name.clone(),
                                expected,
                                actual,
                            });
                        }
                    }
                    None => {
                        if !placeholder.is_null() {
                            return Err(ModelError::MissingProperty {
                                property: name.clone(),
                            });
                        }
                    }
                }
            }
        }

        // The merged record echoes the catalog's declared descriptors.
        Ok((*self.item).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PluginData;
    use serde_json::json;

    fn model(def: EventDef) -> EventModel {
        EventModel::new(Arc::new(def))
    }

    fn snapshot_for(model: &EventModel, properties: Value) -> Snapshot {
        Snapshot::new(Arc::new(model.item().clone()))
            .with_data(PluginData::from_properties(properties))
    }

    fn with_foo() -> EventModel {
        model(
            EventDef::new("EVENT_WITH_FOO", "Event with foo property", EventType::Info)
                .with_property("foo", "string"),
        )
    }

    #[test]
    fn test_id_and_event_type_come_from_item() {
        let m = with_foo();
        assert_eq!(m.id(), "EVENT_WITH_FOO");
        assert_eq!(m.event_type(), EventType::Info);
    }

    #[test]
    fn test_matching_kinds_merge_to_catalog_descriptors() {
        let m = with_foo();
        let snap = snapshot_for(&m, json!({"foo": "bar"}));
        let merged = m.get_data(Some(&snap)).expect("valid");
        assert_eq!(merged.id, "EVENT_WITH_FOO");
        assert_eq!(merged.properties.expect("props")["foo"], json!("string"));
    }

    #[test]
    fn test_no_runtime_properties_skips_validation() {
        let m = with_foo();
        let merged = m.get_data(None).expect("no snapshot is fine");
        assert_eq!(merged.id, "EVENT_WITH_FOO");

        let empty_snap = Snapshot::new(Arc::new(m.item().clone()));
        let merged = m.get_data(Some(&empty_snap)).expect("no data is fine");
        assert_eq!(merged.properties.expect("props")["foo"], json!("string"));
    }

    #[test]
    fn test_kind_mismatch_fails_naming_property() {
        let m = with_foo();
        let snap = snapshot_for(&m, json!({"foo": 123}));
        match m.get_data(Some(&snap)) {
            Err(ModelError::TypeMismatch {
                property,
                expected,
                actual,
            }) => {
                assert_eq!(property, "foo");
                assert_eq!(expected, ValueKind::String);
                assert_eq!(actual, ValueKind::Number);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_property_missing_at_runtime_fails() {
        let m = with_foo();
        let snap = snapshot_for(&m, json!({}));
        match m.get_data(Some(&snap)) {
            Err(ModelError::MissingProperty { property }) => assert_eq!(property, "foo"),
            other => panic!("expected MissingProperty, got {other:?}"),
        }
    }

    #[test]
    fn test_null_placeholder_marks_property_optional() {
        let m = model(
            EventDef::new("OPTIONAL", "Optional property", EventType::Warning)
                .with_property("trace_id", Value::Null),
        );
        let snap = snapshot_for(&m, json!({}));
        assert!(m.get_data(Some(&snap)).is_ok());

        // A supplied value for an optional property is still kind-checked
        // against the null placeholder's object kind.
        let snap = snapshot_for(&m, json!({"trace_id": "abc"}));
        assert!(matches!(
            m.get_data(Some(&snap)),
            Err(ModelError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_definitions_without_properties_never_fail() {
        let m = model(EventDef::new("MINIMAL_EVENT", "Minimal event", EventType::Debug));
        for properties in [json!({}), json!({"anything": 42}), json!(null)] {
            let snap = snapshot_for(&m, properties);
            assert!(m.get_data(Some(&snap)).is_ok());
        }
    }

    #[test]
    fn test_empty_declared_schema_never_fails() {
        let m = model(
            EventDef::new("SIMPLE_EVENT", "No required properties", EventType::Info)
                .with_properties(Default::default()),
        );
        let snap = snapshot_for(&m, json!({"extra": true}));
        assert!(m.get_data(Some(&snap)).is_ok());
    }

    #[test]
    fn test_undeclared_runtime_properties_pass_through() {
        let m = with_foo();
        let snap = snapshot_for(&m, json!({"foo": "ok", "unrelated": 7}));
        assert!(m.get_data(Some(&snap)).is_ok());
    }

    #[test]
    fn test_object_kinds_align_with_typeof() {
        let m = model(
            EventDef::new("OBJ", "Object-valued", EventType::Error)
                .with_property("error", json!({})),
        );
        // Arrays and null count as objects, same as typeof.
        for value in [json!({"message": "x"}), json!([1, 2]), json!(null)] {
            let snap = snapshot_for(&m, json!({ "error": value }));
            assert!(m.get_data(Some(&snap)).is_ok());
        }
        let snap = snapshot_for(&m, json!({"error": "boom"}));
        assert!(matches!(
            m.get_data(Some(&snap)),
            Err(ModelError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_validation_identical_across_event_types() {
        for ty in EventType::ALL {
            let m = model(
                EventDef::new("EV", "same rules", ty).with_property("p", "string"),
            );
            let bad = snapshot_for(&m, json!({"p": false}));
            assert!(
                matches!(m.get_data(Some(&bad)), Err(ModelError::TypeMismatch { .. })),
                "event type {ty} should validate like the rest"
            );
        }
    }
}
