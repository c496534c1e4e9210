//! Error types used by the catalog, the event model, and the publisher.
//!
//! This module defines the error enums along the crate's seams:
//!
//! - [`ConfigError`] — publisher construction failures (programmer error).
//! - [`ModelError`] — catalog/runtime property validation failures.
//! - [`CatalogError`] — catalog construction failures.
//! - [`ServiceError`] — publish-pipeline failures surfaced to callers.
//!
//! Configuration and validation errors are returned synchronously and
//! propagate to the caller. Operational unavailability (no Rollbar client
//! handle for the current runtime) is **not** an error value anywhere in
//! this crate: it degrades to a logged warning and a dropped event, so a
//! server-only token never crashes a client build.
//!
//! All enums provide `as_label()` returning a short stable snake_case tag
//! for logs/metrics.

use thiserror::Error;

use crate::model::ValueKind;

/// # Errors produced while constructing a publisher.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No usable access token and no pre-built client were supplied.
    #[error(
        "either access_token, server_access_token, client_access_token, or a pre-built client instance must be provided"
    )]
    MissingToken,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingToken => "config_missing_token",
        }
    }
}

/// # Errors produced by event-model validation.
///
/// Raised when runtime-supplied properties disagree with the catalog's
/// declared property schema. These indicate a catalog/call-site mismatch
/// and must reach the caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ModelError {
    /// A runtime property value has a different kind than the catalog's
    /// declared placeholder for the same name.
    #[error("property {property} is not a type of {expected} (got {actual})")]
    TypeMismatch {
        /// Name of the offending property.
        property: String,
        /// Kind declared by the catalog placeholder.
        expected: ValueKind,
        /// Kind of the runtime value that was supplied.
        actual: ValueKind,
    },

    /// The catalog declares a property with a defined placeholder, but the
    /// runtime properties have no entry for it.
    #[error("property {property} is not defined in the properties")]
    MissingProperty {
        /// Name of the missing property.
        property: String,
    },
}

impl ModelError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use stratum_rollbar::{ModelError, ValueKind};
    ///
    /// let err = ModelError::TypeMismatch {
    ///     property: "foo".into(),
    ///     expected: ValueKind::String,
    ///     actual: ValueKind::Number,
    /// };
    /// assert_eq!(err.as_label(), "model_type_mismatch");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ModelError::TypeMismatch { .. } => "model_type_mismatch",
            ModelError::MissingProperty { .. } => "model_missing_property",
        }
    }

    /// Name of the property the validation failure refers to.
    pub fn property(&self) -> &str {
        match self {
            ModelError::TypeMismatch { property, .. } => property,
            ModelError::MissingProperty { property } => property,
        }
    }
}

/// # Errors produced while building a catalog.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two event definitions share the same id.
    #[error("duplicate event id {id} in catalog")]
    DuplicateEvent {
        /// The repeated event id.
        id: String,
    },

    /// The catalog JSON could not be parsed into event definitions.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            CatalogError::DuplicateEvent { .. } => "catalog_duplicate_event",
            CatalogError::Parse(_) => "catalog_parse",
        }
    }
}

/// # Errors surfaced by the publish pipeline.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The published event id does not exist in the catalog.
    #[error("unknown event id {id}")]
    UnknownEvent {
        /// The id that failed to resolve.
        id: String,
    },

    /// Runtime properties failed catalog validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ServiceError::UnknownEvent { .. } => "service_unknown_event",
            ServiceError::Model(err) => err.as_label(),
        }
    }
}
