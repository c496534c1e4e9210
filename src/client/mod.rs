//! Rollbar client seam: trait, config types, captured errors, transport.
//!
//! ## Contents
//! - [`RollbarClient`] — the boundary the publisher dispatches into
//! - [`RollbarConfig`], [`Payload`], [`Person`] — configuration/wire types
//! - [`CapturedError`] — structured errors inside runtime properties
//! - [`HttpTransport`] — Item API delivery (feature `transport`)

mod api;
mod captured;
mod config;
#[cfg(feature = "transport")]
mod http;

pub use api::RollbarClient;
pub use captured::CapturedError;
pub use config::{Payload, Person, RollbarConfig};
#[cfg(feature = "transport")]
pub use http::HttpTransport;
