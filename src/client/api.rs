//! # Rollbar client seam.
//!
//! [`RollbarClient`] is the boundary between the publisher's dispatch
//! logic and whatever actually delivers items to Rollbar: the bundled
//! [`HttpTransport`](crate::HttpTransport), a pre-built client the
//! embedding application already owns, or a recording double in tests.
//!
//! Methods are synchronous by contract: implementations hand the item
//! to their own fire-and-forget delivery path and return immediately.
//! Nothing in the publish pipeline awaits network completion.

use crate::catalog::Properties;
use crate::client::captured::CapturedError;
use crate::client::config::RollbarConfig;

/// Severity methods and runtime configuration of a Rollbar client.
///
/// `critical`/`error` accept an optional captured exception so items can
/// carry a trace; the lower severities are message-only, matching the
/// Rollbar method reference.
pub trait RollbarClient: Send + Sync {
    /// Reports at critical severity.
    fn critical(&self, message: &str, error: Option<&CapturedError>, extra: &Properties);

    /// Reports at error severity.
    fn error(&self, message: &str, error: Option<&CapturedError>, extra: &Properties);

    /// Reports at warning severity.
    fn warning(&self, message: &str, extra: &Properties);

    /// Reports at info severity.
    fn info(&self, message: &str, extra: &Properties);

    /// Reports at debug severity.
    fn debug(&self, message: &str, extra: &Properties);

    /// Reports at the client's default severity.
    fn log(&self, message: &str, extra: &Properties);

    /// Folds a configuration update (e.g. a person change) into the
    /// client's live config.
    fn configure(&self, update: RollbarConfig);
}
