//! # Publisher configuration.
//!
//! [`RollbarOptions`] collects everything the publisher needs at
//! construction time: token candidates, the shared base config,
//! per-runtime override configs, an optional pre-built client, and the
//! execution [`Runtime`].
//!
//! Token resolution is runtime-aware so the same options object can ship
//! in a binary that runs on both sides of a server/client split:
//!
//! - [`Runtime::Server`] prefers `server_access_token`, falling back to
//!   `access_token`;
//! - [`Runtime::Client`] prefers `client_access_token`, falling back to
//!   `access_token`.
//!
//! When no token resolves for the detected runtime the publisher simply
//! stays uninitialized — a server-only token must not silently activate
//! in a client build. Empty-string tokens count as absent.
//!
//! # Example
//! ```
//! use stratum_rollbar::{RollbarConfig, RollbarOptions, Runtime};
//!
//! let options = RollbarOptions::new()
//!     .with_server_access_token("post-server-token")
//!     .with_config(RollbarConfig {
//!         environment: Some("production".into()),
//!         ..Default::default()
//!     });
//!
//! assert_eq!(options.token_for_runtime(), Some("post-server-token"));
//! assert_eq!(
//!     RollbarOptions { runtime: Runtime::Client, ..options }.token_for_runtime(),
//!     None,
//! );
//! ```

use std::sync::Arc;

use crate::client::{RollbarClient, RollbarConfig};

/// Execution environment of the embedding application.
///
/// Decided once at startup by the embedder and passed in explicitly;
/// native builds are servers, wasm/browser builds are clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Runtime {
    /// Server-side process (native binary, backend service).
    #[default]
    Server,
    /// Client-side process (browser/wasm embedding).
    Client,
}

/// Options for constructing a [`RollbarPublisher`](crate::RollbarPublisher).
///
/// Exactly one underlying client handle results from these options: the
/// pre-built `instance` when supplied, a transport built from the
/// resolved token otherwise, or none when no token matches the runtime.
#[derive(Clone, Default)]
pub struct RollbarOptions {
    /// Access token used when no runtime-specific token is set.
    pub access_token: Option<String>,
    /// Token for the server runtime (Rollbar `post_server_item`).
    pub server_access_token: Option<String>,
    /// Token for the client runtime (Rollbar `post_client_item`).
    pub client_access_token: Option<String>,
    /// Base configuration applied in both runtimes.
    pub config: Option<RollbarConfig>,
    /// Server-only configuration overrides.
    pub server_config: Option<RollbarConfig>,
    /// Client-only configuration overrides.
    pub client_config: Option<RollbarConfig>,
    /// Pre-built client; skips token-based initialization.
    pub instance: Option<Arc<dyn RollbarClient>>,
    /// Execution environment, decided once by the embedder.
    pub runtime: Runtime,
    /// Enables debug logging in the publisher.
    pub debug: bool,
}

impl RollbarOptions {
    /// Empty options; fill in with the `with_*` builders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime-agnostic fallback token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the server-runtime token.
    pub fn with_server_access_token(mut self, token: impl Into<String>) -> Self {
        self.server_access_token = Some(token.into());
        self
    }

    /// Sets the client-runtime token.
    pub fn with_client_access_token(mut self, token: impl Into<String>) -> Self {
        self.client_access_token = Some(token.into());
        self
    }

    /// Sets the shared base configuration.
    pub fn with_config(mut self, config: RollbarConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets server-only configuration overrides.
    pub fn with_server_config(mut self, config: RollbarConfig) -> Self {
        self.server_config = Some(config);
        self
    }

    /// Sets client-only configuration overrides.
    pub fn with_client_config(mut self, config: RollbarConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    /// Adopts a pre-built client instead of token-based initialization.
    pub fn with_instance(mut self, instance: Arc<dyn RollbarClient>) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Sets the execution runtime.
    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = runtime;
        self
    }

    /// Enables debug logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// True when any of the three token fields is non-empty.
    pub fn has_any_token(&self) -> bool {
        non_empty(&self.access_token).is_some()
            || non_empty(&self.server_access_token).is_some()
            || non_empty(&self.client_access_token).is_some()
    }

    /// Resolves the token for the configured runtime, if any.
    pub fn token_for_runtime(&self) -> Option<&str> {
        match self.runtime {
            Runtime::Server => {
                non_empty(&self.server_access_token).or_else(|| non_empty(&self.access_token))
            }
            Runtime::Client => {
                non_empty(&self.client_access_token).or_else(|| non_empty(&self.access_token))
            }
        }
    }

    /// Builds the transport configuration for the resolved token.
    ///
    /// Merge order, later overrides earlier: `{access_token}` ← base
    /// `config` ← runtime-specific overrides.
    pub fn resolved_config(&self, access_token: &str) -> RollbarConfig {
        let seed = RollbarConfig {
            access_token: Some(access_token.to_owned()),
            ..RollbarConfig::default()
        };
        let base = self.config.clone().unwrap_or_default();
        let env = match self.runtime {
            Runtime::Server => self.server_config.clone(),
            Runtime::Client => self.client_config.clone(),
        }
        .unwrap_or_default();

        seed.merged(base).merged(env)
    }
}

fn non_empty(token: &Option<String>) -> Option<&str> {
    token.as_deref().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Level;

    #[test]
    fn test_server_prefers_server_token() {
        let options = RollbarOptions::new()
            .with_access_token("fallback")
            .with_server_access_token("server")
            .with_client_access_token("client");
        assert_eq!(options.token_for_runtime(), Some("server"));
    }

    #[test]
    fn test_client_prefers_client_token() {
        let options = RollbarOptions::new()
            .with_access_token("fallback")
            .with_server_access_token("server")
            .with_client_access_token("client")
            .with_runtime(Runtime::Client);
        assert_eq!(options.token_for_runtime(), Some("client"));
    }

    #[test]
    fn test_both_runtimes_fall_back_to_access_token() {
        let options = RollbarOptions::new().with_access_token("fallback");
        assert_eq!(options.token_for_runtime(), Some("fallback"));
        assert_eq!(
            options.clone().with_runtime(Runtime::Client).token_for_runtime(),
            Some("fallback")
        );
    }

    #[test]
    fn test_runtime_scoped_token_does_not_leak() {
        let options = RollbarOptions::new()
            .with_server_access_token("server-only")
            .with_runtime(Runtime::Client);
        assert!(options.has_any_token());
        assert_eq!(options.token_for_runtime(), None);
    }

    #[test]
    fn test_empty_tokens_count_as_absent() {
        let options = RollbarOptions::new().with_access_token("");
        assert!(!options.has_any_token());
        assert_eq!(options.token_for_runtime(), None);
    }

    #[test]
    fn test_resolved_config_merge_order() {
        let options = RollbarOptions::new()
            .with_access_token("resolved-token")
            .with_config(RollbarConfig {
                environment: Some("shared".into()),
                report_level: Some(Level::Info),
                ..RollbarConfig::default()
            })
            .with_server_config(RollbarConfig {
                environment: Some("server".into()),
                ..RollbarConfig::default()
            });

        let config = options.resolved_config("resolved-token");
        assert_eq!(config.access_token.as_deref(), Some("resolved-token"));
        // Env-specific overrides win over the shared base.
        assert_eq!(config.environment.as_deref(), Some("server"));
        // Base fields without overrides survive.
        assert_eq!(config.report_level, Some(Level::Info));
    }

    #[test]
    fn test_base_config_token_overrides_resolved() {
        let options = RollbarOptions::new()
            .with_access_token("resolved-token")
            .with_config(RollbarConfig {
                access_token: Some("explicit-token".into()),
                ..RollbarConfig::default()
            });
        let config = options.resolved_config("resolved-token");
        assert_eq!(config.access_token.as_deref(), Some("explicit-token"));
    }
}
