//! # HTTP transport for the Rollbar Item API.
//!
//! [`HttpTransport`] implements [`RollbarClient`] over
//! `POST /api/1/item/`. Each severity call builds one item payload and
//! hands it to the ambient tokio runtime; the publish pipeline never
//! waits on the network (delivery failures are logged, not returned).
//!
//! ## Behavior
//! - `enabled: false` drops every item before it is built.
//! - `report_level` gates items below the configured severity.
//! - `scrub_fields` masks matching top-level extra keys with `*****`.
//! - A captured `error` becomes a trace body (exception class/message);
//!   plain calls become message bodies.
//! - The configured person rides on each item once it has a concrete id.
//! - `configure` folds updates into the live config; person updates keep
//!   the rest of the payload section intact.
//!
//! Outside a tokio runtime the item is dropped with a warning; the
//! transport is not a delivery guarantee, Rollbar-side retry is.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::catalog::{Level, Properties};
use crate::client::api::RollbarClient;
use crate::client::captured::CapturedError;
use crate::client::config::RollbarConfig;

const DEFAULT_ENDPOINT: &str = "https://api.rollbar.com/api/1/item/";
const SCRUB_MASK: &str = "*****";

/// Fire-and-forget Rollbar Item API client.
pub struct HttpTransport {
    config: Mutex<RollbarConfig>,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with the given resolved configuration.
    pub fn new(config: RollbarConfig) -> Self {
        Self {
            config: Mutex::new(config),
            http: reqwest::Client::new(),
        }
    }

    /// Builds and dispatches one item at the given level.
    fn report(
        &self,
        level: Level,
        message: &str,
        error: Option<&CapturedError>,
        extra: &Properties,
    ) {
        let config = match self.config.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        if !should_report(&config, level) {
            return;
        }

        let item = build_item(&config, level, message, error, extra);
        if config.verbose.unwrap_or(false) {
            debug!(%level, %message, "rollbar transport: sending item");
        }
        self.send(&config, item);
    }

    fn send(&self, config: &RollbarConfig, item: Value) {
        let Some(token) = config.access_token.clone() else {
            warn!("rollbar transport: no access token configured, dropping item");
            return;
        };
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("rollbar transport: no tokio runtime, dropping item");
            return;
        };

        let http = self.http.clone();
        handle.spawn(async move {
            let result = http
                .post(&endpoint)
                .header("X-Rollbar-Access-Token", token)
                .json(&item)
                .send()
                .await;
            match result {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "rollbar transport: item rejected");
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "rollbar transport: delivery failed");
                }
            }
        });
    }
}

impl RollbarClient for HttpTransport {
    fn critical(&self, message: &str, error: Option<&CapturedError>, extra: &Properties) {
        self.report(Level::Critical, message, error, extra);
    }

    fn error(&self, message: &str, error: Option<&CapturedError>, extra: &Properties) {
        self.report(Level::Error, message, error, extra);
    }

    fn warning(&self, message: &str, extra: &Properties) {
        self.report(Level::Warning, message, None, extra);
    }

    fn info(&self, message: &str, extra: &Properties) {
        self.report(Level::Info, message, None, extra);
    }

    fn debug(&self, message: &str, extra: &Properties) {
        self.report(Level::Debug, message, None, extra);
    }

    fn log(&self, message: &str, extra: &Properties) {
        self.report(Level::Debug, message, None, extra);
    }

    fn configure(&self, update: RollbarConfig) {
        match self.config.lock() {
            Ok(mut guard) => guard.apply(update),
            Err(poisoned) => poisoned.into_inner().apply(update),
        }
    }
}

/// Level gate: `enabled` master switch plus `report_level` threshold.
fn should_report(config: &RollbarConfig, level: Level) -> bool {
    if !config.is_enabled() {
        return false;
    }
    match config.report_level {
        Some(threshold) => level >= threshold,
        None => true,
    }
}

/// Masks configured scrub fields in the extra map.
fn scrubbed(config: &RollbarConfig, extra: &Properties) -> Properties {
    let Some(fields) = config.scrub_fields.as_ref().filter(|f| !f.is_empty()) else {
        return extra.clone();
    };
    extra
        .iter()
        .map(|(key, value)| {
            if fields.iter().any(|f| f == key) {
                (key.clone(), Value::String(SCRUB_MASK.to_owned()))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

/// Builds one Item API payload.
fn build_item(
    config: &RollbarConfig,
    level: Level,
    message: &str,
    error: Option<&CapturedError>,
    extra: &Properties,
) -> Value {
    let payload = config.payload.clone().unwrap_or_default();
    let environment = config
        .environment
        .clone()
        .or(payload.environment)
        .unwrap_or_else(|| "production".to_owned());
    let extra = scrubbed(config, extra);

    let body = match error {
        Some(err) => json!({
            "trace": {
                "frames": [],
                "exception": {
                    "class": err.class,
                    "message": err.message,
                },
            }
        }),
        None => json!({
            "message": { "body": message }
        }),
    };

    let mut custom = payload.custom.unwrap_or_default();
    for (key, value) in &extra {
        custom.insert(key.clone(), value.clone());
    }
    if let Some(stack) = error.and_then(|err| err.stack.clone()) {
        custom.insert("stack".to_owned(), Value::String(stack));
    }

    let mut data = json!({
        "environment": environment,
        "level": level.as_str(),
        "language": "rust",
        "timestamp": unix_timestamp(),
        "body": body,
        "custom": custom,
        "title": message,
        "notifier": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
    });
    if let Some(obj) = data.as_object_mut() {
        if let Some(code_version) = &config.code_version {
            obj.insert("code_version".into(), json!(code_version));
        }
        if let Some(context) = &payload.context {
            obj.insert("context".into(), json!(context));
        }
        if let Some(person) = payload.person.as_ref().filter(|p| p.has_id()) {
            obj.insert("person".into(), json!(person));
        }
    }

    json!({ "data": data })
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
