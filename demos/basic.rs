//! # Basic Publishing Example
//!
//! Declares a small event catalog and publishes severity events through
//! the Rollbar plugin.
//!
//! The example sends:
//! - An info event with validated properties
//! - An error event carrying a captured exception
//! - A warning event
//!
//! ## Run
//! ```bash
//! ROLLBAR_ACCESS_TOKEN=<post-server-token> cargo run --example basic
//! ```

use std::sync::Arc;

use serde_json::json;
use stratum_rollbar::{
    CapturedError, Catalog, EventDef, EventType, PluginData, PublishOptions, RollbarConfig,
    RollbarOptions, RollbarPlugin, Runtime, Service, ServiceOptions,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stratum_rollbar=debug".into()),
        )
        .init();

    let token = std::env::var("ROLLBAR_ACCESS_TOKEN").unwrap_or_default();

    let catalog = Catalog::new([
        EventDef::new("BUTTON_CLICK", "Button clicked", EventType::Info)
            .with_property("button_name", "string")
            .with_property("page", "string"),
        EventDef::new("API_ERROR", "API request failed", EventType::Error)
            .with_property("error", json!({}))
            .with_property("path", "string")
            .with_property("status", 0),
        EventDef::new("RATE_LIMIT", "Rate limit warning", EventType::Warning)
            .with_property("limit", 0)
            .with_property("current", 0),
    ])?;

    let plugin = RollbarPlugin::new(
        RollbarOptions::new()
            .with_server_access_token(token)
            .with_runtime(Runtime::Server)
            .with_debug(true)
            .with_config(RollbarConfig {
                environment: Some("development".into()),
                ..Default::default()
            }),
    )?;

    let service = Service::new(ServiceOptions {
        catalog,
        plugins: vec![Arc::new(plugin)],
        product_name: "stratum-rollbar-demo".into(),
        product_version: env!("CARGO_PKG_VERSION").into(),
    });

    service
        .publish(
            "BUTTON_CLICK",
            route(json!({"button_name": "submit", "page": "checkout"})),
        )
        .await?;

    let captured = CapturedError::new("TimeoutError", "upstream timed out");
    service
        .publish(
            "API_ERROR",
            route(json!({
                "error": captured.to_value(),
                "path": "/api/orders",
                "status": 504,
            })),
        )
        .await?;

    service
        .publish("RATE_LIMIT", route(json!({"limit": 100, "current": 95})))
        .await?;

    // Let the fire-and-forget sends leave the process before exiting.
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    service.shutdown().await;
    Ok(())
}

fn route(properties: serde_json::Value) -> PublishOptions {
    PublishOptions::new()
        .with_plugin_data(RollbarPlugin::NAME, PluginData::from_properties(properties))
}
