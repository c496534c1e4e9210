//! # Person Tracking Example
//!
//! Demonstrates the identity event types: identify a user, report an
//! error attributed to them, then clear the person on sign-out.
//!
//! ## Run
//! ```bash
//! ROLLBAR_ACCESS_TOKEN=<post-server-token> cargo run --example person_tracking
//! ```

use std::sync::Arc;

use serde_json::json;
use stratum_rollbar::{
    CapturedError, Catalog, EventDef, EventType, PluginData, PublishOptions, RollbarOptions,
    RollbarPlugin, Service, ServiceOptions,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let token = std::env::var("ROLLBAR_ACCESS_TOKEN").unwrap_or_default();

    let catalog = Catalog::new([
        EventDef::new("USER_SIGNED_IN", "User identified", EventType::Identify)
            .with_property("id", "string")
            .with_property("username", "string")
            .with_property("email", "string"),
        EventDef::new("CHECKOUT_FAILED", "Checkout failed", EventType::Error)
            .with_property("error", json!({}))
            .with_property("cart_total", 0),
        EventDef::new("USER_SIGNED_OUT", "Clear person", EventType::ClearPerson),
    ])?;

    let plugin = RollbarPlugin::new(RollbarOptions::new().with_access_token(token))?;
    let service = Service::new(ServiceOptions {
        catalog,
        plugins: vec![Arc::new(plugin)],
        product_name: "stratum-rollbar-demo".into(),
        product_version: env!("CARGO_PKG_VERSION").into(),
    });

    // All reports after this call are attributed to alice.
    service
        .publish(
            "USER_SIGNED_IN",
            route(json!({
                "id": "usr-1",
                "username": "alice",
                "email": "alice@example.com",
            })),
        )
        .await?;

    let err = CapturedError::new("PaymentError", "card declined");
    service
        .publish(
            "CHECKOUT_FAILED",
            route(json!({"error": err.to_value(), "cart_total": 42})),
        )
        .await?;

    // Sign-out: subsequent reports carry no person.
    service.publish("USER_SIGNED_OUT", route(json!({}))).await?;

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    Ok(())
}

fn route(properties: serde_json::Value) -> PublishOptions {
    PublishOptions::new()
        .with_plugin_data(RollbarPlugin::NAME, PluginData::from_properties(properties))
}
