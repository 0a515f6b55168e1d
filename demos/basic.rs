//! Basic example demonstrating request-state tracking.
//!
//! Starts the mock API in-process, so no external server is needed.
//!
//! Run with:
//! ```
//! cargo run --example basic
//! ```

use reqstate::mock_server::MockServer;
use reqstate::{discover, AbortSignal, ApiClient, CallArgs, Registry};

#[tokio::main]
async fn main() -> reqstate::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let server = MockServer::start().await;
    let client = ApiClient::new(server.url())?;
    println!("Mock API at: {}", client.base_url());

    let registry = Registry::for_client(&client);
    let trackers = discover(&registry, &client).await?;
    println!("Discovered {} endpoints", trackers.len());

    // Call every endpoint once
    println!("\n--- Calling every endpoint ---");
    for tracker in &trackers {
        let result = tracker.call_default().await;
        println!(
            "  {:<22} {:>3}  {}",
            tracker.name(),
            result.meta.status,
            result.outcome()
        );
    }

    // Field errors, as a form would show them
    if let Some(tracker) = registry.get("getFieldsInvalid") {
        println!("\n--- Field errors ---");
        if let Some(result) = tracker.result() {
            for (field, reason) in result.field_errors() {
                println!("  {field}: {reason}");
            }
        }
    }

    // An aborted call settles as `request-aborted` without a notification
    if let Some(tracker) = registry.get("getSuccessData") {
        let signal = AbortSignal::new();
        signal.abort();
        let result = tracker.call(CallArgs::new().with_signal(signal)).await;
        println!("\nAborted call: {:?}", result.error_type());
    }

    println!("\n--- Notifications (most recent first) ---");
    for notification in registry.notifications().list() {
        println!("  [{}] {}", notification.severity, notification.message);
    }

    server.shutdown().await;
    println!("\nDone!");
    Ok(())
}
