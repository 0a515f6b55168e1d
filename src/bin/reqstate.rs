//! reqstate CLI binary.
//!
//! Serves the mock API, or tracks calls against a running one.

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use reqstate::cli::{Cli, Command};
use reqstate::mock_server::MockServer;
use reqstate::output::PrettyPrint;
use reqstate::{discover, ApiClient, Notifications, Registry, ReqState, ReqStateError, Tracker};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let ReqStateError::RouteDirectoryUnavailable { .. } = e {
                eprintln!("Hint: Start the mock API with 'reqstate serve' or set REQSTATE_API_URL");
            }
            ExitCode::FAILURE
        }
    }
}

/// Install the fmt subscriber on stderr. `--log-level` wins over `RUST_LOG`;
/// with neither set only warnings and errors are shown.
fn init_logging(level: Option<&str>) -> reqstate::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))),
    }
    .map_err(|err| ReqStateError::ConfigMissing(format!("invalid log filter: {err}")))?;

    // Fails only when a global subscriber is already installed; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

async fn run(cli: Cli) -> reqstate::Result<()> {
    match cli.command {
        Command::Serve { addr, port } => handle_serve(SocketAddr::new(addr, port)).await,
        Command::Call { endpoint, base_url } => handle_call(&base_url, &endpoint, cli.json).await,
        Command::List { call_all, base_url } => handle_list(&base_url, call_all, cli.json).await,
    }
}

async fn handle_serve(addr: SocketAddr) -> reqstate::Result<()> {
    eprintln!("Mock API listening on http://{addr} (Ctrl-C to stop)");
    MockServer::run(addr, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn handle_call(base_url: &str, endpoint: &str, json: bool) -> reqstate::Result<()> {
    let client = ApiClient::new(base_url)?;
    let registry = Registry::for_client(&client);
    discover(&registry, &client).await?;

    let tracker = registry
        .get(endpoint)
        .ok_or_else(|| ReqStateError::UnknownEndpoint(endpoint.to_string()))?;
    let result = tracker.call_default().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.pretty_print());
    }
    print_notifications(registry.notifications(), json)
}

async fn handle_list(base_url: &str, call_all: bool, json: bool) -> reqstate::Result<()> {
    let client = ApiClient::new(base_url)?;
    let registry = Registry::for_client(&client);
    let trackers = discover(&registry, &client).await?;

    if call_all {
        for tracker in &trackers {
            tracker.call_default().await;
        }
    }

    let states: Vec<ReqState> = trackers.iter().map(Tracker::snapshot).collect();
    output_list(&states, json, |s| StateRow::from(s))?;

    if call_all {
        print_notifications(registry.notifications(), json)?;
    }
    Ok(())
}

fn print_notifications(notifications: &Notifications, json: bool) -> reqstate::Result<()> {
    let list = notifications.list();
    if list.is_empty() {
        return Ok(());
    }

    if json {
        eprintln!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        eprintln!("\nNotifications ({}):", list.len());
        for notification in &list {
            eprintln!("  {}", notification.pretty_print());
        }
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> reqstate::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} endpoints", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct StateRow {
    name: String,
    status: String,
    #[tabled(rename = "http")]
    http_status: String,
    outcome: String,
}

impl From<&ReqState> for StateRow {
    fn from(s: &ReqState) -> Self {
        let result = s.result();
        Self {
            name: s.name().to_string(),
            status: s.status().to_string(),
            http_status: result
                .map(|r| r.meta.status)
                .filter(|status| *status != 0)
                .map(|status| status.to_string())
                .unwrap_or_default(),
            outcome: result.map(|r| r.outcome().to_string()).unwrap_or_default(),
        }
    }
}
