//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the reqstate binary.

use std::net::IpAddr;

use clap::{Parser, Subcommand};

use crate::client::DEFAULT_API_URL;

/// Request-state tracker and mock problem-details API.
#[derive(Parser, Debug)]
#[command(name = "reqstate", about = "Request-state tracker CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log filter (e.g. `debug`, `reqstate=trace`). Falls back to `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the mock API server until interrupted.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        addr: IpAddr,

        /// Port to listen on.
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },

    /// Call one discovered endpoint by tracker name (e.g. `getFieldsInvalid`).
    Call {
        /// Tracker name of the endpoint.
        endpoint: String,

        /// Base URL of the API.
        #[arg(long, env = "REQSTATE_API_URL", default_value = DEFAULT_API_URL)]
        base_url: String,
    },

    /// List every endpoint the API's route directory exposes.
    List {
        /// Call every endpoint and show its outcome.
        #[arg(long)]
        call_all: bool,

        /// Base URL of the API.
        #[arg(long, env = "REQSTATE_API_URL", default_value = DEFAULT_API_URL)]
        base_url: String,
    },
}
