//! Larder MCP Server
//!
//! Exposes pantry quantity reconciliation over MCP (stdio JSON-RPC).
//! One request per line on stdin, one response per line on stdout.
//! Logs go to stderr.

mod config;
mod protocol;
mod tools;

use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use config::Config;

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(config.log_ansi)
        .init();
}

fn main() {
    let config = Config::from_env();
    init_logging(&config);

    info!(version = protocol::SERVER_VERSION, "larder-mcp starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "error reading stdin");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let Some(response) = protocol::handle_line(&line) else {
            continue;
        };

        if let Err(e) = writeln!(stdout, "{}", response).and_then(|_| stdout.flush()) {
            error!(error = %e, "error writing response");
            break;
        }
    }

    info!("larder-mcp shutting down");
}
