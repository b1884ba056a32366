//! esquery-rs: run a JSON-encoded query intent against Elasticsearch
//!
//! This is the main entry point for the command-line tool.

use anyhow::{Context, Result};
use esquery_rs::{config, Connection, QueryIntent, Search};
use std::io::Read;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "-V" || a == "--version") {
        println!("esquery-rs {}", esquery_rs::VERSION);
        return Ok(());
    }

    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting esquery-rs v{}", esquery_rs::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!(
        "Using engine {}:{} (default index '{}')",
        settings.server.host, settings.server.port, settings.search.default_index
    );

    let intent = read_intent(args.first().map(String::as_str))?;

    // Open connection
    let client = Connection::open_with_settings(&settings)?;
    let search = Search::new(Arc::new(client.clone()), &settings.search);

    let outcome = search.execute(&intent).await;
    Connection::close(client);

    let result = outcome?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Read the intent from a file, or from stdin when no path (or `-`) is given
fn read_intent(path: Option<&str>) -> Result<QueryIntent> {
    let raw = match path {
        Some(p) if p != "-" => {
            std::fs::read_to_string(p).with_context(|| format!("cannot read intent file {}", p))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&raw).context("invalid query intent")
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
esquery-rs v{}
Typed query construction and result normalization for Elasticsearch

USAGE:
    esquery-rs [INTENT_FILE]

Reads a JSON query intent from INTENT_FILE (or stdin), executes it and
prints the normalized result as JSON.

EXAMPLE INTENT:
    {{"search_type": "term", "term_field": "currency", "term_value": "EUR", "size": 5}}

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    ESQUERY_SETTINGS_PATH    Path to esquery.yml
    ESQUERY_HOST             Engine host
    ESQUERY_PORT             Engine port
    ESQUERY_SCHEME           http or https
    ESQUERY_DEFAULT_INDEX    Index searched when the intent names none
    ESQUERY_REQUEST_TIMEOUT  Client-side request timeout in seconds
    RUST_LOG                 Log filter (default: info)
"#,
        esquery_rs::VERSION
    );
}
