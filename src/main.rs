//! Cluster connectivity probe.
//!
//! Performs one failover connect against a MySQL cluster, pings the chosen
//! host, prepares a statement on it, closes the connection and reports
//! which host answered.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use mysql_multihost::config::{load_config, validate_config, ClusterConfig};
use mysql_multihost::observability::logging::init_logging;
use mysql_multihost::{Connection, MySqlFailoverConnector};

#[derive(Parser)]
#[command(name = "mysql-multihost")]
#[command(about = "Probe a MySQL cluster through the failover connector", long_about = None)]
struct Cli {
    /// TOML cluster configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint descriptor; repeat in preference order. Replaces the
    /// configured endpoints.
    #[arg(short = 'e', long = "endpoint")]
    endpoints: Vec<String>,

    /// Per-attempt dial timeout in milliseconds.
    #[arg(long)]
    dial_timeout_ms: Option<u64>,

    /// Statement to prepare on the chosen host.
    #[arg(short, long, default_value = "SELECT 1")]
    query: String,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProbeReport {
    hosts: usize,
    host_index: usize,
    endpoint: String,
    driver: &'static str,
    query: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClusterConfig::default(),
    };
    if !cli.endpoints.is_empty() {
        config.endpoints = cli.endpoints.clone();
    }
    if let Some(dial_timeout_ms) = cli.dial_timeout_ms {
        config.dial_timeout_ms = dial_timeout_ms;
    }

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("config error: {}", error);
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    init_logging(&config.observability)?;

    let connector = MySqlFailoverConnector::from_config(&config)?;
    let mut conn = connector.connect().await?;

    let report = ProbeReport {
        hosts: connector.hosts().len(),
        host_index: conn.host_index(),
        endpoint: conn.endpoint().to_string(),
        driver: connector.driver().name,
        query: cli.query.clone(),
    };

    let pinged = sqlx::Connection::ping(conn.raw_mut().inner_mut()).await;
    let prepared = match pinged {
        Ok(()) => conn.prepare(&cli.query).await.map(drop),
        Err(e) => Err(e.into()),
    };
    let closed = conn.close().await;
    prepared?;
    closed?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "connected to host #{} of {} ({}) and prepared: {}",
            report.host_index, report.hosts, report.endpoint, report.query
        );
    }

    Ok(())
}
