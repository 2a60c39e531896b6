// Copyright 2026 Fake Extract API Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use fake_extract_api::api::AppState;
use fake_extract_api::config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use fake_extract_api::rest;

#[derive(Parser)]
#[command(
    name = "fake-extract-api",
    about = "Fake web-scraping extraction API for integration tests",
    version
)]
struct Cli {
    /// Port to listen on.
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };
    let state = AppState::new().context("failed to build HTTP client")?;

    rest::start(&config, Arc::new(state)).await
}
