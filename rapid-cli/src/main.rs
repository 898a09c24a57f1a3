//! Rapid CLI: read-only lookups against the eWAY Rapid gateway.
//!
//! Loads a TOML client configuration, runs one lookup and prints the response
//! as JSON on stdout. Logs go to stderr, formatted per `LOG_FORMAT`.

#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

mod cli;
mod observability;

use std::process::ExitCode;

use clap::Parser;
use rapid_client::{RapidClient, RapidError, config::ClientConfig, model::GatewayResponse};
use serde::Serialize;
use tracing::{error, info};

use crate::{
    cli::{Cli, Commands},
    observability::{LogFormat, init_observability},
};

#[tokio::main]
async fn main() -> ExitCode {
    init_observability(LogFormat::from_env());

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, kind = ?e.kind(), "command failed");
            ExitCode::from(2)
        }
    }
}

/// Runs the command. Returns whether the gateway reported success.
async fn run(cli: Cli) -> Result<bool, RapidError> {
    let config = ClientConfig::from_file(&cli.config)?;
    info!(config = %cli.config.display(), environment = %config.environment, "loaded configuration");
    let client = RapidClient::new(&config)?;

    match cli.command {
        Commands::Transaction(args) => print(&client.query_transaction(args).await?),
        Commands::Customer { token_customer_id } => {
            print(&client.query_customer(token_customer_id).await?)
        }
        Commands::Settlements(args) => print(&client.search_settlements(&args.into()).await?),
    }
}

fn print<R: GatewayResponse + Serialize>(response: &R) -> Result<bool, RapidError> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| RapidError::InvalidResponse(format!("cannot render response: {e}")))?;
    println!("{json}");
    Ok(response.is_success())
}
