//! `elemental`: command line client for Elemental Live appliances

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

mod cli;
mod logging;

use cli::{Args, Output};
use logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;

    init_logging(args.log_mode, &args.log_level).context("Failed to initialize logging")?;

    let config = args.client_config();
    debug!(server_url = config.server_url(), signed = config.credentials().is_some(), "Client configured");

    match cli::run(config, args.command).await {
        Ok(output) => {
            print_output(&output)?;
            Ok(())
        }
        Err(e) => {
            error!("Request failed: {}", e);
            if let Some(body) = e.downcast_ref::<elemental_api::Error>().and_then(|e| e.body()) {
                eprintln!("{}", body);
            }
            Err(e)
        }
    }
}

fn print_output(output: &Output) -> Result<()> {
    match output {
        Output::Value(value) => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Output::Text(text) if text.is_empty() => {}
        Output::Text(text) => println!("{}", text),
    }
    Ok(())
}
