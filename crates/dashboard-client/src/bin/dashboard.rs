//! Command-line dashboard.
//!
//! Parsing and the intent flow live in `dashboard_client::cli`; this binary
//! wires configuration, logging and the terminal prompt around them.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use dashboard_client::cli::{Cli, run};
use dashboard_client::{ClientSettings, Confirmation, Controller, HttpUsersApi};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

/// Asks on stderr and reads the answer from stdin.
struct PromptOnTerminal;

impl Confirmation for PromptOnTerminal {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if write!(stderr, "{prompt} [y/N] ")
            .and_then(|()| stderr.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let loaded = ClientSettings::load_from_iter([OsString::from("dashboard")])
        .map_err(|err| eyre!("failed to load client configuration: {err}"))?;
    let settings = ClientSettings {
        api_url: cli.api_url.or(loaded.api_url),
        ..loaded
    };
    let api = HttpUsersApi::new(settings.api_url()?, settings.timeout())
        .wrap_err("failed to build HTTP client")?;

    let confirmation = cli.command.confirmation(Arc::new(PromptOnTerminal));
    let mut controller = Controller::new(Arc::new(api), confirmation);
    run(cli.command, &mut controller, &mut io::stdout().lock()).await?;
    Ok(())
}
