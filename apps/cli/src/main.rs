//! `beacon` command-line client

mod cli;
mod commands;
mod output;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    let logger = beacon_log::init_with(settings.log_config()).context("failed to initialize logging")?;
    tracing::debug!(
        base_url = %settings.http.base_url,
        reload_filter = ?logger.reload_handle().map(|h| h.current_filter()),
        "configuration resolved"
    );

    match &cli.command {
        Command::Send(args) => commands::send(&settings, args).await,
        Command::Poll(args) => commands::poll(&settings, args).await,
    }
}
