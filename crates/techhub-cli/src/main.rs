mod cli;
mod config;
mod display;
mod service;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use service::CliService;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Run the requested command
    let service = CliService::new(config).with_catalog(cli.catalog.clone());
    service.run(cli)
}
