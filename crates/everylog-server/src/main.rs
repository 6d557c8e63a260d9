//! everylog server binary

// Force-link everylog-providers so its store registrations are included
extern crate everylog_providers;

use clap::Parser;
use everylog_server::run;

/// Command line interface for everylog
#[derive(Parser, Debug)]
#[command(name = "everylog")]
#[command(about = "everylog - multi-tenant log collection service")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli.config.as_deref()).await
}
