use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use swing_coach::commands::Cli;
use swing_coach::config::AnalysisConfig;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for reports
    let filter = if cli.verbose() {
        EnvFilter::new("debug")
    } else {
        let log_level = AnalysisConfig::from_env()?.log_level;
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Initialize tokio runtime
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute().await })
}
