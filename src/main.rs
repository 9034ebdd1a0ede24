mod cli;

use anyhow::Result;
use clap::Parser;
use funnel::fs::WorkDir;
use tracing_subscriber::EnvFilter;

use cli::Cli;

const LOG_ENV: &str = "FUNNEL_LOG";

/// Log level from `FUNNEL_LOG`, else the configured level.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = WorkDir::new(&cli.dir)
            .config()
            .map(|c| c.log.level)
            .unwrap_or_else(|_| "warn".to_string());
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    cli::dispatch(cli)
}
