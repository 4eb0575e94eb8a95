mod cli;

use std::process;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if let Err(e) = cli::run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("{} {}", yansi::Paint::red("Error:").bold(), yansi::Paint::red(&e.to_string()));
        process::exit(1);
    }
}
