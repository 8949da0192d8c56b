mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use hubtel_payment::Pay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let pay = Pay::from_env()?;
    tracing::info!("Loaded configuration for account {}", pay.config().account_number());

    match cli.command {
        Commands::Receive(args) => cli::handle_receive(&pay, args).await,
        Commands::Config => cli::handle_config_validate(pay.config()),
    }
}
