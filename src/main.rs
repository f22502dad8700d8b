use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bindery::app::AppContext;
use bindery::cli::{commands, Cli, Commands};
use bindery::config::Config;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Build { feeds, output } => {
            commands::build(&ctx, feeds.as_deref(), output.as_deref()).await?;
        }
        Commands::Sources { feeds } => {
            commands::list_sources(feeds.as_deref())?;
        }
    }

    Ok(())
}
