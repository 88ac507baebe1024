use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    let success = match cli.command {
        Commands::Convert(args) => {
            info!("Convert command: {:?}", args);
            runtime.block_on(cli::commands::convert::execute(args, cli.config.as_deref()))?
        }
        Commands::Analyze(args) => {
            info!("Analyze command: {:?}", args);
            runtime.block_on(cli::commands::analyze::execute(args))?
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
