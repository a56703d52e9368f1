//! move2jelly CLI
//!
//! Moves or hard-links downloaded movies and episodes into a Jellyfin
//! library, naming them after their TMDB records.

use clap::Parser;
use move2jelly::cli::{
    args::{Cli, Commands},
    commands::{parse, run},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run the appropriate command
    match cli.command {
        Commands::Run(args) => {
            run::run(&args, cli.skip_preflight).await?;
        }

        Commands::Parse { filenames } => {
            parse::parse(&filenames)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("move2jelly=debug")
    } else {
        EnvFilter::new("move2jelly=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
