use clap::Parser;

use fixly::cli::{self, Cli, Commands};
use fixly::logger::{LoggerConfig, init_logger};
use fixly::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The client talks to a running server and needs no server settings;
    // keep its output quiet unless verbosity is requested.
    if let Some(Commands::Client(args)) = &cli.command {
        let mut config = LoggerConfig::default();
        config.level = if cli.verbose { "debug" } else { "warn" }.to_string();
        let _log_handle = init_logger(config)?;
        return fixly::client::run(args).await;
    }

    let settings = cli::load_settings(&cli)?;
    let _log_handle = init_logger(settings.logger.clone().into_logger_config()?)?;

    match &cli.command {
        Some(Commands::Migrate { dry_run, rollback }) => {
            cli::run_migrate(&settings, *dry_run, *rollback).await?;
        }
        Some(Commands::Serve { dry_run: true, .. }) => {
            cli::dry_run(&settings)?;
        }
        Some(Commands::Serve { .. }) | None => {
            Server::new(settings).run().await?;
        }
        // Handled above before settings were loaded
        Some(Commands::Client(_)) => unreachable!(),
    }

    Ok(())
}
