//! CLI module for fixly
//!
//! Argument parsing with clap plus the glue between parsed arguments,
//! configuration loading, and command execution.

pub mod parser;

pub use parser::{Cli, ClientArgs, ClientCommand, Commands};

use crate::config::settings::Settings;
use crate::config::{ConfigLoader, Environment};
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

/// Load configuration and apply CLI argument overrides.
///
/// File layers load first; `--env` switches the environment layer,
/// `--verbose`/`--quiet` adjust the log level, and serve's `--host`/
/// `--port` replace the configured bind address.
pub fn load_settings(cli: &Cli) -> AppResult<Settings> {
    let mut loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path.clone()),
        None => ConfigLoader::new()?,
    };

    if let Some(env) = &cli.env {
        loader = loader.with_environment(env.parse::<Environment>()?);
    }

    let mut settings = loader.load()?;

    if cli.verbose {
        settings.logger.level = "debug".to_string();
    }
    if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    if let Some(Commands::Serve { host, port, .. }) = &cli.command {
        if let Some(host) = host {
            settings.server.host = host.clone();
        }
        if let Some(port) = port {
            settings.server.port = *port;
        }
    }

    Ok(settings)
}

/// Validate configuration without starting the server.
pub fn dry_run(settings: &Settings) -> AppResult<()> {
    settings.validate()?;

    println!("✓ Configuration is valid");
    println!("✓ Server would bind to: {}", settings.server.address());
    println!("✓ Database URL is configured");
    println!("✓ JWT configuration is valid");
    println!("Dry run completed successfully - configuration is ready for deployment");

    Ok(())
}

/// Execute the migrate command.
///
/// `dry_run` lists pending migrations without applying them; `rollback`
/// reverts the last N applied migrations instead of migrating forward.
pub async fn run_migrate(
    settings: &Settings,
    dry_run: bool,
    rollback: Option<u32>,
) -> AppResult<()> {
    settings.database.validate()?;

    let database_url = settings.database.url.clone();

    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::migration::Migration;
        use diesel::pg::PgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn =
            PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                operation: "establish connection for migrations".to_string(),
                source: anyhow::anyhow!("Connection error: {}", e),
            })?;

        if dry_run {
            let pending = conn.pending_migrations(MIGRATIONS).map_err(|e| {
                AppError::Database {
                    operation: "check pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                }
            })?;

            if pending.is_empty() {
                println!("No pending migrations");
            }
            for migration in pending {
                println!("Pending: {}", migration.name());
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            for _ in 0..steps {
                let reverted = conn.revert_last_migration(MIGRATIONS).map_err(|e| {
                    AppError::Database {
                        operation: "revert migration".to_string(),
                        source: anyhow::anyhow!("Migration error: {}", e),
                    }
                })?;
                println!("Reverted: {}", reverted);
            }
            return Ok(());
        }

        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            }
        })?;

        if applied.is_empty() {
            println!("Database is up to date");
        }
        for version in applied {
            println!("Applied: {}", version);
        }

        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Migration task panicked: {}", e),
    })?
}
