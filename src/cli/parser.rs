//! CLI argument parsing with clap
//!
//! Defines the command-line interface structure: the server commands
//! (`serve`, `migrate`) and the HTTP API client (`client`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shadow_rs::shadow;

shadow!(build);

/// A home-services marketplace: API server and client
#[derive(Parser, Debug)]
#[command(name = "fixly")]
#[command(about = "A home-services marketplace API server and client")]
#[command(long_about = "
Fixly is a home-services marketplace backend: customers register, browse
service categories, and book service requests over a REST API.

EXAMPLES:
    # Start the server with default configuration
    fixly serve

    # Start server on custom host and port
    fixly serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    fixly --config /path/to/config.toml serve

    # Check configuration without starting the server
    fixly serve --dry-run

    # Run database migrations
    fixly migrate

    # Preview pending migrations
    fixly migrate --dry-run

    # Talk to a running server
    fixly client register -u alice -p pw1
    fixly client login -u alice -p pw1
    fixly client categories
    fixly client book --category-id 2 --description 'Leaky faucet'
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered config directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Available values: development (dev), test, staging (stage),
    /// production (prod)
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit without starting the server
        #[arg(long)]
        dry_run: bool,
    },

    /// Run database migrations
    Migrate {
        /// Show pending migrations without applying them
        #[arg(long)]
        dry_run: bool,

        /// Roll back the last N applied migrations
        #[arg(long, value_name = "N")]
        rollback: Option<u32>,
    },

    /// Talk to a running fixly server over HTTP
    Client(ClientArgs),
}

/// Arguments shared by all client views
#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Base URL of the server
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:3000", env = "FIXLY_SERVER_URL")]
    pub server_url: String,

    /// Session file holding tokens between commands
    #[arg(long, value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub view: ClientCommand,
}

/// Client views
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Register a new account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Log in and store the session tokens
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Drop the stored session
    Logout,

    /// List bookable service categories
    Categories,

    /// Book a service (requires login)
    Book {
        /// Category to book, from `fixly client categories`
        #[arg(long, value_name = "ID")]
        category_id: i32,

        /// What needs doing
        #[arg(short, long)]
        description: String,
    },

    /// List your bookings (requires login)
    Bookings,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::parse_from(["fixly", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        match cli.command {
            Some(Commands::Serve { host, port, dry_run }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(!dry_run);
            }
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["fixly"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["fixly", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn parses_client_book() {
        let cli = Cli::parse_from([
            "fixly",
            "client",
            "book",
            "--category-id",
            "2",
            "--description",
            "Leaky faucet",
        ]);
        match cli.command {
            Some(Commands::Client(args)) => match args.view {
                ClientCommand::Book {
                    category_id,
                    description,
                } => {
                    assert_eq!(category_id, 2);
                    assert_eq!(description, "Leaky faucet");
                }
                other => panic!("Expected book view, got {:?}", other),
            },
            other => panic!("Expected client command, got {:?}", other),
        }
    }
}
