//! Circulate CLI - flat-file content server.
//!
//! Provides commands for:
//! - `serve`: Start the content server
//! - `routes`: Print the route table for the current content

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RoutesArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Circulate - flat-file content server.
#[derive(Parser)]
#[command(name = "circulate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content server.
    Serve(ServeArgs),
    /// Print every route with its kind and source file.
    Routes(RoutesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
        Commands::Routes(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "circulate", "serve", "--root", "site", "-p", "3000", "--theme", "dark", "-v",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Serve(ref args) if args.verbose));
    }

    #[test]
    fn test_parse_routes() {
        let cli = Cli::try_parse_from(["circulate", "routes", "-c", "circulate.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Routes(_)));
    }

    #[test]
    fn test_serve_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["circulate", "serve", "--port", "http"]).is_err());
    }
}
