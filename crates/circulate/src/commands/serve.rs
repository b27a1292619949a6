//! `circulate serve` command implementation.

use std::path::PathBuf;

use circulate_config::{CliSettings, Config};
use circulate_server::run_server;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover circulate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root that content, theme and cache paths are relative to.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Theme name (overrides config and THEME).
    #[arg(short, long)]
    theme: Option<String>,

    /// Enable verbose output (request and render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a required directory is
    /// missing, or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root,
            host: self.host,
            port: self.port,
            theme: self.theme,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.require_directories()?;
        config.ensure_cache_dir()?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content: {}",
            config.paths.pages_path.parent().unwrap_or(&config.paths.root).display()
        ));
        output.info(&format!(
            "Theme: {} ({})",
            config.site.theme,
            config.paths.views_path.display()
        ));
        if let Some(path) = &config.config_path {
            output.muted(&format!("Config: {}", path.display()));
        }

        run_server(&config).await?;

        output.success("Server stopped");
        Ok(())
    }
}
