//! `circulate routes` command implementation.

use std::path::{Path, PathBuf};

use circulate_config::{CliSettings, Config};
use circulate_site::{Dispatcher, RouteTable};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover circulate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root that content paths are relative to.
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl RoutesArgs {
    /// Scan content once and print the route table.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or content cannot be scanned.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(root = %config.paths.root.display(), "Loaded configuration");

        let store = Dispatcher::from_config(&config).scan()?;
        let routes = RouteTable::build(&store);

        for line in format_routes(&routes, &config.paths.root) {
            output.line(&line);
        }
        output.muted(&format!("{} routes", routes.len()));

        Ok(())
    }
}

/// One `slug  kind  source` line per route, slugs padded to equal width.
fn format_routes(routes: &RouteTable<'_>, root: &Path) -> Vec<String> {
    let width = routes.iter().map(|(slug, _)| slug.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(routes.len());
    for (slug, target) in routes {
        let source = target.source();
        let source = source.strip_prefix(root).unwrap_or(source);
        lines.push(format!(
            "{slug:<width$}  {kind:<10}  {source}",
            kind = target.kind(),
            source = source.display()
        ));
    }
    lines
}
