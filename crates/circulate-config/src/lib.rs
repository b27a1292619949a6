//! Configuration management for Circulate.
//!
//! Parses `circulate.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Site settings are
//! then overlaid from environment variables, and CLI settings can be applied
//! last via [`CliSettings`].
//!
//! ## Precedence
//!
//! defaults < `circulate.toml` < environment (`SITE_TITLE`, `THEME`, ...) < CLI
//!
//! ## Environment Variable Expansion
//!
//! String values in the config file support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `server.host` and every `[site]` value.

mod expand;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "circulate.toml";

/// Environment variables that override `[site]` values.
pub const ENV_SITE_TITLE: &str = "SITE_TITLE";
pub const ENV_THEME: &str = "THEME";
pub const ENV_CACHE_PATH: &str = "CACHE_PATH";
pub const ENV_CONTENT_PATH: &str = "CONTENT_PATH";
pub const ENV_THEMES_PATH: &str = "THEMES_PATH";
pub const ENV_SITE_URL: &str = "SITE_URL";

/// CLI settings that override configuration file and environment values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override project root (base for all relative paths).
    pub root: Option<PathBuf>,
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override active theme.
    pub theme: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site settings, exposed to templates as `settings`.
    pub site: Settings,

    /// Resolved absolute paths (set after loading).
    #[serde(skip)]
    pub paths: SitePaths,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Site settings.
///
/// Path values are relative to the project root; see [`SitePaths`] for the
/// resolved absolute paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site title.
    pub site_title: String,
    /// Active theme (directory name under `themes_path`).
    pub theme: String,
    /// Cache directory.
    pub cache_path: String,
    /// Content root containing `pages/` and `collections/`.
    pub content_path: String,
    /// Directory containing themes.
    pub themes_path: String,
    /// Absolute site URL used by the `url` and `asset` template helpers.
    pub site_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_title: String::new(),
            theme: "default".to_owned(),
            cache_path: "_storage/cache".to_owned(),
            content_path: "_content".to_owned(),
            themes_path: "themes".to_owned(),
            site_url: String::new(),
        }
    }
}

impl Settings {
    /// Overlay values from environment variables.
    ///
    /// `lookup` returns the value of a variable, or `None` when it is unset.
    /// Set variables replace the current value, even when empty.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields: [(&str, &mut String); 6] = [
            (ENV_SITE_TITLE, &mut self.site_title),
            (ENV_THEME, &mut self.theme),
            (ENV_CACHE_PATH, &mut self.cache_path),
            (ENV_CONTENT_PATH, &mut self.content_path),
            (ENV_THEMES_PATH, &mut self.themes_path),
            (ENV_SITE_URL, &mut self.site_url),
        ];
        for (name, field) in fields {
            if let Some(value) = lookup(name) {
                *field = value;
            }
        }
    }

    fn expand_env_vars(
        &mut self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let fields: [(&str, &mut String); 6] = [
            ("site.site_title", &mut self.site_title),
            ("site.theme", &mut self.theme),
            ("site.cache_path", &mut self.cache_path),
            ("site.content_path", &mut self.content_path),
            ("site.themes_path", &mut self.themes_path),
            ("site.site_url", &mut self.site_url),
        ];
        for (name, field) in fields {
            *field = expand::expand_env(field, name, lookup)?;
        }
        Ok(())
    }
}

/// Absolute paths derived from [`Settings`] and the project root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SitePaths {
    /// Project root all relative settings are resolved against.
    pub root: PathBuf,
    /// Cache directory.
    pub cache_path: PathBuf,
    /// Template directory of the active theme.
    pub views_path: PathBuf,
    /// Pages directory (`<content>/pages`).
    pub pages_path: PathBuf,
    /// Collections directory (`<content>/collections`).
    pub collections_path: PathBuf,
}

impl SitePaths {
    /// Derive paths for `settings` rooted at `root`.
    #[must_use]
    pub fn resolve(root: &Path, settings: &Settings) -> Self {
        let content = root.join(&settings.content_path);
        Self {
            root: root.to_path_buf(),
            cache_path: root.join(&settings.cache_path),
            views_path: root.join(&settings.themes_path).join(&settings.theme),
            pages_path: content.join("pages"),
            collections_path: content.join("collections"),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// A required directory does not exist.
    #[error("{what} directory not found: {}", .path.display())]
    MissingDirectory {
        /// Which directory (e.g. "Pages").
        what: &'static str,
        /// Expected location.
        path: PathBuf,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.site_url`").
        field: String,
        /// Error message (e.g., "${`SITE_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file, environment and CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `circulate.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, cli_settings, |name| std::env::var(name).ok())
    }

    /// Like [`Config::load`], with an explicit environment lookup.
    pub fn load_with_env(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path, &lookup)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered, &lookup)?
        } else {
            Self::default_with_cwd()
        };

        config.site.apply_env(&lookup);

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.paths = SitePaths::resolve(&config.paths.root, &config.site);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.paths.root.clone_from(root);
        }
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(theme) = &settings.theme {
            self.site.theme.clone_from(theme);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.site.theme, "site.theme")?;
        require_non_empty(&self.site.content_path, "site.content_path")?;
        Ok(())
    }

    /// Check that the content and theme directories exist.
    ///
    /// Called once at startup; a missing directory is not recoverable per request.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDirectory` for the first missing directory.
    pub fn require_directories(&self) -> Result<(), ConfigError> {
        let required = [
            ("Pages", &self.paths.pages_path),
            ("Collections", &self.paths.collections_path),
            ("Theme", &self.paths.views_path),
        ];
        for (what, path) in required {
            if !path.is_dir() {
                return Err(ConfigError::MissingDirectory {
                    what,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Create the cache directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the directory cannot be created.
    pub fn ensure_cache_dir(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.paths.cache_path)?;
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let site = Settings::default();
        Self {
            server: ServerConfig::default(),
            paths: SitePaths::resolve(base, &site),
            site,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    ///
    /// `${VAR}` references in string values are resolved through `lookup`.
    fn load_from_file(
        path: &Path,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.server.host = expand::expand_env(&config.server.host, "server.host", lookup)?;
        config.site.expand_env_vars(lookup)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.paths = SitePaths::resolve(config_dir, &config.site);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }
}
