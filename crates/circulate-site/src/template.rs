//! Template engine seam and the minijinja-backed implementation.

use std::path::PathBuf;

use circulate_config::Settings;
use minijinja::{Environment, ErrorKind, path_loader};
use serde_json::Value;

/// File extension of theme templates.
pub const TEMPLATE_EXTENSION: &str = "html";

/// Error returned when a template cannot be loaded or rendered.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template with this name exists in the theme.
    #[error("Template not found: {0}")]
    NotFound(String),
    /// The template failed to parse or render.
    #[error("Failed to render template {name}: {source}")]
    Render {
        /// Template name.
        name: String,
        /// Engine error.
        #[source]
        source: minijinja::Error,
    },
}

/// Renders named templates against a JSON context.
pub trait TemplateEngine {
    /// Whether the theme provides a template called `name`.
    fn has_template(&self, name: &str) -> bool;

    /// Render template `name` with `context`.
    fn render(&self, name: &str, context: &Value) -> Result<String, TemplateError>;
}

/// Template engine loading `<views>/<name>.html` from disk.
///
/// Templates are auto-escaped as HTML, so rendered Markdown must be output
/// with `{{ content|safe }}`. Two global functions are available:
///
/// - `url(path="")`: absolute URL under `site_url`
/// - `asset(path="")`: absolute URL under `site_url/themes/<theme>`
pub struct MiniJinjaEngine {
    views_path: PathBuf,
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new(views_path: impl Into<PathBuf>, settings: &Settings) -> Self {
        let views_path = views_path.into();

        let mut env = Environment::new();
        env.set_loader(path_loader(&views_path));

        let site_url = settings.site_url.clone();
        env.add_function("url", move |path: Option<String>| {
            let path = path.as_deref().unwrap_or_default();
            minijinja::Value::from_safe_string(url(&site_url, path))
        });

        let site_url = settings.site_url.clone();
        let theme = settings.theme.clone();
        env.add_function("asset", move |path: Option<String>| {
            let path = path.as_deref().unwrap_or_default();
            minijinja::Value::from_safe_string(asset(&site_url, &theme, path))
        });

        Self { views_path, env }
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn has_template(&self, name: &str) -> bool {
        is_valid_name(name) && self.views_path.join(file_name(name)).is_file()
    }

    fn render(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        let to_error = |source: minijinja::Error| {
            if source.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound(name.to_owned())
            } else {
                TemplateError::Render {
                    name: name.to_owned(),
                    source,
                }
            }
        };

        let template = self.env.get_template(&file_name(name)).map_err(to_error)?;
        template.render(context).map_err(to_error)
    }
}

fn file_name(name: &str) -> String {
    format!("{name}.{TEMPLATE_EXTENSION}")
}

/// Template names may use `/` for subdirectories but never leave the theme.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('/').all(|segment| {
            !segment.is_empty() && !segment.starts_with('.') && !segment.contains('\\')
        })
}

/// Absolute URL for `path` under `site_url`.
///
/// An empty path returns `site_url` unchanged.
pub fn url(site_url: &str, path: &str) -> String {
    if path.is_empty() {
        return site_url.to_owned();
    }
    join_url(site_url, path)
}

/// Absolute URL for a theme asset.
pub fn asset(site_url: &str, theme: &str, path: &str) -> String {
    let base = format!("{}/themes/{theme}", site_url.trim_end_matches('/'));
    if path.is_empty() {
        return base;
    }
    join_url(&base, path)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
