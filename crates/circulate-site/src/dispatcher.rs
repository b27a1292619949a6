//! Per-request orchestration: scan, route, render.

use std::path::PathBuf;

use circulate_config::{Config, Settings, SitePaths};
use circulate_content::ContentStore;

use crate::error::SiteError;
use crate::renderer::Renderer;
use crate::router::RouteTable;
use crate::template::{MiniJinjaEngine, TemplateEngine};

/// Whether the requested path matched a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

/// Output of one dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    pub status: PageStatus,
    /// Name of the template that produced `body`.
    pub template: String,
    pub body: String,
}

/// Handles requests against the content tree.
///
/// Holds only immutable settings and paths. Every call to
/// [`Dispatcher::dispatch`] rescans content and reloads templates, so edits
/// on disk show up on the next request.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    settings: Settings,
    pages_path: PathBuf,
    collections_path: PathBuf,
    views_path: PathBuf,
}

impl Dispatcher {
    pub fn new(settings: Settings, paths: &SitePaths) -> Self {
        Self {
            settings,
            pages_path: paths.pages_path.clone(),
            collections_path: paths.collections_path.clone(),
            views_path: paths.views_path.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.site.clone(), &config.paths)
    }

    /// Scan the content directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a content directory is missing or unreadable.
    pub fn scan(&self) -> Result<ContentStore, SiteError> {
        Ok(ContentStore::scan(&self.pages_path, &self.collections_path)?)
    }

    /// Render `path` with the theme's templates.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be scanned, the resolved document
    /// is unreadable or invalid, or the template fails.
    pub fn dispatch(&self, path: &str) -> Result<RenderedPage, SiteError> {
        let engine = MiniJinjaEngine::new(&self.views_path, &self.settings);
        self.dispatch_with(&engine, path)
    }

    /// Render `path` with the given engine.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub fn dispatch_with(
        &self,
        engine: &dyn TemplateEngine,
        path: &str,
    ) -> Result<RenderedPage, SiteError> {
        let store = self.scan()?;
        let routes = RouteTable::build(&store);
        let renderer = Renderer::new(&self.settings, &store, engine);

        match routes.resolve(path) {
            Some(target) => renderer.render(path, target),
            None => {
                tracing::debug!(path, "No route matched");
                renderer.render_not_found()
            }
        }
    }
}
