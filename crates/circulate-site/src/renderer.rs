//! Template selection and context building.

use circulate_config::Settings;
use circulate_content::{Collection, ContentStore, Document, Meta};
use serde_json::{Map, Value};

use crate::dispatcher::{PageStatus, RenderedPage};
use crate::error::SiteError;
use crate::router::RouteTarget;
use crate::template::TemplateEngine;

/// Template for ordinary pages.
pub const PAGE_TEMPLATE: &str = "page";
/// Template for the root page.
pub const INDEX_TEMPLATE: &str = "index";
/// Template for a collection's own index route.
pub const COLLECTION_INDEX_TEMPLATE: &str = "collection-index";
/// Template for collection entries.
pub const COLLECTION_ENTRY_TEMPLATE: &str = "collection-entry";
/// Template for unmatched paths.
pub const NOT_FOUND_TEMPLATE: &str = "404";

/// Pick the template for a resolved route.
///
/// A non-empty string or numeric `template` key in `meta` wins if the engine
/// has it; a missing custom template falls back to the computed default.
pub fn select_template(
    slug: &str,
    target: &RouteTarget<'_>,
    meta: &Meta,
    engine: &dyn TemplateEngine,
) -> String {
    let mut template = PAGE_TEMPLATE;
    if slug == "/" {
        template = INDEX_TEMPLATE;
    }
    match target {
        RouteTarget::CollectionIndex(_) => template = COLLECTION_INDEX_TEMPLATE,
        RouteTarget::Page(doc) if doc.is_collection_entry() => {
            template = COLLECTION_ENTRY_TEMPLATE;
        }
        RouteTarget::Page(_) => {}
    }

    match custom_template(meta) {
        Some(custom) if engine.has_template(&custom) => custom,
        Some(custom) => {
            tracing::debug!(slug, template = %custom, "Custom template not found, using default");
            template.to_owned()
        }
        None => template.to_owned(),
    }
}

/// The `template` front matter value as a name. Numbers use their decimal form.
fn custom_template(meta: &Meta) -> Option<String> {
    let name = match meta.get("template")? {
        Value::String(name) => name.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

/// Renders routes of one scanned store through a template engine.
pub struct Renderer<'a> {
    settings: &'a Settings,
    store: &'a ContentStore,
    engine: &'a dyn TemplateEngine,
}

impl<'a> Renderer<'a> {
    pub fn new(
        settings: &'a Settings,
        store: &'a ContentStore,
        engine: &'a dyn TemplateEngine,
    ) -> Self {
        Self {
            settings,
            store,
            engine,
        }
    }

    /// Render the route `slug` resolved to `target`.
    ///
    /// # Errors
    ///
    /// Fails if the resolved document cannot be read or parsed, or if the
    /// template fails.
    pub fn render(
        &self,
        slug: &str,
        target: &RouteTarget<'_>,
    ) -> Result<RenderedPage, SiteError> {
        let (meta, content) = match target {
            RouteTarget::CollectionIndex(collection) => (collection.meta(), String::new()),
            RouteTarget::Page(doc) => doc.meta_and_html()?,
        };

        let template = select_template(slug, target, &meta, self.engine);

        let mut context = Map::new();
        context.insert("settings".to_owned(), self.settings_value()?);
        context.insert("slug".to_owned(), Value::String(slug.to_owned()));
        context.insert("meta".to_owned(), Value::Object(meta));
        context.insert("content".to_owned(), Value::String(content));
        context.insert("pages".to_owned(), Value::Object(self.pages_data()));
        context.insert(
            "collections".to_owned(),
            Value::Object(self.collections_data()),
        );
        if let RouteTarget::CollectionIndex(collection) = target {
            context.insert(
                "collection".to_owned(),
                Value::Object(collection_data(collection)),
            );
        }

        tracing::debug!(slug, template = %template, "Rendering");
        let body = self.engine.render(&template, &Value::Object(context))?;
        Ok(RenderedPage {
            status: PageStatus::Found,
            template,
            body,
        })
    }

    /// Render the not-found page.
    ///
    /// # Errors
    ///
    /// Fails if the `404` template is missing or fails.
    pub fn render_not_found(&self) -> Result<RenderedPage, SiteError> {
        let mut context = Map::new();
        context.insert("settings".to_owned(), self.settings_value()?);

        let body = self
            .engine
            .render(NOT_FOUND_TEMPLATE, &Value::Object(context))?;
        Ok(RenderedPage {
            status: PageStatus::NotFound,
            template: NOT_FOUND_TEMPLATE.to_owned(),
            body,
        })
    }

    fn settings_value(&self) -> Result<Value, SiteError> {
        Ok(serde_json::to_value(self.settings)?)
    }

    /// Every page's slug mapped to its front matter plus `slug`.
    fn pages_data(&self) -> Map<String, Value> {
        listing(self.store.pages())
    }

    /// Every collection's slug mapped to `{title, slug}`.
    fn collections_data(&self) -> Map<String, Value> {
        self.store
            .collections()
            .values()
            .map(|collection| {
                let slug = collection.slug();
                let mut data = Map::new();
                data.insert("title".to_owned(), Value::String(collection.title()));
                data.insert("slug".to_owned(), Value::String(slug.clone()));
                (slug, Value::Object(data))
            })
            .collect()
    }
}

fn collection_data(collection: &Collection) -> Map<String, Value> {
    listing(collection.entries())
}

/// Front matter of each document keyed by slug.
///
/// Documents whose front matter cannot be read are skipped with a warning.
fn listing<'d>(docs: impl IntoIterator<Item = (&'d String, &'d Document)>) -> Map<String, Value> {
    let mut data = Map::new();
    for (slug, doc) in docs {
        match doc.meta() {
            Ok(mut meta) => {
                meta.insert("slug".to_owned(), Value::String(slug.clone()));
                data.insert(slug.clone(), Value::Object(meta));
            }
            Err(e) => {
                tracing::warn!(
                    path = %doc.file_path().display(),
                    error = %e,
                    "Skipping document in listing"
                );
            }
        }
    }
    data
}
