//! Routing, template selection and request dispatch for Circulate.
//!
//! One request is handled in a single synchronous pass:
//!
//! 1. [`ContentStore::scan`](circulate_content::ContentStore::scan) walks the
//!    content directories
//! 2. [`RouteTable::build`] merges collections, entries and pages by slug
//! 3. the request path is looked up exactly
//! 4. [`Renderer`] builds the template context and picks a template, or the
//!    `404` template is rendered
//!
//! # Example
//!
//! ```ignore
//! use circulate_config::Config;
//! use circulate_site::{Dispatcher, PageStatus};
//!
//! let config = Config::load(None, None)?;
//! let dispatcher = Dispatcher::from_config(&config);
//! let page = dispatcher.dispatch("/about")?;
//! assert_eq!(page.status, PageStatus::Found);
//! ```

mod dispatcher;
mod error;
mod renderer;
mod router;
mod template;
#[cfg(test)]
mod testing;

pub use dispatcher::{Dispatcher, PageStatus, RenderedPage};
pub use error::SiteError;
pub use renderer::{
    COLLECTION_ENTRY_TEMPLATE, COLLECTION_INDEX_TEMPLATE, INDEX_TEMPLATE, NOT_FOUND_TEMPLATE,
    PAGE_TEMPLATE, Renderer, select_template,
};
pub use router::{RouteTable, RouteTarget};
pub use template::{MiniJinjaEngine, TEMPLATE_EXTENSION, TemplateEngine, TemplateError, asset, url};
