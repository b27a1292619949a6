//! Content model for Circulate.
//!
//! This crate turns a content directory into typed values:
//!
//! - [`Document`]: one Markdown file, a standalone page or a collection entry
//! - [`Collection`]: a named directory of entries
//! - [`ContentStore`]: the result of scanning `pages/` and `collections/`
//!
//! Nothing here is cached. Each request scans the tree again and documents
//! read their file every time their content is needed.
//!
//! # Content Layout
//!
//! ```text
//! _content/
//! ├── pages/
//! │   ├── index.md          -> /
//! │   └── about/index.md    -> /about
//! └── collections/
//!     └── blog/
//!         └── post1.md      -> /blog/post1
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use circulate_content::ContentStore;
//!
//! let store = ContentStore::scan(
//!     Path::new("_content/pages"),
//!     Path::new("_content/collections"),
//! )?;
//! for (slug, doc) in store.pages() {
//!     let (meta, html) = doc.meta_and_html()?;
//!     println!("{slug}: {}", meta["title"]);
//! }
//! ```

mod collection;
mod document;
mod error;
mod front_matter;
mod markdown;
mod store;

pub use collection::Collection;
pub use document::Document;
pub use error::ContentError;
pub use front_matter::Meta;
pub use store::ContentStore;
