//! A single Markdown document and its slug.

use std::path::{Path, PathBuf};

use crate::error::ContentError;
use crate::front_matter::{Meta, parse_meta, split_front_matter};
use crate::markdown::render_markdown;

/// One Markdown file: a standalone page or a collection entry.
///
/// The slug is computed once at construction. File content is read on every
/// call to [`Document::meta`] or [`Document::meta_and_html`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    file_path: PathBuf,
    collection_name: String,
    slug: String,
}

impl Document {
    /// Create a document for `file_path` found under `base_path`.
    ///
    /// `collection_name` is empty for standalone pages.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::OutsideBase` if `file_path` is not under `base_path`.
    pub fn new(
        base_path: &Path,
        file_path: impl Into<PathBuf>,
        collection_name: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let file_path = file_path.into();
        let collection_name = collection_name.into();
        let slug = derive_slug(base_path, &file_path, &collection_name)?;
        Ok(Self {
            file_path,
            collection_name,
            slug,
        })
    }

    /// Create a standalone page document.
    pub fn page(base_path: &Path, file_path: impl Into<PathBuf>) -> Result<Self, ContentError> {
        Self::new(base_path, file_path, String::new())
    }

    /// URL slug, always starting with `/`.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Source file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Owning collection, or `""` for pages.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn is_collection_entry(&self) -> bool {
        !self.collection_name.is_empty()
    }

    /// Read the raw file content.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Io` if the file cannot be read.
    pub fn read(&self) -> Result<String, ContentError> {
        std::fs::read_to_string(&self.file_path).map_err(|e| ContentError::io(&self.file_path, e))
    }

    /// Parse front matter only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its front matter is invalid.
    pub fn meta(&self) -> Result<Meta, ContentError> {
        let content = self.read()?;
        let (front_matter, _) = split_front_matter(&content);
        self.parse(front_matter)
    }

    /// Parse front matter and render the Markdown body to HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its front matter is invalid.
    pub fn meta_and_html(&self) -> Result<(Meta, String), ContentError> {
        let content = self.read()?;
        let (front_matter, body) = split_front_matter(&content);
        let meta = self.parse(front_matter)?;
        Ok((meta, render_markdown(body)))
    }

    fn parse(&self, front_matter: &str) -> Result<Meta, ContentError> {
        parse_meta(front_matter).map_err(|message| ContentError::FrontMatter {
            path: self.file_path.clone(),
            message,
        })
    }
}

/// Derive the slug for a document.
///
/// Pages collapse to their containing directory; collection entries keep
/// their file name as the last segment and gain a `/<collection>` prefix.
fn derive_slug(base: &Path, file: &Path, collection: &str) -> Result<String, ContentError> {
    let source = if collection.is_empty() {
        file.parent().unwrap_or(file)
    } else {
        file
    };

    let relative = source
        .strip_prefix(base)
        .map_err(|_| ContentError::OutsideBase {
            path: file.to_path_buf(),
            base: base.to_path_buf(),
        })?;

    let mut slug = String::new();
    for component in relative.components() {
        slug.push('/');
        slug.push_str(&component.as_os_str().to_string_lossy());
    }

    if let Some(stem) = slug.strip_suffix(".md") {
        slug.truncate(stem.len());
    }
    if slug.is_empty() {
        slug.push('/');
    }
    if collection.is_empty() {
        Ok(slug)
    } else {
        Ok(format!("/{collection}{slug}"))
    }
}
