//! Collections: directories of entries addressable as an index page.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::Document;
use crate::front_matter::Meta;

/// A named directory of collection entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    name: String,
    dir: PathBuf,
    entries: BTreeMap<String, Document>,
}

impl Collection {
    /// Create a collection for `dir` owning `entries` (keyed by slug).
    pub fn new(dir: impl Into<PathBuf>, entries: BTreeMap<String, Document>) -> Self {
        let dir = dir.into();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, dir, entries }
    }

    /// Directory base name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Route of the collection index page (`/<name>`).
    pub fn slug(&self) -> String {
        format!("/{}", self.name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entries keyed by slug.
    pub fn entries(&self) -> &BTreeMap<String, Document> {
        &self.entries
    }

    /// Display title derived from the directory name.
    ///
    /// `my-cool-posts` becomes `My Cool Posts`.
    pub fn title(&self) -> String {
        titlecase_from_slug(&self.name)
    }

    /// Synthetic front matter used when the collection renders as a page.
    pub fn meta(&self) -> Meta {
        let mut meta = Meta::new();
        meta.insert("title".to_owned(), Value::String(self.title()));
        meta
    }
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of
/// each space-separated word. Other letters and spacing are left as-is.
fn titlecase_from_slug(slug: &str) -> String {
    let spaced = slug.replace(['-', '_'], " ");
    let mut result = String::with_capacity(spaced.len());
    for (i, word) in spaced.split(' ').enumerate() {
        if i > 0 {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("my-cool-posts"), "My Cool Posts");
        assert_eq!(titlecase_from_slug("release_notes"), "Release Notes");
        assert_eq!(titlecase_from_slug("blog"), "Blog");
        assert_eq!(titlecase_from_slug("mixed-case_ID"), "Mixed Case ID");
        assert_eq!(titlecase_from_slug("double--dash"), "Double  Dash");
        assert_eq!(titlecase_from_slug(""), "");
    }

    #[test]
    fn test_collection_identity() {
        let collection = Collection::new("/site/collections/my-cool-posts", BTreeMap::new());
        assert_eq!(collection.name(), "my-cool-posts");
        assert_eq!(collection.slug(), "/my-cool-posts");
        assert_eq!(collection.title(), "My Cool Posts");
    }

    #[test]
    fn test_collection_meta_has_title_only() {
        let collection = Collection::new("/c/blog", BTreeMap::new());
        let meta = collection.meta();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta["title"], json!("Blog"));
    }

    #[test]
    fn test_entries_are_owned() {
        let doc = Document::new(Path::new("/c/blog"), "/c/blog/a.md", "blog").unwrap();
        let mut entries = BTreeMap::new();
        entries.insert(doc.slug().to_owned(), doc);

        let collection = Collection::new("/c/blog", entries);

        assert_eq!(collection.entries().len(), 1);
        assert!(collection.entries().contains_key("/blog/a"));
    }
}
