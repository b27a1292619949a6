//! Content discovery by filesystem walking.
//!
//! [`ContentStore::scan`] walks the pages and collections directories and
//! builds [`Document`] and [`Collection`] values. No file content is read
//! at this stage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::collection::Collection;
use crate::document::Document;
use crate::error::ContentError;

/// File name that marks a page directory.
const PAGE_FILENAME: &str = "index.md";

/// Extension of collection entry files.
const ENTRY_SUFFIX: &str = ".md";

/// Documents and collections discovered in one scan.
#[derive(Debug, PartialEq, Eq)]
pub struct ContentStore {
    pages: BTreeMap<String, Document>,
    collections: BTreeMap<String, Collection>,
}

impl ContentStore {
    /// Scan `pages_dir` and `collections_dir`.
    ///
    /// - every `index.md` under `pages_dir` becomes a page
    /// - every immediate subdirectory of `collections_dir` becomes a
    ///   collection of all `*.md` files beneath it
    ///
    /// Hidden files and directories are skipped. Entries are visited in
    /// file-name order, so the result is deterministic for a given tree.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::MissingDirectory` if either directory does not
    /// exist, or `ContentError::Io` if it cannot be listed.
    pub fn scan(pages_dir: &Path, collections_dir: &Path) -> Result<Self, ContentError> {
        require_dir("Pages", pages_dir)?;
        require_dir("Collections", collections_dir)?;

        let pages = scan_pages(pages_dir)?;
        let collections = scan_collections(collections_dir)?;

        tracing::debug!(
            pages = pages.len(),
            collections = collections.len(),
            "Scanned content"
        );

        Ok(Self { pages, collections })
    }

    /// Standalone pages keyed by slug.
    pub fn pages(&self) -> &BTreeMap<String, Document> {
        &self.pages
    }

    /// Collections keyed by directory name.
    pub fn collections(&self) -> &BTreeMap<String, Collection> {
        &self.collections
    }
}

fn require_dir(what: &'static str, path: &Path) -> Result<(), ContentError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ContentError::MissingDirectory {
            what,
            path: path.to_path_buf(),
        })
    }
}

fn scan_pages(pages_dir: &Path) -> Result<BTreeMap<String, Document>, ContentError> {
    let mut files = Vec::new();
    collect_files(pages_dir, &|name| name == PAGE_FILENAME, &mut files)?;

    let mut pages = BTreeMap::new();
    for file in files {
        let doc = Document::page(pages_dir, file)?;
        pages.insert(doc.slug().to_owned(), doc);
    }
    Ok(pages)
}

fn scan_collections(
    collections_dir: &Path,
) -> Result<BTreeMap<String, Collection>, ContentError> {
    let mut collections = BTreeMap::new();

    for entry in list_dir(collections_dir)? {
        if !entry.is_dir {
            continue;
        }

        let mut files = Vec::new();
        collect_files(&entry.path, &|name| name.ends_with(ENTRY_SUFFIX), &mut files)?;

        let mut entries = BTreeMap::new();
        for file in files {
            let doc = Document::new(&entry.path, file, entry.name.clone())?;
            entries.insert(doc.slug().to_owned(), doc);
        }

        collections.insert(entry.name, Collection::new(entry.path, entries));
    }

    Ok(collections)
}

/// A visible directory entry with its file type resolved.
struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// List visible entries of `dir`, sorted by name.
fn list_dir(dir: &Path) -> Result<Vec<Entry>, ContentError> {
    let read = fs::read_dir(dir).map_err(|e| ContentError::io(dir, e))?;

    let mut entries: Vec<Entry> = read
        .filter_map(Result::ok)
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
            Some(Entry {
                path: e.path(),
                name,
                is_dir,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Recursively collect files under `dir` whose name satisfies `matches`.
///
/// Subdirectories that cannot be listed are skipped with a warning.
fn collect_files(
    dir: &Path,
    matches: &dyn Fn(&str) -> bool,
    out: &mut Vec<PathBuf>,
) -> Result<(), ContentError> {
    for entry in list_dir(dir)? {
        if entry.is_dir {
            if let Err(e) = collect_files(&entry.path, matches, out) {
                tracing::warn!(path = %entry.path.display(), error = %e, "Skipping unreadable directory");
            }
        } else if matches(&entry.name) {
            out.push(entry.path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Create a content tree from `(relative path, content)` pairs.
    fn create_tree(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::create_dir_all(dir.path().join("collections")).unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn scan(dir: &tempfile::TempDir) -> ContentStore {
        ContentStore::scan(&dir.path().join("pages"), &dir.path().join("collections")).unwrap()
    }

    #[test]
    fn test_scan_pages_only_index_files() {
        let dir = create_tree(&[
            ("pages/index.md", "title: Home\n---\n"),
            ("pages/about/index.md", "title: About\n---\n"),
            ("pages/about/team.md", "title: Team\n---\n"),
            ("pages/a/b/index.md", "title: Deep\n---\n"),
        ]);

        let store = scan(&dir);
        let slugs: Vec<_> = store.pages().keys().map(String::as_str).collect();

        assert_eq!(slugs, vec!["/", "/a/b", "/about"]);
        assert!(store.pages().values().all(|d| !d.is_collection_entry()));
    }

    #[test]
    fn test_scan_collections() {
        let dir = create_tree(&[
            ("collections/blog/post1.md", "title: One\n---\n"),
            ("collections/blog/2024/post2.md", "title: Two\n---\n"),
            ("collections/blog/notes.txt", "ignored"),
            ("collections/my-cool-posts/x.md", "title: X\n---\n"),
        ]);

        let store = scan(&dir);

        let names: Vec<_> = store.collections().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["blog", "my-cool-posts"]);

        let blog = &store.collections()["blog"];
        let slugs: Vec<_> = blog.entries().keys().map(String::as_str).collect();
        assert_eq!(slugs, vec!["/blog/2024/post2", "/blog/post1"]);
        assert!(blog.entries().values().all(|d| d.collection_name() == "blog"));
    }

    #[test]
    fn test_scan_ignores_files_at_collections_root() {
        let dir = create_tree(&[("collections/stray.md", "title: Stray\n---\n")]);
        let store = scan(&dir);
        assert!(store.collections().is_empty());
    }

    #[test]
    fn test_empty_collection_directory_is_kept() {
        let dir = create_tree(&[]);
        fs::create_dir(dir.path().join("collections/empty")).unwrap();

        let store = scan(&dir);

        assert!(store.collections()["empty"].entries().is_empty());
    }

    #[test]
    fn test_scan_skips_hidden() {
        let dir = create_tree(&[
            ("pages/.drafts/index.md", "title: Draft\n---\n"),
            ("collections/.git/config.md", ""),
            ("collections/blog/.swap.md", ""),
            ("collections/blog/real.md", "title: Real\n---\n"),
        ]);

        let store = scan(&dir);

        assert!(store.pages().is_empty());
        assert_eq!(store.collections().len(), 1);
        assert_eq!(store.collections()["blog"].entries().len(), 1);
    }

    #[test]
    fn test_scan_missing_pages_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("collections")).unwrap();

        let err = ContentStore::scan(&dir.path().join("pages"), &dir.path().join("collections"))
            .unwrap_err();

        assert!(matches!(err, ContentError::MissingDirectory { what: "Pages", .. }));
    }

    #[test]
    fn test_scan_missing_collections_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();

        let err = ContentStore::scan(&dir.path().join("pages"), &dir.path().join("collections"))
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::MissingDirectory {
                what: "Collections",
                ..
            }
        ));
    }

    #[test]
    fn test_rescan_is_stable() {
        let dir = create_tree(&[
            ("pages/index.md", "title: Home\n---\n"),
            ("collections/blog/a.md", "title: A\n---\n"),
        ]);

        assert_eq!(scan(&dir), scan(&dir));
    }
}
