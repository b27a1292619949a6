//! Route table construction and lookup.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::Path;

use circulate_content::{Collection, ContentStore, Document};

/// What a slug resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTarget<'a> {
    /// A standalone page or a collection entry.
    Page(&'a Document),
    /// A collection acting as its own index page.
    CollectionIndex(&'a Collection),
}

impl RouteTarget<'_> {
    /// Short label used in route listings: `page`, `entry` or `collection`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Page(doc) if doc.is_collection_entry() => "entry",
            Self::Page(_) => "page",
            Self::CollectionIndex(_) => "collection",
        }
    }

    /// File or directory backing this route.
    pub fn source(&self) -> &Path {
        match self {
            Self::Page(doc) => doc.file_path(),
            Self::CollectionIndex(collection) => collection.dir(),
        }
    }
}

/// Slug-keyed routes for one request, borrowed from a [`ContentStore`].
///
/// On a slug collision a page wins over a collection entry, which wins
/// over a collection index.
#[derive(Debug, Default)]
pub struct RouteTable<'a> {
    routes: BTreeMap<String, RouteTarget<'a>>,
}

impl<'a> RouteTable<'a> {
    /// Merge the store's collections, their entries and its pages into one table.
    pub fn build(store: &'a ContentStore) -> Self {
        let mut routes = BTreeMap::new();

        for collection in store.collections().values() {
            routes
                .entry(collection.slug())
                .or_insert(RouteTarget::CollectionIndex(collection));

            for (slug, doc) in collection.entries() {
                routes.insert(slug.clone(), RouteTarget::Page(doc));
            }
        }

        for (slug, doc) in store.pages() {
            routes.insert(slug.clone(), RouteTarget::Page(doc));
        }

        tracing::debug!(routes = routes.len(), "Built route table");
        Self { routes }
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, path: &str) -> Option<&RouteTarget<'a>> {
        self.routes.get(path)
    }

    /// Routes in ascending slug order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, RouteTarget<'a>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'t, 'a> IntoIterator for &'t RouteTable<'a> {
    type Item = (&'t String, &'t RouteTarget<'a>);
    type IntoIter = btree_map::Iter<'t, String, RouteTarget<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
