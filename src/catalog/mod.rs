//! Glyph and avatar image catalog.
//!
//! The layout engine only ever asks the catalog whether a name resolves. The
//! catalog is populated from outside (see [`loader`]) and may be incomplete
//! at any moment; an unresolved name is never an error.

pub mod loader;

use crate::model::AssetKind;
use std::collections::{BTreeSet, HashMap};

pub use loader::{AssetError, AssetEvent, AssetLoader};

/// A resolved image the renderer can draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    /// Catalog name.
    pub name: String,
    /// Where the image was resolved from.
    pub source: String,
    /// Glyph or avatar.
    pub kind: AssetKind,
}

impl ImageHandle {
    /// Create a handle.
    pub fn new(name: impl Into<String>, source: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            kind,
        }
    }
}

/// (kind, name) → image lookup.
///
/// Implementations must be non-blocking and deterministic for a fixed
/// content: the layout engine calls this for every glyph and avatar.
pub trait ImageCatalog {
    /// Resolve a name of the given kind, or `None` when the image is unknown,
    /// still loading, or failed to load.
    fn resolve_image(&self, kind: AssetKind, name: &str) -> Option<&ImageHandle>;
}

type CatalogKey = (AssetKind, String);

/// In-memory catalog backed by a `HashMap`.
///
/// Glyphs and avatars live in separate namespaces: a glyph and an avatar may
/// share a name without shadowing each other.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    ready: HashMap<CatalogKey, ImageHandle>,
    failed: BTreeSet<CatalogKey>,
}

impl MemoryCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved image. Returns `true` if the catalog changed.
    pub fn insert(&mut self, handle: ImageHandle) -> bool {
        let key = (handle.kind, handle.name.clone());
        self.failed.remove(&key);
        match self.ready.get(&key) {
            Some(existing) if *existing == handle => false,
            _ => {
                self.ready.insert(key, handle);
                true
            }
        }
    }

    /// Record a failed load. A failed name stays unresolved for that kind
    /// only. Returns `true` if the catalog changed.
    pub fn mark_failed(&mut self, kind: AssetKind, name: impl Into<String>) -> bool {
        let key = (kind, name.into());
        let removed = self.ready.remove(&key).is_some();
        let added = self.failed.insert(key);
        removed || added
    }

    /// Apply a loader event. Returns `true` if resolution results changed.
    pub fn apply(&mut self, event: AssetEvent) -> bool {
        match event {
            AssetEvent::Loaded(handle) => self.insert(handle),
            AssetEvent::Failed { name, kind, .. } => self.mark_failed(kind, name),
        }
    }

    /// Number of resolved images.
    pub fn len(&self) -> usize {
        self.ready.len()
    }

    /// True when nothing has resolved yet.
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    /// Number of names whose load failed.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// True if the name is known to have failed for that kind.
    pub fn is_failed(&self, kind: AssetKind, name: &str) -> bool {
        self.failed.contains(&(kind, name.to_string()))
    }
}

impl ImageCatalog for MemoryCatalog {
    fn resolve_image(&self, kind: AssetKind, name: &str) -> Option<&ImageHandle> {
        self.ready.get(&(kind, name.to_string()))
    }
}

impl<C: ImageCatalog + ?Sized> ImageCatalog for &C {
    fn resolve_image(&self, kind: AssetKind, name: &str) -> Option<&ImageHandle> {
        (**self).resolve_image(kind, name)
    }
}

impl FromIterator<ImageHandle> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = ImageHandle>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for handle in iter {
            catalog.insert(handle);
        }
        catalog
    }
}
