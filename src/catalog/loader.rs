//! Background asset resolution.
//!
//! Resolves declared glyph and avatar sources on a worker thread and streams
//! the results over a channel. The event loop drains the channel without
//! blocking and feeds each event into the catalog.

use super::ImageHandle;
use crate::model::{AssetDecl, AssetKind};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, warn};

/// Why an asset could not be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The document declared the asset without a location.
    #[error("asset {name:?} has no source")]
    EmptySource {
        /// Asset name.
        name: String,
    },

    /// A local file source does not exist.
    #[error("asset {name:?}: file not found at {path}")]
    MissingFile {
        /// Asset name.
        name: String,
        /// Path that was checked.
        path: String,
    },

    /// The source uses a scheme the viewer cannot load.
    #[error("asset {name:?}: unsupported source {source_url}")]
    UnsupportedScheme {
        /// Asset name.
        name: String,
        /// Declared source.
        source_url: String,
    },
}

/// Result of resolving one declared asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEvent {
    /// The asset is available.
    Loaded(ImageHandle),
    /// The asset failed to load; it stays unresolved.
    Failed {
        /// Asset name.
        name: String,
        /// Declared kind; a glyph and an avatar may share a name.
        kind: AssetKind,
        /// Human-readable reason.
        reason: String,
    },
}

/// Resolve a single declared asset.
///
/// - `http://` / `https://` sources are accepted as-is: the terminal host never
///   decodes pixels, it only needs to know the image exists.
/// - `file://` and bare paths must exist on disk.
/// - Any other `scheme://` is unsupported.
///
/// # Errors
///
/// Returns an [`AssetError`] describing why the asset is unavailable.
pub fn resolve_asset(decl: &AssetDecl) -> Result<ImageHandle, AssetError> {
    let source = decl.source.trim();
    if source.is_empty() {
        return Err(AssetError::EmptySource {
            name: decl.name.clone(),
        });
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(ImageHandle::new(&decl.name, source, decl.kind));
    }

    let path = match source.strip_prefix("file://") {
        Some(path) => path,
        None if source.contains("://") => {
            return Err(AssetError::UnsupportedScheme {
                name: decl.name.clone(),
                source_url: source.to_string(),
            });
        }
        None => source,
    };

    if Path::new(path).exists() {
        Ok(ImageHandle::new(&decl.name, source, decl.kind))
    } else {
        Err(AssetError::MissingFile {
            name: decl.name.clone(),
            path: path.to_string(),
        })
    }
}

impl AssetEvent {
    /// Resolve a declaration on the calling thread and wrap the outcome.
    pub fn resolve(decl: &AssetDecl) -> Self {
        match resolve_asset(decl) {
            Ok(handle) => Self::Loaded(handle),
            Err(err) => Self::Failed {
                name: decl.name.clone(),
                kind: decl.kind,
                reason: err.to_string(),
            },
        }
    }
}

/// Handle to a background resolution job.
#[derive(Debug)]
pub struct AssetLoader {
    rx: Receiver<AssetEvent>,
    worker: Option<JoinHandle<()>>,
    finished: bool,
}

impl AssetLoader {
    /// Start resolving `decls` on a worker thread.
    pub fn spawn(decls: Vec<AssetDecl>) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            for decl in &decls {
                let event = AssetEvent::resolve(decl);
                if tx.send(event).is_err() {
                    // Receiver dropped: the viewer exited.
                    return;
                }
            }
        });

        Self {
            rx,
            worker: Some(worker),
            finished: false,
        }
    }

    /// Drain every event available right now. Never blocks.
    pub fn poll(&mut self) -> Vec<AssetEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if let AssetEvent::Failed { name, reason, .. } = &event {
                        warn!(asset = %name, %reason, "Asset failed to load");
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.mark_finished();
                    break;
                }
            }
        }
        events
    }

    /// True once the worker has sent everything and exited.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn mark_finished(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Asset loader thread panicked");
            }
        }
        debug!("Asset loader finished");
    }
}
