//! File-based document source.

use crate::model::error::InputError;
use std::path::{Path, PathBuf};

/// A dialogue document read from disk.
///
/// The file is read once, on construction.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    contents: String,
}

impl FileSource {
    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors (including invalid UTF-8).
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Path the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw document text.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Take the raw document text.
    pub fn into_contents(self) -> String {
        self.contents
    }
}
