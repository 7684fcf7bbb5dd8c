//! Dialogue document sources.
//!
//! A document comes from one of:
//! - a file path
//! - stdin (`-`)
//! - the sample document bundled into the binary (no argument)

use crate::model::error::{AppError, DocumentError, InputError};
use crate::model::{DialogueDocument, DialogueSet};
use std::path::PathBuf;
use tracing::info;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Sample dialogue shown when no document is given.
pub const SAMPLE_DOCUMENT: &str = include_str!("sample_dialogue.json");

/// Where to read the dialogue document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk.
    File(PathBuf),
    /// Piped stdin.
    Stdin,
    /// The bundled sample.
    Sample,
}

impl DocumentSource {
    /// Short label for the title bar.
    pub fn label(&self) -> String {
        match self {
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Stdin => "<stdin>".to_string(),
            DocumentSource::Sample => "sample".to_string(),
        }
    }

    /// Read the raw document text.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the file is missing, stdin is a terminal, or
    /// reading fails.
    pub fn read_text(&self) -> Result<String, InputError> {
        match self {
            DocumentSource::File(path) => Ok(FileSource::new(path)?.into_contents()),
            DocumentSource::Stdin => StdinSource::new()?.read_document(),
            DocumentSource::Sample => Ok(SAMPLE_DOCUMENT.to_string()),
        }
    }

    /// Read and decode the document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InputRead` for read failures and
    /// `AppError::Document` for malformed documents.
    pub fn load(&self) -> Result<DialogueSet, AppError> {
        let text = self.read_text()?;
        let set = parse_document(&text)?;
        info!(
            source = %self.label(),
            entries = set.len(),
            assets = set.assets().len(),
            "Loaded dialogue document"
        );
        Ok(set)
    }
}

/// Pick the document source for a CLI argument.
///
/// `-` means stdin; no argument means the bundled sample.
pub fn detect_document_source(path: Option<PathBuf>) -> DocumentSource {
    match path {
        Some(path) if path.as_os_str() == "-" => DocumentSource::Stdin,
        Some(path) => DocumentSource::File(path),
        None => DocumentSource::Sample,
    }
}

/// Decode document text into a dialogue set.
///
/// # Errors
///
/// Returns `DocumentError::Json` for malformed JSON.
pub fn parse_document(text: &str) -> Result<DialogueSet, DocumentError> {
    DialogueDocument::from_json(text).map(DialogueSet::from_document)
}
