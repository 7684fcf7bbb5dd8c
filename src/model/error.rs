//! Error types for the dialogue viewer.
//!
//! Errors are defined per boundary with `thiserror` and compose via `From`,
//! so `?` carries them up to `main`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error wrapping every fatal failure
//!   - [`InputError`] - reading the dialogue document (file not found, IO)
//!   - [`DocumentError`] - decoding the dialogue document (malformed JSON)
//!   - `std::io::Error` - terminal failures
//!
//! # Recovery Strategy
//!
//! Only the boundaries can fail. The core (tokenizer, layout, scroll) is total:
//! missing glyphs, failed asset loads and malformed glyph syntax degrade
//! visually instead of producing errors.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// # Examples
///
/// ```no_run
/// use magic_words::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     let _input = read_document()?;
///     Ok(())
/// }
/// # fn read_document() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the dialogue document.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// The dialogue document could not be decoded.
    #[error("Failed to decode dialogue document: {0}")]
    Document(#[from] DocumentError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the dialogue document.
#[derive(Debug, Error)]
pub enum InputError {
    /// The document path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use magic_words::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Stdin was requested but is an interactive terminal.
    #[error("No input on stdin: pipe a dialogue document or pass a file path")]
    NoInput,

    /// Generic I/O failure (permissions, broken pipe on stdin, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors decoding a dialogue document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Malformed JSON, wrong field types or an unknown avatar position.
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Json {
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
        /// Decoder message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_converts_into_app_error() {
        let err: AppError = InputError::FileNotFound {
            path: PathBuf::from("dialogue.json"),
        }
        .into();
        assert!(matches!(err, AppError::InputRead(_)));
        assert!(err.to_string().contains("dialogue.json"));
    }

    #[test]
    fn document_error_converts_into_app_error() {
        let err: AppError = DocumentError::Json {
            line: 3,
            column: 7,
            message: "expected value".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Document(_)));
        assert!(err.to_string().contains("line 3, column 7"));
    }

    #[test]
    fn io_error_converts_into_input_error() {
        let err: InputError = std::io::Error::other("boom").into();
        assert!(matches!(err, InputError::Io(_)));
    }
}
