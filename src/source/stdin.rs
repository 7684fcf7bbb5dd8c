//! Stdin-based document source for piped input.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};

/// Stdin source for a piped dialogue document (`cat doc.json | magic-words -`).
///
/// Refuses an interactive terminal so the viewer never blocks waiting for
/// the user to type a document.
#[derive(Debug)]
pub struct StdinSource<R: Read> {
    reader: R,
}

impl StdinSource<std::io::Stdin> {
    /// Create a source reading the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { reader: stdin })
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read the whole document until EOF.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures or invalid UTF-8.
    pub fn read_document(mut self) -> Result<String, InputError> {
        let mut contents = String::new();
        self.reader.read_to_string(&mut contents)?;
        Ok(contents)
    }
}
