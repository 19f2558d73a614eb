//! Backing stores for translated strings.
//!
//! Exactly two variants exist: a directory of per-language translation files
//! and a relational table pair. The closed enum makes an unrecognized source
//! unrepresentable, so there is no silent-skip path for unknown store types.

pub mod file;
pub mod table;

use std::collections::BTreeMap;

use thiserror::Error;

pub use file::FileTranslationSource;
pub use table::TableTranslationSource;

/// Flat message → translation mapping for one (language, category) pair.
pub type MessageMap = BTreeMap<String, String>;

/// Errors raised while reading from a backing store. These are fatal and
/// propagate to the caller unmodified.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed translation file '{path}': {message}")]
    Malformed { path: String, message: String },

    #[error("Translation query failed: {0}")]
    Db(String),
}

/// A store of translated strings, selected by configuration.
#[derive(Debug)]
pub enum TranslationSource {
    /// Per-language, per-category translation files under a base directory.
    File(FileTranslationSource),
    /// A source-message table joined with a translated-message table.
    Table(TableTranslationSource),
}

impl TranslationSource {
    /// Fetch the message → translation mapping for one (language, category)
    /// pair. `Ok(None)` means the store has no contribution for the pair and
    /// the category key stays absent from the dictionary.
    ///
    /// # Errors
    /// Store read failures (missing is not a failure).
    pub fn fetch(&self, language: &str, category: &str) -> Result<Option<MessageMap>, SourceError> {
        match self {
            Self::File(source) => source.fetch(language, category),
            Self::Table(source) => source.fetch(language, category),
        }
    }
}
