//! Dictionary assembly over a translation source.

use std::collections::BTreeMap;

use crate::source::{
    MessageMap,
    SourceError,
    TranslationSource,
};

/// Nested mapping language → category → (message → translation).
///
/// Ordered maps keep the serialized artifact byte-stable for a given source
/// state; the consumer only relies on key lookup.
pub type Dictionary = BTreeMap<String, BTreeMap<String, MessageMap>>;

/// Build a fresh dictionary for the given ordered languages and categories.
///
/// Every requested language gets an entry, even when no category contributes
/// to it. A category key is present only when the source has a contribution
/// for the (language, category) pair; a contribution may be an empty mapping
/// (a translation file that filtered down to nothing).
///
/// # Errors
/// Source read failures propagate unmodified.
pub fn build_dictionary(
    languages: &[String],
    categories: &[String],
    source: &TranslationSource,
) -> Result<Dictionary, SourceError> {
    let mut dictionary = Dictionary::new();
    for language in languages {
        let entry = dictionary.entry(language.clone()).or_default();
        for category in categories {
            if let Some(map) = source.fetch(language, category)? {
                entry.insert(category.clone(), map);
            }
        }
    }
    Ok(dictionary)
}
