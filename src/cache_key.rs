//! Content-derived identifier for the generated dictionary artifact.

use sha2::{
    Digest,
    Sha256,
};

/// Number of hex characters kept from the digest. Short enough for a file
/// name, long enough for a negligible collision chance over small input sets.
const KEY_LENGTH: usize = 10;

/// Compute the cache key for an ordered (categories, languages) pair.
///
/// The key is a truncated hex digest of the concatenated categories, a `:`
/// separator, and the concatenated languages. Identical sequences in
/// identical order always produce the same key; reordering the inputs
/// produces a different key and therefore a different artifact file.
#[must_use]
pub fn cache_key(categories: &[String], languages: &[String]) -> String {
    let input = format!("{}:{}", categories.concat(), languages.concat());
    let digest = Sha256::digest(input.as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    hex.chars().take(KEY_LENGTH).collect()
}

/// File name of the artifact identified by `key`.
#[must_use]
pub fn dictionary_file_name(key: &str) -> String {
    format!("dictionary-{key}.js")
}
