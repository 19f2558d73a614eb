//! File-backed translation source.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use super::{
    MessageMap,
    SourceError,
};

/// Reads translations from per-language JSON files laid out as
/// `<base_path>/<language>/<category>.json`, each containing a flat
/// message → translation object.
#[derive(Debug, Clone)]
pub struct FileTranslationSource {
    base_path: PathBuf,
}

impl FileTranslationSource {
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    /// Path of the translation file for one (language, category) pair.
    #[must_use]
    pub fn message_file(&self, language: &str, category: &str) -> PathBuf {
        self.base_path.join(language).join(format!("{category}.json"))
    }

    /// Load the mapping for one (language, category) pair.
    ///
    /// A missing file yields `Ok(None)` (the category is simply absent).
    /// Entries whose value is not a non-empty string are dropped, so a file
    /// that filters down to nothing still yields an empty mapping.
    ///
    /// # Errors
    /// - File read error (other than not-found)
    /// - Malformed content (invalid JSON, or a non-object root)
    pub fn fetch(&self, language: &str, category: &str) -> Result<Option<MessageMap>, SourceError> {
        let path = self.message_file(language, category);
        if !path.exists() {
            tracing::debug!("No translation file for {language}/{category}");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let json: Value = serde_json::from_str(&content)
            .map_err(|err| malformed(&path, format!("invalid JSON: {err}")))?;
        let Value::Object(entries) = json else {
            return Err(malformed(&path, "expected a top-level object".to_string()));
        };

        let map: MessageMap = entries
            .into_iter()
            .filter_map(|(message, value)| match value {
                Value::String(translation) if !translation.is_empty() => {
                    Some((message, translation))
                }
                _ => None,
            })
            .collect();

        Ok(Some(map))
    }
}

fn malformed(path: &Path, message: String) -> SourceError {
    SourceError::Malformed { path: path.display().to_string(), message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write_messages(dir: &TempDir, language: &str, category: &str, content: &str) {
        let lang_dir = dir.path().join(language);
        fs::create_dir_all(&lang_dir).unwrap();
        fs::write(lang_dir.join(format!("{category}.json")), content).unwrap();
    }

    #[googletest::test]
    fn fetch_loads_flat_mapping() {
        let dir = TempDir::new().unwrap();
        write_messages(&dir, "en", "app", r#"{"Hello": "Hello", "Bye": "Goodbye"}"#);
        let source = FileTranslationSource::new(dir.path());

        let map = source.fetch("en", "app").unwrap().unwrap();

        expect_that!(map.get("Hello"), some(eq(&"Hello".to_string())));
        expect_that!(map.get("Bye"), some(eq(&"Goodbye".to_string())));
        expect_that!(map.len(), eq(2));
    }

    #[rstest]
    fn fetch_missing_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let source = FileTranslationSource::new(dir.path());

        let result = source.fetch("en", "app").unwrap();

        assert!(result.is_none());
    }

    #[googletest::test]
    fn fetch_drops_empty_and_non_string_values() {
        let dir = TempDir::new().unwrap();
        write_messages(
            &dir,
            "en",
            "app",
            r#"{"Hello": "Hello", "Empty": "", "Null": null, "Flag": false}"#,
        );
        let source = FileTranslationSource::new(dir.path());

        let map = source.fetch("en", "app").unwrap().unwrap();

        expect_that!(map.len(), eq(1));
        expect_that!(map.contains_key("Hello"), eq(true));
    }

    #[rstest]
    fn fetch_all_filtered_yields_empty_mapping_not_none() {
        let dir = TempDir::new().unwrap();
        write_messages(&dir, "en", "app", r#"{"Empty": ""}"#);
        let source = FileTranslationSource::new(dir.path());

        let result = source.fetch("en", "app").unwrap();

        assert_eq!(result, Some(MessageMap::new()));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"["Hello"]"#)]
    #[case(r#""Hello""#)]
    fn fetch_malformed_content_is_an_error(#[case] content: &str) {
        let dir = TempDir::new().unwrap();
        write_messages(&dir, "en", "app", content);
        let source = FileTranslationSource::new(dir.path());

        let result = source.fetch("en", "app");

        assert!(matches!(result, Err(SourceError::Malformed { .. })));
    }
}
