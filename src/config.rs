//! Publisher configuration and parameter normalization.
//!
//! Categories and languages may be given as a single string or a list of
//! strings; normalization turns both forms into ordered sequences without
//! touching their content (empty or duplicate entries pass through).

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "categories")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A value that deserializes from either a scalar string or a list of strings.
///
/// `"app"` and `["app"]` are equivalent after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Returns the values as an ordered sequence. A scalar becomes a
    /// one-element sequence. Cannot fail.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    fn is_empty_list(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(values) => values.is_empty(),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Publisher settings as supplied by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherSettings {
    /// Message categories to export.
    pub categories: OneOrMany,

    /// Languages to export.
    pub languages: OneOrMany,

    /// Default language for the generated config object. Falls back to the
    /// ambient application locale when unset.
    #[serde(default)]
    pub default_language: Option<String>,

    /// Rewrite the artifact even when a cached copy exists.
    #[serde(default)]
    pub force_regenerate: bool,
}

/// Settings after normalization: ordered sequences and a resolved default
/// language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSettings {
    pub categories: Vec<String>,
    pub languages: Vec<String>,
    pub default_language: String,
    pub force_regenerate: bool,
}

impl PublisherSettings {
    /// # Errors
    /// - `categories` is an empty list
    /// - `languages` is an empty list
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.categories.is_empty_list() {
            errors.push(ValidationError::new(
                "categories",
                "At least one category is required. Example: [\"app\"]",
            ));
        }

        if self.languages.is_empty_list() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [\"en\"]",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Normalize into ordered sequences, resolving the default language from
    /// `ambient_language` when none is configured.
    #[must_use]
    pub fn normalize(self, ambient_language: &str) -> NormalizedSettings {
        let default_language =
            self.default_language.unwrap_or_else(|| ambient_language.to_string());
        NormalizedSettings {
            categories: self.categories.into_vec(),
            languages: self.languages.into_vec(),
            default_language,
            force_regenerate: self.force_regenerate,
        }
    }
}

/// Load publisher settings from a JSON file.
///
/// # Errors
/// - File read error
/// - JSON parse error
/// - Validation error
pub fn load_from_path(path: &Path) -> Result<Option<PublisherSettings>, ConfigError> {
    if !path.exists() {
        tracing::debug!("Settings file not found: {:?}", path);
        return Ok(None);
    }

    tracing::debug!("Loading settings from: {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let settings: PublisherSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn settings(categories: OneOrMany, languages: OneOrMany) -> PublisherSettings {
        PublisherSettings { categories, languages, default_language: None, force_regenerate: false }
    }

    #[rstest]
    fn normalize_scalar_inputs_become_single_element_sequences() {
        let normalized = settings("app".into(), "en".into()).normalize("en");

        assert_eq!(normalized.categories, vec!["app".to_string()]);
        assert_eq!(normalized.languages, vec!["en".to_string()]);
    }

    #[rstest]
    fn normalize_scalar_equals_singleton_list() {
        let from_scalar = settings("app".into(), "en".into()).normalize("en");
        let from_list =
            settings(vec!["app".to_string()].into(), vec!["en".to_string()].into()).normalize("en");

        assert_eq!(from_scalar, from_list);
    }

    #[rstest]
    fn normalize_preserves_order_and_duplicates() {
        let categories: OneOrMany = vec!["b".to_string(), "a".to_string(), "b".to_string()].into();
        let normalized = settings(categories, "en".into()).normalize("en");

        assert_eq!(normalized.categories, vec!["b", "a", "b"]);
    }

    #[rstest]
    fn normalize_resolves_default_language_from_ambient_locale() {
        let normalized = settings("app".into(), "en".into()).normalize("fr");

        assert_eq!(normalized.default_language, "fr");
    }

    #[rstest]
    fn normalize_keeps_configured_default_language() {
        let mut s = settings("app".into(), "en".into());
        s.default_language = Some("de".to_string());

        assert_eq!(s.normalize("fr").default_language, "de");
    }

    #[googletest::test]
    fn deserialize_scalar_and_list_forms() {
        let json = r#"{"categories": "app", "languages": ["en", "fr"]}"#;

        let s: PublisherSettings = serde_json::from_str(json).unwrap();

        expect_that!(s.categories, eq(&OneOrMany::One("app".to_string())));
        expect_that!(s.languages, eq(&OneOrMany::Many(vec!["en".to_string(), "fr".to_string()])));
        expect_that!(s.force_regenerate, eq(false));
    }

    #[googletest::test]
    fn validate_rejects_empty_lists() {
        let s = settings(Vec::new().into(), Vec::new().into());

        let errors = s.validate().unwrap_err();

        expect_that!(errors, len(eq(2)));
        expect_that!(errors[0].field_path, eq("categories"));
        expect_that!(errors[1].field_path, eq("languages"));
    }

    #[rstest]
    fn validate_accepts_scalar_inputs() {
        assert!(settings("app".into(), "en".into()).validate().is_ok());
    }

    #[rstest]
    fn load_from_path_with_valid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("publisher.json");
        fs::write(&path, r#"{"categories": ["app"], "languages": "en"}"#).unwrap();

        let loaded = load_from_path(&path).unwrap();

        assert!(loaded.is_some());
        assert_eq!(loaded.unwrap().languages, OneOrMany::One("en".to_string()));
    }

    #[rstest]
    fn load_from_path_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let loaded = load_from_path(&temp_dir.path().join("publisher.json")).unwrap();

        assert!(loaded.is_none());
    }

    #[rstest]
    fn load_from_path_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("publisher.json");
        fs::write(&path, "not json").unwrap();

        let result = load_from_path(&path);

        assert!(result.is_err());
    }
}
