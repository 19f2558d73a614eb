//! Artifact generation and page registration.
//!
//! The generated artifact is a plain-text script of exactly two statements,
//! `I18n.translate.config=...;I18n.translate.dictionary=...`, cached on disk
//! under a content-derived file name. Regeneration always rewrites the whole
//! file; the write goes through a temporary path and an atomic rename so a
//! concurrent reader never observes a half-written artifact.

pub mod assets;
pub mod registry;

use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub use assets::{
    AssetPublisher,
    DirAssetPublisher,
    PublishedAssets,
};
pub use registry::{
    PageScriptRegistry,
    ScriptPosition,
    ScriptRegistry,
};

use crate::cache_key::{
    cache_key,
    dictionary_file_name,
};
use crate::config::NormalizedSettings;
use crate::dictionary::{
    Dictionary,
    build_dictionary,
};
use crate::source::{
    SourceError,
    TranslationSource,
};

/// Namespace the client-side runtime reads the generated globals from.
pub const NAMESPACE: &str = "I18n.translate";

/// File name of the static lookup runtime shipped in the crate's assets.
pub const RUNTIME_SCRIPT: &str = "i18n-runtime.js";

/// Tracing target for the absorbed write/publish failures.
const LOG_TARGET: &str = "publish";

/// Fatal publishing errors. Artifact write failures are absorbed and logged,
/// never surfaced here.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to serialize dictionary payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to publish asset directory: {0}")]
    Assets(#[from] io::Error),
}

/// Config object embedded in the artifact alongside the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    /// Default language for client-side lookups.
    pub language: String,
}

/// Terminal state of one publish pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A cached artifact was served; the source was never read.
    CacheHit,
    /// The artifact was regenerated, written, and registered.
    Written,
    /// The rewrite failed but a previous artifact was still registered.
    StaleServed,
    /// No artifact exists on disk; nothing was registered.
    NotRegistered,
}

impl PublishOutcome {
    /// Whether the dictionary script was registered for the page.
    #[must_use]
    pub const fn is_registered(self) -> bool {
        !matches!(self, Self::NotRegistered)
    }
}

/// Serialize the two-statement artifact payload.
///
/// # Errors
/// JSON serialization failure.
pub fn serialize_payload(
    config: &RuntimeConfig,
    dictionary: &Dictionary,
) -> Result<String, serde_json::Error> {
    let config_json = serde_json::to_string(config)?;
    let dictionary_json = serde_json::to_string(dictionary)?;
    Ok(format!("{NAMESPACE}.config={config_json};{NAMESPACE}.dictionary={dictionary_json}"))
}

/// Generates the dictionary artifact and registers it, together with the
/// static lookup runtime, for the page's head section.
#[derive(Debug)]
pub struct FilePublisher<'a> {
    settings: &'a NormalizedSettings,
    source: &'a TranslationSource,
}

impl<'a> FilePublisher<'a> {
    #[must_use]
    pub const fn new(settings: &'a NormalizedSettings, source: &'a TranslationSource) -> Self {
        Self { settings, source }
    }

    /// Run one publish pass against an already-published asset directory.
    ///
    /// On a cache hit (artifact present, `force_regenerate` unset) the
    /// source-read path is not invoked at all. On a miss the dictionary is
    /// rebuilt from scratch and written; a failed write is logged once on the
    /// `publish` target and absorbed, leaving the page without the dictionary
    /// (or with the stale copy when one survives a forced rewrite).
    ///
    /// # Errors
    /// Source read or serialization failures. Write failures are absorbed.
    pub fn publish(
        &self,
        published: &PublishedAssets,
        page: &mut dyn ScriptRegistry,
    ) -> Result<PublishOutcome, PublishError> {
        let key = cache_key(&self.settings.categories, &self.settings.languages);
        let file_name = dictionary_file_name(&key);
        let target = published.base_path.join(&file_name);

        let cache_hit = target.exists() && !self.settings.force_regenerate;
        let mut write_failed = false;
        if !cache_hit {
            let dictionary = build_dictionary(
                &self.settings.languages,
                &self.settings.categories,
                self.source,
            )?;
            let config = RuntimeConfig { language: self.settings.default_language.clone() };
            let payload = serialize_payload(&config, &dictionary)?;
            if let Err(err) = write_atomic(&target, &payload) {
                tracing::debug!(
                    target: LOG_TARGET,
                    "Could not write dictionary file {file_name}: {err}"
                );
                write_failed = true;
            }
        }

        if target.exists() {
            page.register(&format!("{}/{RUNTIME_SCRIPT}", published.base_url), ScriptPosition::Head);
            page.register(&format!("{}/{file_name}", published.base_url), ScriptPosition::Head);
            let outcome = if cache_hit {
                PublishOutcome::CacheHit
            } else if write_failed {
                PublishOutcome::StaleServed
            } else {
                PublishOutcome::Written
            };
            return Ok(outcome);
        }

        if !write_failed {
            // Missing without a failed write: a racing cleanup removed it.
            tracing::debug!(target: LOG_TARGET, "Dictionary file {file_name} is missing");
        }
        Ok(PublishOutcome::NotRegistered)
    }
}

/// Write the payload through a temporary sibling and rename it into place so
/// readers only ever see a complete artifact.
fn write_atomic(target: &Path, payload: &str) -> io::Result<()> {
    let mut tmp = target.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);
    std::fs::write(tmp, payload)?;
    std::fs::rename(tmp, target)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn serialize_payload_fixed_textual_form() {
        let config = RuntimeConfig { language: "en".to_string() };
        let mut dictionary = Dictionary::new();
        let mut categories = BTreeMap::new();
        let mut messages = crate::source::MessageMap::new();
        messages.insert("Hello".to_string(), "Hello".to_string());
        categories.insert("app".to_string(), messages);
        dictionary.insert("en".to_string(), categories);

        let payload = serialize_payload(&config, &dictionary).unwrap();

        assert_eq!(
            payload,
            "I18n.translate.config={\"language\":\"en\"};\
             I18n.translate.dictionary={\"en\":{\"app\":{\"Hello\":\"Hello\"}}}"
        );
    }

    #[rstest]
    fn serialize_payload_empty_language_entry() {
        let config = RuntimeConfig { language: "en".to_string() };
        let mut dictionary = Dictionary::new();
        dictionary.insert("en".to_string(), BTreeMap::new());

        let payload = serialize_payload(&config, &dictionary).unwrap();

        assert_eq!(
            payload,
            "I18n.translate.config={\"language\":\"en\"};I18n.translate.dictionary={\"en\":{}}"
        );
    }

    #[googletest::test]
    fn write_atomic_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dictionary-abc.js");
        std::fs::write(&target, "old content that is much longer").unwrap();

        write_atomic(&target, "new").unwrap();

        expect_that!(std::fs::read_to_string(&target).unwrap(), eq("new"));
        expect_that!(dir.path().join("dictionary-abc.js.tmp").exists(), eq(false));
    }
}
