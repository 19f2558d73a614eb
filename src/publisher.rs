//! Top-level publisher composing the whole sequence: normalize, publish the
//! asset directory, compute the cache key, conditionally rebuild, register.

use std::path::Path;

use crate::config::{
    NormalizedSettings,
    PublisherSettings,
};
use crate::publish::{
    AssetPublisher,
    FilePublisher,
    PublishError,
    PublishOutcome,
    ScriptRegistry,
};
use crate::source::TranslationSource;

/// Source text of the bundled client-side lookup runtime. Hosts that do not
/// vendor the crate's `assets/` directory can materialize it from here.
#[must_use]
pub const fn runtime_script_source() -> &'static str {
    include_str!("../assets/i18n-runtime.js")
}

/// Exports server-side translations into a cached client-side dictionary
/// script, once per page render.
///
/// All collaborators are passed in explicitly; the publisher holds no
/// ambient state. Concurrent passes over the same cache key may race on the
/// artifact, which is tolerated because every write lands atomically.
#[derive(Debug)]
pub struct DictionaryPublisher {
    settings: NormalizedSettings,
    source: TranslationSource,
}

impl DictionaryPublisher {
    /// Build a publisher from raw settings. `ambient_language` is the
    /// application locale used when no default language is configured.
    #[must_use]
    pub fn new(settings: PublisherSettings, ambient_language: &str, source: TranslationSource) -> Self {
        Self { settings: settings.normalize(ambient_language), source }
    }

    #[must_use]
    pub const fn settings(&self) -> &NormalizedSettings {
        &self.settings
    }

    /// Run one publish pass: mirror `assets_dir` through the asset publisher,
    /// then generate (or reuse) the dictionary artifact next to it and
    /// register both scripts for the page head.
    ///
    /// # Errors
    /// Asset mirroring, source read, or serialization failures. Artifact
    /// write failures are absorbed and logged.
    pub fn attach(
        &self,
        assets_dir: &Path,
        assets: &impl AssetPublisher,
        page: &mut impl ScriptRegistry,
    ) -> Result<PublishOutcome, PublishError> {
        let published = assets.publish(assets_dir)?;
        FilePublisher::new(&self.settings, &self.source).publish(&published, page)
    }
}
