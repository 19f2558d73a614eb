//! Asset publishing collaborator.

use std::io;
use std::path::{
    Path,
    PathBuf,
};

/// Location of a published asset directory: where files live on disk and
/// where the browser fetches them from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAssets {
    /// Public base URL of the published directory.
    pub base_url: String,
    /// Local base path where published files are mirrored.
    pub base_path: PathBuf,
}

/// Publishes a local directory into a web-servable location.
pub trait AssetPublisher {
    /// Mirror `source_dir` under the web root and return its public URL and
    /// local path.
    ///
    /// # Errors
    /// Filesystem errors while mirroring.
    fn publish(&self, source_dir: &Path) -> io::Result<PublishedAssets>;
}

/// Filesystem implementation: copies the directory's files under a web root
/// (skipping files already present) and derives the URL from the directory
/// name.
#[derive(Debug, Clone)]
pub struct DirAssetPublisher {
    web_root: PathBuf,
    base_url: String,
}

impl DirAssetPublisher {
    #[must_use]
    pub fn new(web_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { web_root: web_root.into(), base_url: base_url.trim_end_matches('/').to_string() }
    }
}

impl AssetPublisher for DirAssetPublisher {
    fn publish(&self, source_dir: &Path) -> io::Result<PublishedAssets> {
        let dir_name = source_dir
            .file_name()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "asset path has no directory name")
            })?
            .to_string_lossy()
            .to_string();
        let target = self.web_root.join(&dir_name);
        std::fs::create_dir_all(&target)?;

        for entry in std::fs::read_dir(source_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let destination = target.join(entry.file_name());
            if !destination.exists() {
                std::fs::copy(entry.path(), &destination)?;
            }
        }

        Ok(PublishedAssets {
            base_url: format!("{}/{dir_name}", self.base_url),
            base_path: target,
        })
    }
}
