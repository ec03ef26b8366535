//! Extractor output cache.
//!
//! Parsing extractor JSON is the expensive step of a rebuild, so parsed
//! results are cached per file with a two-level staleness check: a cheap
//! metadata stamp first, then a content hash when the stamp moved. The cache
//! is an explicit handle created by the caller and passed into the pipeline;
//! output is identical whether it is warm or cold.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use docsmith_types::Extraction;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

#[derive(Clone)]
struct CacheEntry {
    stamp: FileStamp,
    content_hash: u64,
    extraction: Arc<Extraction>,
}

/// Cache of parsed extractor outputs, keyed by file path.
#[derive(Default)]
pub struct ExtractorCache {
    entries: Mutex<FxHashMap<PathBuf, CacheEntry>>,
}

impl ExtractorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an extractor output file, reusing the parsed result when the file
    /// has not changed on disk.
    pub async fn load(&self, path: &Path) -> Result<Arc<Extraction>> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|error| CliError::io(path, error))?;
        let stamp = FileStamp {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        };

        if let Some(entry) = self.entries.lock().get(path) {
            if entry.stamp == stamp {
                debug!("extractor cache hit for {}", path.display());
                return Ok(entry.extraction.clone());
            }
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|error| CliError::io(path, error))?;
        let content_hash = seahash::hash(&bytes);

        {
            let mut entries = self.entries.lock();
            if let Some(entry) = entries.get_mut(path) {
                if entry.content_hash == content_hash {
                    // Touched but unchanged; refresh the stamp only.
                    entry.stamp = stamp;
                    return Ok(entry.extraction.clone());
                }
            }
        }

        let extraction: Extraction =
            serde_json::from_slice(&bytes).map_err(|error| CliError::ExtractorJson {
                path: path.to_path_buf(),
                error,
            })?;
        let extraction = Arc::new(extraction);
        self.entries.lock().insert(
            path.to_path_buf(),
            CacheEntry {
                stamp,
                content_hash,
                extraction: extraction.clone(),
            },
        );
        debug!("extractor cache load for {}", path.display());
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{"exports": [{"name": "Orientation", "type": {"kind": "intrinsic", "name": "string"}}]}"#
    }

    #[tokio::test]
    async fn cold_and_warm_loads_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accordion.json");
        std::fs::write(&path, sample_json()).unwrap();

        let cache = ExtractorCache::new();
        let cold = cache.load(&path).await.unwrap();
        let warm = cache.load(&path).await.unwrap();
        assert_eq!(cold, warm);
        assert_eq!(cold.exports.len(), 1);
    }

    #[tokio::test]
    async fn changed_content_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accordion.json");
        std::fs::write(&path, sample_json()).unwrap();

        let cache = ExtractorCache::new();
        let first = cache.load(&path).await.unwrap();
        assert_eq!(first.exports[0].name, "Orientation");

        std::fs::write(
            &path,
            r#"{"exports": [{"name": "Alignment", "type": {"kind": "intrinsic", "name": "string"}}]}"#,
        )
        .unwrap();
        let second = cache.load(&path).await.unwrap();
        assert_eq!(second.exports[0].name, "Alignment");
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = ExtractorCache::new();
        assert!(matches!(
            cache.load(&path).await,
            Err(CliError::ExtractorJson { .. })
        ));
    }
}
