//! Tracks which source files have already been rendered, keyed by a hash
//! of their content. The cache is an explicit value constructed by the
//! caller and passed down; there is no process-wide instance.

use crate::render::Format;
use blake3::Hash;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache file could not be read or written")]
    Io(#[from] std::io::Error),
    #[error("cache file is not valid JSON")]
    Format(#[from] serde_json::Error),
    #[error("source {0} is not tracked by the cache")]
    Untracked(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RenderCache {
    content_files: HashMap<String, FileInfo>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct FileInfo {
    hash: Hash,
    rendered: BTreeMap<String, bool>,
}

impl RenderCache {
    /// Load a cache file; a missing file is an empty cache, not an error.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let input = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&input)?)
    }

    pub fn store(&self, path: &Path) -> Result<(), CacheError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn matches(&self, path: &str, hash: Hash) -> bool {
        self.content_files
            .get(path)
            .map(|info| info.hash == hash)
            .unwrap_or_default()
    }

    /// Whether the stored hash matches and the given format has already
    /// been rendered successfully.
    pub fn up_to_date<F: Format + ?Sized>(&self, path: &str, hash: Hash, format: &F) -> bool {
        self.content_files
            .get(path)
            .map(|info| {
                info.hash == hash && info.rendered.get(format.name()).copied().unwrap_or(false)
            })
            .unwrap_or_default()
    }

    /// Start tracking a source at a new content hash, forgetting previous
    /// render statuses.
    pub fn reset_entry(&mut self, path: String, hash: Hash) {
        self.content_files.insert(
            path,
            FileInfo {
                hash,
                rendered: Default::default(),
            },
        );
    }

    pub fn update_status(
        &mut self,
        path: &str,
        format: &str,
        rendered: bool,
    ) -> Result<(), CacheError> {
        self.content_files
            .get_mut(path)
            .ok_or_else(|| CacheError::Untracked(path.to_string()))?
            .rendered
            .insert(format.to_string(), rendered);
        Ok(())
    }
}
