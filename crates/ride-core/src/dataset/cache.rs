use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use super::Dataset;
use crate::error::LoadError;
use crate::source::parse::ParseConfig;
use crate::source::read::read_source;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    content_hash: String,
    config: ParseConfig,
}

/// Memoizes normalized datasets by path, content and parse configuration.
///
/// Entries are shared as `Arc<Dataset>` and never mutated after insertion.
/// The source is still read on every call, since the content hash is part of
/// the key; only parsing and normalization are skipped on a hit.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<CacheKey, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &mut self,
        path: &Path,
        config: &ParseConfig,
    ) -> Result<Arc<Dataset>, LoadError> {
        let ctx = read_source(path)?;
        let key = CacheKey {
            path: fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            content_hash: ctx.hash_hex.clone(),
            config: config.clone(),
        };

        if let Some(hit) = self.entries.get(&key) {
            debug!("dataset cache hit for {}", path.display());
            return Ok(Arc::clone(hit));
        }

        debug!("dataset cache miss for {}", path.display());
        let dataset = Arc::new(Dataset::from_source(ctx, config)?);
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
