//! Process-wide caching of resolved settings.
//!
//! Concurrent test startup must not read the same settings files twice, so
//! the check and the insert happen under a single lock. The first caller's
//! value wins.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use crate::cascade::{resolve, search_ancestors, ResolvedSettings};
use crate::error::SettingsError;

/// A cache of resolved settings keyed by an identity.
#[derive(Debug)]
pub struct SettingsCache<K> {
    entries: Mutex<HashMap<K, Arc<ResolvedSettings>>>,
}

impl<K: Eq + Hash> Default for SettingsCache<K> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> SettingsCache<K> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached settings for `key`, computing them with `resolver`
    /// on first use. A resolver error leaves the cache unchanged.
    pub fn get_or_resolve<E>(
        &self,
        key: &K,
        resolver: impl FnOnce() -> Result<ResolvedSettings, E>,
    ) -> Result<Arc<ResolvedSettings>, E> {
        // A panic while holding the lock cannot leave a half-inserted entry.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(settings) = entries.get(key) {
            return Ok(Arc::clone(settings));
        }
        let settings = Arc::new(resolver()?);
        entries.insert(key.clone(), Arc::clone(&settings));
        Ok(settings)
    }

    /// Returns the cached settings for `key` without resolving.
    pub fn get(&self, key: &K) -> Option<Arc<ResolvedSettings>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key for [`global`]: a start directory and a settings file name.
pub type DirectoryKey = (PathBuf, String);

static GLOBAL: OnceLock<SettingsCache<DirectoryKey>> = OnceLock::new();

/// The process-wide cache used by [`local_settings`].
pub fn global() -> &'static SettingsCache<DirectoryKey> {
    GLOBAL.get_or_init(SettingsCache::new)
}

/// Resolves the settings cascade for `start_dir`, reading files at most once
/// per process.
pub fn local_settings(
    start_dir: &Path,
    file_name: &str,
) -> Result<Arc<ResolvedSettings>, SettingsError> {
    let key = (start_dir.to_path_buf(), file_name.to_string());
    global().get_or_resolve(&key, || {
        debug!(dir = %start_dir.display(), file_name, "resolving local settings");
        let sources = search_ancestors(start_dir, file_name)?;
        Ok(resolve(&sources))
    })
}
