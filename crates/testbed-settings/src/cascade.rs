//! The settings cascade.
//!
//! Settings come from `testbed.local.properties` files found in a directory and
//! its ancestors. Each file may set any subset of the three known keys; for
//! each key independently, the first source (in caller order) that sets it
//! wins. Merging never fails. Malformed values only surface when a typed
//! accessor on [`ResolvedSettings`] is read, so a bad value in one field never
//! blocks the others.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::activation::{backend_from_setting, BackendSelection};
use crate::error::{ConfigError, ConfigErrorKind, DescriptorError, SettingsError};
use crate::properties::Properties;

/// File name searched for in each directory.
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "testbed.local.properties";

/// The settings known to the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Backend descriptor string.
    Backend,
    /// Whether client debug logging is enabled.
    DebugLogging,
    /// Seed for property-based test generation.
    RandomSeed,
}

impl SettingKey {
    /// Key in the settings file.
    pub fn property_name(&self) -> &'static str {
        match self {
            SettingKey::Backend => "firestore.backend",
            SettingKey::DebugLogging => "firestore.debugLogging",
            SettingKey::RandomSeed => "randomSeed",
        }
    }

    /// Name of the string resource carrying this setting to the test process.
    pub fn resource_name(&self) -> &'static str {
        match self {
            SettingKey::Backend => "firestoreBackend",
            SettingKey::DebugLogging => "firestoreDebugLogging",
            SettingKey::RandomSeed => "randomSeed",
        }
    }

    /// Environment variable consulted by [`crate::channel::EnvLookup`].
    pub fn env_var(&self) -> &'static str {
        match self {
            SettingKey::Backend => "TESTBED_FIRESTORE_BACKEND",
            SettingKey::DebugLogging => "TESTBED_FIRESTORE_DEBUG_LOGGING",
            SettingKey::RandomSeed => "TESTBED_RANDOM_SEED",
        }
    }

    /// Returns all keys.
    pub fn all() -> &'static [SettingKey] {
        &[
            SettingKey::Backend,
            SettingKey::DebugLogging,
            SettingKey::RandomSeed,
        ]
    }
}

/// One partial source of settings, typically one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettingsSource {
    /// Where the values came from; used only for diagnostics.
    pub origin: String,
    backend: Option<String>,
    debug_logging: Option<String>,
    random_seed: Option<String>,
}

impl RawSettingsSource {
    /// Creates a source that sets nothing.
    pub fn empty(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Sets a value, returning the updated source.
    pub fn with(mut self, key: SettingKey, value: impl Into<String>) -> Self {
        *self.slot(key) = Some(value.into());
        self
    }

    /// Returns the raw value for `key`, if this source sets it.
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        match key {
            SettingKey::Backend => self.backend.as_deref(),
            SettingKey::DebugLogging => self.debug_logging.as_deref(),
            SettingKey::RandomSeed => self.random_seed.as_deref(),
        }
    }

    /// Returns true if this source sets no key.
    pub fn is_empty(&self) -> bool {
        SettingKey::all().iter().all(|&key| self.get(key).is_none())
    }

    fn slot(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::Backend => &mut self.backend,
            SettingKey::DebugLogging => &mut self.debug_logging,
            SettingKey::RandomSeed => &mut self.random_seed,
        }
    }

    /// Extracts the known keys from parsed properties; others are ignored.
    pub fn from_properties(origin: impl Into<String>, properties: &Properties) -> Self {
        let mut source = Self::empty(origin);
        for &key in SettingKey::all() {
            *source.slot(key) = properties.get(key.property_name()).map(str::to_string);
        }
        source
    }

    /// Loads a settings file.
    ///
    /// A missing file is not an error and yields `Ok(None)`. Neither is a
    /// path that is not a regular file (a directory, or a path under one) or
    /// a file that may not be read; those are skipped with a warning. Other
    /// I/O failures on an existing file are returned.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        debug!(path = %path.display(), "loading settings file");
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "settings file not found; skipping it");
                return Ok(None);
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied || !path.is_file() => {
                warn!(path = %path.display(), error = %e, "settings file unreadable; skipping it");
                return Ok(None);
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let properties = Properties::parse(&String::from_utf8_lossy(&bytes));
        let source = Self::from_properties(path.display().to_string(), &properties);
        info!(
            path = %path.display(),
            backend = ?source.backend,
            debug_logging = ?source.debug_logging,
            random_seed = ?source.random_seed,
            "loaded settings file"
        );
        Ok(Some(source))
    }
}

/// Loads `file_name` from `start_dir` and each of its ancestors, innermost
/// first. Missing and unreadable files are skipped.
pub fn search_ancestors(
    start_dir: &Path,
    file_name: &str,
) -> Result<Vec<RawSettingsSource>, SettingsError> {
    let mut sources = Vec::new();
    for dir in start_dir.ancestors() {
        if let Some(source) = RawSettingsSource::load(&dir.join(file_name))? {
            sources.push(source);
        }
    }
    Ok(sources)
}

/// Merges sources in order; for each key the first source that sets it wins.
///
/// # Example
/// ```
/// use testbed_settings::{resolve, RawSettingsSource, SettingKey};
///
/// let inner = RawSettingsSource::empty("inner").with(SettingKey::Backend, "x");
/// let outer = RawSettingsSource::empty("outer")
///     .with(SettingKey::Backend, "y")
///     .with(SettingKey::RandomSeed, "42");
///
/// let settings = resolve([&inner, &outer]);
/// assert_eq!(settings.backend(), Some("x"));
/// assert_eq!(settings.random_seed().unwrap(), Some(42));
/// ```
pub fn resolve<'a>(sources: impl IntoIterator<Item = &'a RawSettingsSource>) -> ResolvedSettings {
    let mut resolved = ResolvedSettings::default();
    let mut count = 0usize;
    for source in sources {
        count += 1;
        for &key in SettingKey::all() {
            let slot = resolved.slot(key);
            if slot.is_none() {
                *slot = source.get(key).map(str::to_string);
            }
        }
    }

    info!(
        sources = count,
        backend = ?resolved.backend,
        debug_logging = ?resolved.debug_logging,
        random_seed = ?resolved.random_seed,
        "resolved settings"
    );
    resolved
}

/// The merged settings. Raw values are kept as found; typed accessors trim
/// them and treat an empty value as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSettings {
    backend: Option<String>,
    debug_logging: Option<String>,
    random_seed: Option<String>,
}

impl ResolvedSettings {
    /// Returns the raw, untrimmed value of `key`.
    pub fn raw(&self, key: SettingKey) -> Option<&str> {
        match key {
            SettingKey::Backend => self.backend.as_deref(),
            SettingKey::DebugLogging => self.debug_logging.as_deref(),
            SettingKey::RandomSeed => self.random_seed.as_deref(),
        }
    }

    fn slot(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::Backend => &mut self.backend,
            SettingKey::DebugLogging => &mut self.debug_logging,
            SettingKey::RandomSeed => &mut self.random_seed,
        }
    }

    fn trimmed(&self, key: SettingKey) -> Option<&str> {
        self.raw(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// The backend descriptor string.
    pub fn backend(&self) -> Option<&str> {
        self.trimmed(SettingKey::Backend)
    }

    /// Whether debug logging is enabled: `true` or `false`, case-insensitive.
    pub fn debug_logging(&self) -> Result<Option<bool>, ConfigError> {
        let Some(value) = self.trimmed(SettingKey::DebugLogging) else {
            return Ok(None);
        };
        if value.eq_ignore_ascii_case("true") {
            Ok(Some(true))
        } else if value.eq_ignore_ascii_case("false") {
            Ok(Some(false))
        } else {
            Err(ConfigError::new(
                ConfigErrorKind::InvalidBoolean,
                SettingKey::DebugLogging.property_name(),
                value,
            ))
        }
    }

    /// The configured random seed.
    pub fn random_seed(&self) -> Result<Option<i64>, ConfigError> {
        let Some(value) = self.trimmed(SettingKey::RandomSeed) else {
            return Ok(None);
        };
        value.parse().map(Some).map_err(|_| {
            ConfigError::new(
                ConfigErrorKind::InvalidInteger,
                SettingKey::RandomSeed.property_name(),
                value,
            )
        })
    }

    /// Parses the backend setting, defaulting to the emulator.
    pub fn backend_selection(&self) -> Result<BackendSelection, DescriptorError> {
        backend_from_setting(self.backend())
    }

    /// Reads every typed accessor, returning the first error.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.backend_selection()?;
        self.debug_logging()?;
        self.random_seed()?;
        Ok(())
    }
}
