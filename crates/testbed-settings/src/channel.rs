//! The channel that carries resolved settings into the test process.
//!
//! The build side resolves the cascade and writes one named string entry per
//! setting; the test process reads them back through a [`SettingsLookup`].
//! The store itself is opaque: a resource table, a map, or the environment.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::cascade::{RawSettingsSource, ResolvedSettings, SettingKey};

/// A read-only string key/value store.
pub trait SettingsLookup {
    /// Returns the value stored under `name`, if any.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl SettingsLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl SettingsLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Reads settings from `TESTBED_*` environment variables.
///
/// Resource names are mapped to variables via [`SettingKey::env_var`];
/// unknown names are never found.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLookup;

impl SettingsLookup for EnvLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        let key = SettingKey::all()
            .iter()
            .find(|key| key.resource_name() == name)?;
        std::env::var(key.env_var()).ok()
    }
}

/// One named string entry written to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Resource name, e.g. `firestoreBackend`.
    pub name: String,
    /// Trimmed value; empty when the setting is absent.
    pub value: String,
}

impl RawSettingsSource {
    /// Reads the three named resources back into a source.
    pub fn from_lookup(origin: impl Into<String>, lookup: &dyn SettingsLookup) -> Self {
        SettingKey::all()
            .iter()
            .fold(RawSettingsSource::empty(origin), |source, &key| {
                match lookup.lookup(key.resource_name()) {
                    Some(value) => source.with(key, value),
                    None => source,
                }
            })
    }
}

impl ResolvedSettings {
    /// Produces the entries to write to the channel, one per setting.
    pub fn to_resources(&self) -> Vec<ResourceEntry> {
        SettingKey::all()
            .iter()
            .map(|&key| ResourceEntry {
                name: key.resource_name().to_string(),
                value: self.raw(key).map(str::trim).unwrap_or("").to_string(),
            })
            .collect()
    }
}
