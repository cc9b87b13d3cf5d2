//! Shared source loading for `resolve` and `export`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use testbed_settings::{search_ancestors, EnvLookup, RawSettingsSource};
use tracing::debug;

/// Origin recorded for the environment source.
pub const ENVIRONMENT_ORIGIN: &str = "environment";

/// Sources found for one invocation, innermost first.
pub struct LoadedSources {
    pub dir: PathBuf,
    pub sources: Vec<RawSettingsSource>,
}

impl LoadedSources {
    pub fn origins(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.origin.clone()).collect()
    }
}

/// Searches `dir` (default: the current directory) and its ancestors for
/// `file_name`. With `include_env`, environment variables take precedence
/// over every file.
pub fn load(dir: Option<&str>, file_name: &str, include_env: bool) -> Result<LoadedSources> {
    let dir = match dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let mut sources = Vec::new();
    if include_env {
        let env = RawSettingsSource::from_lookup(ENVIRONMENT_ORIGIN, &EnvLookup);
        if env.is_empty() {
            debug!("no settings in the environment");
        } else {
            sources.push(env);
        }
    }
    sources.extend(
        search_ancestors(&dir, file_name)
            .with_context(|| format!("Failed to load settings from {}", dir.display()))?,
    );

    for (index, source) in sources.iter().enumerate() {
        debug!(index, origin = %source.origin, "settings source");
    }

    Ok(LoadedSources { dir, sources })
}
