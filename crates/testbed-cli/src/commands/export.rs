//! Export command implementation
//!
//! Prints the resolved settings as the named string resources handed to the
//! test process.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use testbed_settings::{resolve, ResourceEntry};

use super::json_output::{print_json, ExportOutput};
use super::sources;

/// Run the export command
///
/// Values are exported as found; nothing is validated here.
pub fn run(
    dir: Option<&str>,
    file_name: &str,
    include_env: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let loaded = sources::load(dir, file_name, include_env)?;
    let resources = resolve(&loaded.sources).to_resources();

    if json_output {
        print_json(&ExportOutput {
            sources: loaded.origins(),
            resources,
        })?;
    } else {
        for origin in loaded.origins() {
            eprintln!("{} {}", "source".dimmed(), origin);
        }
        for line in format_entries(&resources) {
            println!("{}", line);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Formats entries as `name=value` lines.
pub fn format_entries(resources: &[ResourceEntry]) -> Vec<String> {
    resources
        .iter()
        .map(|entry| format!("{}={}", entry.name, entry.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testbed_settings::{RawSettingsSource, SettingKey};

    #[test]
    fn test_format_entries() {
        let source = RawSettingsSource::empty("t")
            .with(SettingKey::Backend, " nightly ")
            .with(SettingKey::RandomSeed, "7");
        let lines = format_entries(&resolve([&source]).to_resources());
        assert_eq!(
            lines,
            vec![
                "firestoreBackend=nightly".to_string(),
                "firestoreDebugLogging=".to_string(),
                "randomSeed=7".to_string(),
            ]
        );
    }
}
