//! Resolve command implementation
//!
//! Runs the settings cascade for a directory and reports the merged values
//! together with the connection parameters they activate.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use testbed_settings::{resolve, ResolvedSettings, SettingKey};

use super::json_output::{print_json, JsonError, ResolveOutput};
use super::sources;

/// Run the resolve command
///
/// # Arguments
/// * `dir` - Directory to start the search from (default: current directory)
/// * `file_name` - Settings file name to look for
/// * `include_env` - Whether environment variables override the files
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every setting is valid, 1 otherwise
pub fn run(
    dir: Option<&str>,
    file_name: &str,
    include_env: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let loaded = sources::load(dir, file_name, include_env)?;
    let settings = resolve(&loaded.sources);
    let output = evaluate(loaded.origins(), settings);

    if json_output {
        print_json(&output)?;
    } else {
        print_human(&loaded.dir.display().to_string(), &output);
    }

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Reads every typed accessor of `settings`, collecting values and errors.
pub fn evaluate(sources: Vec<String>, settings: ResolvedSettings) -> ResolveOutput {
    let mut errors = Vec::new();

    let (backend, connection) = match settings.backend_selection() {
        Ok(selection) => (
            Some(selection.backend.to_string()),
            Some(selection.connection_parameters()),
        ),
        Err(e) => {
            errors.push(JsonError::from_coded(&e));
            (None, None)
        }
    };
    let debug_logging = settings.debug_logging().unwrap_or_else(|e| {
        errors.push(JsonError::from_coded(&e));
        None
    });
    let random_seed = settings.random_seed().unwrap_or_else(|e| {
        errors.push(JsonError::from_coded(&e));
        None
    });

    ResolveOutput {
        success: errors.is_empty(),
        sources,
        settings,
        backend,
        connection,
        debug_logging,
        random_seed,
        errors,
    }
}

fn print_human(dir: &str, output: &ResolveOutput) {
    println!("{} {}", "Resolving:".cyan().bold(), dir);
    if output.sources.is_empty() {
        println!("  {}", "no settings files found".dimmed());
    }
    for origin in &output.sources {
        println!("  {} {}", "source".dimmed(), origin);
    }

    println!("\n{}", "Settings:".cyan().bold());
    for &key in SettingKey::all() {
        let value = match output.settings.raw(key) {
            Some(value) => value.to_string(),
            None => "(unset)".dimmed().to_string(),
        };
        println!("  {:<24} {}", key.property_name(), value);
    }

    if let (Some(backend), Some(connection)) = (&output.backend, &output.connection) {
        println!("\n{} {}", "Backend:".cyan().bold(), backend);
        println!("  {} {}", "endpoint".dimmed(), connection.endpoint());
    }

    if output.errors.is_empty() {
        println!("\n{} Settings are valid", "SUCCESS".green().bold());
    } else {
        println!();
        for error in &output.errors {
            println!("  {} [{}] {}", "x".red(), error.code, error.message);
        }
        println!(
            "\n{} {} invalid setting(s)",
            "FAILED".red().bold(),
            output.errors.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testbed_settings::{ConfigErrorKind, DescriptorErrorKind, RawSettingsSource};

    fn settings(pairs: &[(SettingKey, &str)]) -> ResolvedSettings {
        let source = pairs
            .iter()
            .fold(RawSettingsSource::empty("test"), |s, &(k, v)| s.with(k, v));
        resolve([&source])
    }

    #[test]
    fn test_empty_settings_select_emulator() {
        let output = evaluate(vec![], settings(&[]));
        assert!(output.success);
        assert_eq!(
            output.backend.as_deref(),
            Some("Backend::Emulator(host=None, port=None)")
        );
        let connection = output.connection.unwrap();
        assert!(connection.use_emulator);
        assert_eq!(connection.emulator_port, 8080);
        assert_eq!(output.debug_logging, None);
        assert_eq!(output.random_seed, None);
    }

    #[test]
    fn test_valid_settings() {
        let output = evaluate(
            vec!["a".into()],
            settings(&[
                (SettingKey::Backend, "https://a.b.c"),
                (SettingKey::DebugLogging, "TRUE"),
                (SettingKey::RandomSeed, "-12"),
            ]),
        );
        assert!(output.success);
        assert_eq!(output.sources, vec!["a".to_string()]);
        assert_eq!(
            output.connection.unwrap().host_override.as_deref(),
            Some("a.b.c")
        );
        assert_eq!(output.debug_logging, Some(true));
        assert_eq!(output.random_seed, Some(-12));
    }

    #[test]
    fn test_every_invalid_setting_is_reported() {
        let output = evaluate(
            vec![],
            settings(&[
                (SettingKey::Backend, "ftp://abc:123"),
                (SettingKey::DebugLogging, "yes"),
                (SettingKey::RandomSeed, "1.5"),
            ]),
        );
        assert!(!output.success);
        let codes: Vec<&str> = output.errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                DescriptorErrorKind::UnsupportedProtocol.code(),
                ConfigErrorKind::InvalidBoolean.code(),
                ConfigErrorKind::InvalidInteger.code(),
            ]
        );
        assert!(output.backend.is_none());
        assert!(output.connection.is_none());
    }
}
