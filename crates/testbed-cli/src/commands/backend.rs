//! Backend command implementation
//!
//! Parses a single descriptor and shows the connection parameters it
//! activates.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use testbed_settings::{activate, BackendDescriptor};

use super::json_output::{print_json, BackendOutput, JsonError};

/// Run the backend command
///
/// # Returns
/// Exit code: 0 if the descriptor is valid, 1 otherwise
pub fn run(descriptor: &str, json_output: bool) -> Result<ExitCode> {
    let output = evaluate(descriptor);

    if json_output {
        print_json(&output)?;
    } else {
        print_human(&output);
    }

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Parses and activates `descriptor`.
///
/// An empty descriptor is valid and activates the emulator defaults.
pub fn evaluate(descriptor: &str) -> BackendOutput {
    match BackendDescriptor::parse(Some(descriptor)) {
        Ok(parsed) => BackendOutput {
            success: true,
            input: descriptor.to_string(),
            kind: parsed.as_ref().map(|d| d.kind_str().to_string()),
            backend: parsed.as_ref().map(|d| d.to_string()),
            connection: Some(activate(parsed.as_ref())),
            errors: vec![],
        },
        Err(e) => BackendOutput {
            success: false,
            input: descriptor.to_string(),
            kind: None,
            backend: None,
            connection: None,
            errors: vec![JsonError::from_coded(&e)],
        },
    }
}

fn print_human(output: &BackendOutput) {
    println!("{} {:?}", "Descriptor:".cyan().bold(), output.input);

    if let Some(connection) = &output.connection {
        let backend = output
            .backend
            .clone()
            .unwrap_or_else(|| "(none, emulator default)".to_string());
        println!("  {:<16} {}", "backend".dimmed(), backend);
        println!("  {:<16} {}", "endpoint".dimmed(), connection.endpoint());
        println!("  {:<16} {}", "use_emulator".dimmed(), connection.use_emulator);
        if let Some(host) = &connection.host_override {
            println!("  {:<16} {}", "host_override".dimmed(), host);
        }
        if let Some(tls) = connection.tls_enabled {
            println!("  {:<16} {}", "tls_enabled".dimmed(), tls);
        }
        println!("\n{} Descriptor is valid", "SUCCESS".green().bold());
    } else {
        for error in &output.errors {
            println!("  {} [{}] {}", "x".red(), error.code, error.message);
        }
        println!("\n{} Descriptor is invalid", "FAILED".red().bold());
    }
}
