//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `resolve`, `export`, `backend`, and
//! `seed`. Error entries carry the same stable codes the libraries embed in
//! their messages.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use testbed_settings::{CodedError, ConnectionParameters, ResolvedSettings, ResourceEntry};

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "byvy24fapz")
    pub code: String,
    /// Error category (e.g. "descriptor", "config")
    pub category: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Converts any coded library error.
    pub fn from_coded<E: CodedError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
        }
    }
}

/// Output of `resolve --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolveOutput {
    /// Whether every setting was valid.
    pub success: bool,
    /// Origins of the sources, innermost first.
    pub sources: Vec<String>,
    /// Raw merged values.
    pub settings: ResolvedSettings,
    /// The selected backend, if the descriptor was valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Connection parameters for the selected backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionParameters>,
    /// Typed debug-logging value, if set and valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_logging: Option<bool>,
    /// Typed random seed, if set and valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<i64>,
    /// Errors for each invalid setting.
    pub errors: Vec<JsonError>,
}

/// Output of `export --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportOutput {
    pub sources: Vec<String>,
    pub resources: Vec<ResourceEntry>,
}

/// Output of `backend --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendOutput {
    pub success: bool,
    /// The descriptor as given on the command line.
    pub input: String,
    /// Descriptor kind (`production`, `staging`, `nightly`, `custom`, `emulator`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionParameters>,
    pub errors: Vec<JsonError>,
}

/// Output of `seed --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedOutput {
    pub seed: i64,
    /// `configured` or `generated`
    pub provenance: String,
    pub draws: Vec<u64>,
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testbed_settings::{BackendDescriptor, DescriptorErrorKind};

    #[test]
    fn test_json_error_from_descriptor_error() {
        let err = BackendDescriptor::parse(Some("ftp://abc:123")).unwrap_err();
        let json = JsonError::from_coded(&err);
        assert_eq!(json.code, DescriptorErrorKind::UnsupportedProtocol.code());
        assert_eq!(json.category, err.category());
        assert!(json.message.contains("ftp://abc:123"));
    }

    #[test]
    fn test_backend_output_omits_absent_fields() {
        let output = BackendOutput {
            success: false,
            input: "bogus".into(),
            kind: None,
            backend: None,
            connection: None,
            errors: vec![],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("kind").is_none());
        assert!(json.get("connection").is_none());
        assert_eq!(json["input"], "bogus");
    }
}
