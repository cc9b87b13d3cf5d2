//! Error types for descriptor parsing and settings resolution.
//!
//! Every error message embeds the offending input and a stable error code.
//! The codes are opaque tokens: tests and log scrapers match on them instead
//! of on message wording.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Common trait for errors that carry a stable code.
///
/// Modeled after the per-backend error codes: every variant maps to a code
/// that never changes between releases, so that automated assertions can
/// pinpoint a failure without relying on the exact wording of the message.
pub trait CodedError: std::error::Error {
    /// Returns the stable error code (e.g. "byvy24fapz").
    fn code(&self) -> &'static str;

    /// Returns the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

/// The ways a backend descriptor string can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorErrorKind {
    /// The value is not a syntactically valid URI.
    InvalidUri,
    /// The value uses the `emulator:` scheme but its authority is malformed.
    InvalidEmulatorUri,
    /// The value is a URI but cannot be interpreted as a URL.
    InvalidUrl,
    /// The URL protocol is neither `http` nor `https`.
    UnsupportedProtocol,
    /// The URL specifies neither a host nor a port.
    MissingHostAndPort,
}

impl DescriptorErrorKind {
    /// Returns the stable error code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            DescriptorErrorKind::InvalidUri => "vhfwpfwjac",
            DescriptorErrorKind::InvalidEmulatorUri => "hfs4cwv7bs",
            DescriptorErrorKind::InvalidUrl => "tcc54n4h9n",
            DescriptorErrorKind::UnsupportedProtocol => "byvy24fapz",
            DescriptorErrorKind::MissingHostAndPort => "jzh9kbyhaf",
        }
    }

    /// Returns all descriptor error kinds.
    pub fn all() -> &'static [DescriptorErrorKind] {
        &[
            DescriptorErrorKind::InvalidUri,
            DescriptorErrorKind::InvalidEmulatorUri,
            DescriptorErrorKind::InvalidUrl,
            DescriptorErrorKind::UnsupportedProtocol,
            DescriptorErrorKind::MissingHostAndPort,
        ]
    }
}

impl fmt::Display for DescriptorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A malformed backend descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorError {
    /// What went wrong.
    pub kind: DescriptorErrorKind,
    /// The offending descriptor, verbatim.
    pub input: String,
    /// Short human-readable cause, if the parser produced one.
    pub cause: Option<String>,
}

impl DescriptorError {
    /// Creates a new descriptor error without a cause.
    pub fn new(kind: DescriptorErrorKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
            cause: None,
        }
    }

    /// Creates a new descriptor error with a cause.
    pub fn with_cause(
        kind: DescriptorErrorKind,
        input: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            input: input.into(),
            cause: Some(cause.into()),
        }
    }
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = self.cause.as_deref().unwrap_or("no further details");
        match self.kind {
            DescriptorErrorKind::InvalidUri => write!(
                f,
                "value cannot be parsed as a URI: {} ({})",
                self.input, cause
            )?,
            DescriptorErrorKind::InvalidEmulatorUri => {
                write!(f, "invalid emulator URI: {} ({})", self.input, cause)?
            }
            DescriptorErrorKind::InvalidUrl => write!(
                f,
                "value cannot be parsed as a URL: {} ({})",
                self.input, cause
            )?,
            DescriptorErrorKind::UnsupportedProtocol => write!(
                f,
                "value {} has an unsupported protocol: {} \
                 (supported protocols are \"http\" and \"https\")",
                self.input, cause
            )?,
            DescriptorErrorKind::MissingHostAndPort => {
                write!(f, "value must specify host and/or port: {}", self.input)?
            }
        }
        write!(f, " (error code {})", self.kind.code())
    }
}

impl std::error::Error for DescriptorError {}

impl CodedError for DescriptorError {
    fn code(&self) -> &'static str {
        self.kind.code()
    }

    fn category(&self) -> &'static str {
        "descriptor"
    }
}

/// The ways a present settings value can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    /// Not `true`, `false`, or empty (case-insensitive).
    InvalidBoolean,
    /// Not a signed 64-bit decimal integer.
    InvalidInteger,
}

impl ConfigErrorKind {
    /// Returns the stable error code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigErrorKind::InvalidBoolean => "8psktp7z3q",
            ConfigErrorKind::InvalidInteger => "czxrnfyzja",
        }
    }
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A malformed scalar in an otherwise well-formed settings source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// What went wrong.
    pub kind: ConfigErrorKind,
    /// The settings key being read (e.g. "firestore.debugLogging").
    pub key: &'static str,
    /// The offending value, after trimming.
    pub value: String,
}

impl ConfigError {
    /// Creates a new config error.
    pub fn new(kind: ConfigErrorKind, key: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            key,
            value: value.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConfigErrorKind::InvalidBoolean => write!(
                f,
                "unable to parse boolean value of {}: {} \
                 (must be either \"true\", \"false\", or empty, case-insensitive)",
                self.key, self.value
            )?,
            ConfigErrorKind::InvalidInteger => write!(
                f,
                "unable to parse integer value of {}: {} (must be a signed 64-bit integer)",
                self.key, self.value
            )?,
        }
        write!(f, " (error code {})", self.kind.code())
    }
}

impl std::error::Error for ConfigError {}

impl CodedError for ConfigError {
    fn code(&self) -> &'static str {
        self.kind.code()
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// Top-level error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings file exists but could not be read.
    #[error("unable to read settings file {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backend descriptor is malformed.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// A settings value is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CodedError for SettingsError {
    fn code(&self) -> &'static str {
        match self {
            SettingsError::Io { .. } => "settings_io",
            SettingsError::Descriptor(e) => e.code(),
            SettingsError::Config(e) => e.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            SettingsError::Io { .. } => "io",
            SettingsError::Descriptor(e) => e.category(),
            SettingsError::Config(e) => e.category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_descriptor_codes_are_unique() {
        let codes: HashSet<_> = DescriptorErrorKind::all().iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), DescriptorErrorKind::all().len());
    }

    #[test]
    fn test_descriptor_error_message_embeds_input_and_code() {
        let err = DescriptorError::new(DescriptorErrorKind::MissingHostAndPort, "http://?a=42");
        let msg = err.to_string();
        assert!(msg.contains("http://?a=42"));
        assert!(msg.contains("jzh9kbyhaf"));
        assert!(msg.ends_with(')'));
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::new(ConfigErrorKind::InvalidBoolean, "firestore.debugLogging", "yes");
        let msg = err.to_string();
        assert!(msg.contains("yes"));
        assert!(msg.contains("firestore.debugLogging"));
        assert!(msg.contains("8psktp7z3q"));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_settings_error_forwards_code() {
        let err: SettingsError =
            ConfigError::new(ConfigErrorKind::InvalidInteger, "randomSeed", "12x").into();
        assert_eq!(err.code(), "czxrnfyzja");
        assert_eq!(err.category(), "config");
    }
}
