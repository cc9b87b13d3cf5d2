//! Testbed settings library.
//!
//! This crate turns ambient, possibly absent, possibly conflicting
//! configuration sources into the runtime decisions an integration-test
//! session needs:
//!
//! - which backend to send test traffic to ([`BackendDescriptor`],
//!   [`ConnectionParameters`])
//! - whether client debug logging is enabled
//! - which seed drives property-based test generation
//!
//! # Example
//!
//! ```
//! use testbed_settings::{activate, resolve, BackendDescriptor, RawSettingsSource, SettingKey};
//!
//! let project = RawSettingsSource::empty("project").with(SettingKey::Backend, "emulator::9987");
//! let root = RawSettingsSource::empty("root")
//!     .with(SettingKey::Backend, "prod")
//!     .with(SettingKey::DebugLogging, "true");
//!
//! let settings = resolve([&project, &root]);
//! assert_eq!(settings.debug_logging().unwrap(), Some(true));
//!
//! let backend = BackendDescriptor::parse(settings.backend()).unwrap();
//! let params = activate(backend.as_ref());
//! assert!(params.use_emulator);
//! assert_eq!(params.emulator_port, 9987);
//! ```
//!
//! # Modules
//!
//! - [`backend`]: Backend descriptor type and string grammar
//! - [`activation`]: Mapping descriptors to connection parameters
//! - [`properties`]: Property-file reader
//! - [`cascade`]: Settings sources, the merge, and typed accessors
//! - [`channel`]: Named string entries carrying settings to the test process
//! - [`cache`]: Process-wide cache of resolved settings
//! - [`debug_logging`]: Applying and restoring the debug-logging switch
//! - [`error`]: Error types and stable error codes

pub mod activation;
pub mod backend;
pub mod cache;
pub mod cascade;
pub mod channel;
pub mod debug_logging;
pub mod error;
pub mod properties;

pub use activation::{
    activate, backend_from_setting, BackendSelection, ConnectionParameters,
    DEFAULT_EMULATOR_HOST, DEFAULT_EMULATOR_PORT,
};
pub use backend::{BackendDescriptor, NIGHTLY_HOST, STAGING_HOST};
pub use cache::{local_settings, SettingsCache};
pub use cascade::{
    resolve, search_ancestors, RawSettingsSource, ResolvedSettings, SettingKey,
    DEFAULT_SETTINGS_FILE_NAME,
};
pub use channel::{EnvLookup, ResourceEntry, SettingsLookup};
pub use debug_logging::{apply_debug_logging, AppliedDebugLogging, DebugLoggingSink};
pub use error::{
    CodedError, ConfigError, ConfigErrorKind, DescriptorError, DescriptorErrorKind,
    SettingsError,
};
pub use properties::Properties;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every valid descriptor maps to the parameters its variant promises.
    #[test]
    fn test_parse_then_activate() {
        let cases: &[(&str, ConnectionParameters)] = &[
            (
                "prod",
                ConnectionParameters {
                    host_override: None,
                    tls_enabled: None,
                    use_emulator: false,
                    emulator_host: "10.0.2.2".into(),
                    emulator_port: 8080,
                },
            ),
            (
                "staging",
                ConnectionParameters {
                    host_override: Some(STAGING_HOST.into()),
                    tls_enabled: None,
                    use_emulator: false,
                    emulator_host: "10.0.2.2".into(),
                    emulator_port: 8080,
                },
            ),
            (
                "emulator:a.b.c",
                ConnectionParameters {
                    host_override: None,
                    tls_enabled: None,
                    use_emulator: true,
                    emulator_host: "a.b.c".into(),
                    emulator_port: 8080,
                },
            ),
            (
                "https://a.b.c",
                ConnectionParameters {
                    host_override: Some("a.b.c".into()),
                    tls_enabled: Some(true),
                    use_emulator: false,
                    emulator_host: "10.0.2.2".into(),
                    emulator_port: 8080,
                },
            ),
        ];

        for (descriptor, expected) in cases {
            let backend = BackendDescriptor::parse(Some(*descriptor)).unwrap();
            assert_eq!(&activate(backend.as_ref()), expected, "descriptor {}", descriptor);
        }
    }

    #[test]
    fn test_bad_value_in_one_field_does_not_block_others() {
        let src = RawSettingsSource::empty("t")
            .with(SettingKey::Backend, "nightly")
            .with(SettingKey::DebugLogging, "maybe")
            .with(SettingKey::RandomSeed, "99");
        let settings = resolve([&src]);
        assert!(settings.debug_logging().is_err());
        assert_eq!(settings.random_seed(), Ok(Some(99)));
        assert_eq!(
            settings.backend_selection().unwrap().backend,
            BackendDescriptor::Nightly
        );
    }
}
