//! Backend descriptors and their string grammar.
//!
//! A backend descriptor names the server that test traffic is sent to:
//!
//! ```text
//! prod | staging | nightly | emulator
//! emulator:[host][:port]
//! http://host[:port]
//! https://host[:port]
//! ```

mod uri;


use std::fmt;

use crate::error::{DescriptorError, DescriptorErrorKind};

/// Host of the staging backend, also known as "QA".
pub const STAGING_HOST: &str = "staging-firestore.sandbox.googleapis.com";

/// Host of the nightly backend.
pub const NIGHTLY_HOST: &str = "test-firestore.sandbox.googleapis.com";

/// The scheme that selects emulator-URI mode.
const EMULATOR_SCHEME: &str = "emulator";

/// The backends against which integration tests can run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendDescriptor {
    /// The production server, which is used by customers.
    Production,
    /// The staging server.
    Staging,
    /// The nightly server.
    Nightly,
    /// A custom server.
    Custom {
        /// `host`, `host:port` or `:port`; never empty.
        host: String,
        /// Whether to connect with TLS.
        tls_enabled: bool,
    },
    /// A locally-hosted emulator.
    Emulator {
        /// Emulator host; the activation default applies when absent.
        host: Option<String>,
        /// Emulator port; the activation default applies when absent.
        port: Option<u16>,
    },
}

impl BackendDescriptor {
    /// The emulator with default host and port.
    pub fn emulator() -> Self {
        BackendDescriptor::Emulator {
            host: None,
            port: None,
        }
    }

    /// Returns the variant name.
    pub fn kind_str(&self) -> &'static str {
        match self {
            BackendDescriptor::Production => "production",
            BackendDescriptor::Staging => "staging",
            BackendDescriptor::Nightly => "nightly",
            BackendDescriptor::Custom { .. } => "custom",
            BackendDescriptor::Emulator { .. } => "emulator",
        }
    }

    /// Parses a backend descriptor.
    ///
    /// Returns `Ok(None)` for a missing or empty descriptor, leaving the
    /// choice of default to the caller.
    ///
    /// # Example
    /// ```
    /// use testbed_settings::BackendDescriptor;
    ///
    /// let backend = BackendDescriptor::parse(Some("http://a.b.c:9987")).unwrap();
    /// assert_eq!(
    ///     backend,
    ///     Some(BackendDescriptor::Custom {
    ///         host: "a.b.c:9987".to_string(),
    ///         tls_enabled: false,
    ///     })
    /// );
    /// assert_eq!(BackendDescriptor::parse(Some("")).unwrap(), None);
    /// ```
    pub fn parse(descriptor: Option<&str>) -> Result<Option<Self>, DescriptorError> {
        let descriptor = match descriptor {
            None | Some("") => return Ok(None),
            Some(d) => d,
        };

        match descriptor {
            "prod" => return Ok(Some(BackendDescriptor::Production)),
            "staging" => return Ok(Some(BackendDescriptor::Staging)),
            "nightly" => return Ok(Some(BackendDescriptor::Nightly)),
            "emulator" => return Ok(Some(BackendDescriptor::emulator())),
            _ => {}
        }

        let parts = uri::split_uri(descriptor).map_err(|cause| {
            DescriptorError::with_cause(DescriptorErrorKind::InvalidUri, descriptor, cause)
        })?;

        if parts.scheme == Some(EMULATOR_SCHEME) {
            return parse_emulator(descriptor, parts.scheme_specific_part).map(Some);
        }

        let protocol = parts.scheme.ok_or_else(|| {
            DescriptorError::with_cause(DescriptorErrorKind::InvalidUrl, descriptor, "no protocol")
        })?;

        let host_port = match parts.authority {
            Some(authority) => uri::parse_authority(authority).map_err(|cause| {
                DescriptorError::with_cause(DescriptorErrorKind::InvalidUrl, descriptor, cause)
            })?,
            None => uri::HostPort::default(),
        };

        let tls_enabled = if protocol.eq_ignore_ascii_case("http") {
            false
        } else if protocol.eq_ignore_ascii_case("https") {
            true
        } else {
            return Err(DescriptorError::with_cause(
                DescriptorErrorKind::UnsupportedProtocol,
                descriptor,
                protocol,
            ));
        };

        let host = match (host_port.host, host_port.port) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host,
            (None, Some(port)) => format!(":{}", port),
            (None, None) => {
                return Err(DescriptorError::new(
                    DescriptorErrorKind::MissingHostAndPort,
                    descriptor,
                ))
            }
        };

        Ok(Some(BackendDescriptor::Custom { host, tls_enabled }))
    }
}

/// Parses the part of an `emulator:` URI after the scheme as `host[:port]`.
fn parse_emulator(
    descriptor: &str,
    scheme_specific_part: &str,
) -> Result<BackendDescriptor, DescriptorError> {
    let rest = scheme_specific_part
        .strip_prefix("//")
        .unwrap_or(scheme_specific_part);
    let authority = match rest.find(['/', '?', '#']) {
        Some(idx) => &rest[..idx],
        None => rest,
    };

    let host_port = uri::parse_authority(authority).map_err(|cause| {
        DescriptorError::with_cause(DescriptorErrorKind::InvalidEmulatorUri, descriptor, cause)
    })?;

    Ok(BackendDescriptor::Emulator {
        host: host_port.host,
        port: host_port.port,
    })
}

impl fmt::Display for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendDescriptor::Production => write!(f, "Backend::Production"),
            BackendDescriptor::Staging => write!(f, "Backend::Staging({})", STAGING_HOST),
            BackendDescriptor::Nightly => write!(f, "Backend::Nightly({})", NIGHTLY_HOST),
            BackendDescriptor::Custom { host, tls_enabled } => write!(
                f,
                "Backend::Custom(host={}, tls_enabled={})",
                host, tls_enabled
            ),
            BackendDescriptor::Emulator { host, port } => {
                write!(f, "Backend::Emulator(host={:?}, port={:?})", host, port)
            }
        }
    }
}
