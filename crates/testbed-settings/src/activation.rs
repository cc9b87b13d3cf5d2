//! Backend activation: turning a backend descriptor into connection parameters.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::{BackendDescriptor, NIGHTLY_HOST, STAGING_HOST};
use crate::error::DescriptorError;

/// Emulator host used when the descriptor does not name one.
///
/// This is the address of the host machine as seen from an Android emulator.
pub const DEFAULT_EMULATOR_HOST: &str = "10.0.2.2";

/// Emulator port used when the descriptor does not name one.
pub const DEFAULT_EMULATOR_PORT: u16 = 8080;

/// Fully-resolved parameters for constructing a client.
///
/// The client-construction collaborator applies these exactly once and never
/// mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParameters {
    /// Host to connect to instead of the default production host.
    pub host_override: Option<String>,
    /// Explicit TLS setting; `None` keeps the client default (secure).
    pub tls_enabled: Option<bool>,
    /// Whether to route traffic to the emulator.
    pub use_emulator: bool,
    /// Emulator host; only meaningful when `use_emulator` is set.
    pub emulator_host: String,
    /// Emulator port; only meaningful when `use_emulator` is set.
    pub emulator_port: u16,
}

impl ConnectionParameters {
    fn ambient() -> Self {
        Self {
            host_override: None,
            tls_enabled: None,
            use_emulator: false,
            emulator_host: DEFAULT_EMULATOR_HOST.to_string(),
            emulator_port: DEFAULT_EMULATOR_PORT,
        }
    }

    fn host(host: impl Into<String>, tls_enabled: Option<bool>) -> Self {
        Self {
            host_override: Some(host.into()),
            tls_enabled,
            ..Self::ambient()
        }
    }

    /// Returns the endpoint traffic is sent to, for diagnostics.
    pub fn endpoint(&self) -> String {
        if self.use_emulator {
            format!("{}:{} (emulator)", self.emulator_host, self.emulator_port)
        } else {
            match &self.host_override {
                Some(host) => host.clone(),
                None => "default".to_string(),
            }
        }
    }
}

/// Maps a backend descriptor to connection parameters.
///
/// A missing descriptor means the emulator with default host and port.
pub fn activate(descriptor: Option<&BackendDescriptor>) -> ConnectionParameters {
    let params = match descriptor {
        None => emulator_parameters(None, None),
        Some(BackendDescriptor::Emulator { host, port }) => {
            emulator_parameters(host.as_deref(), *port)
        }
        Some(BackendDescriptor::Production) => ConnectionParameters::ambient(),
        Some(BackendDescriptor::Staging) => ConnectionParameters::host(STAGING_HOST, None),
        Some(BackendDescriptor::Nightly) => ConnectionParameters::host(NIGHTLY_HOST, None),
        Some(BackendDescriptor::Custom { host, tls_enabled }) => {
            ConnectionParameters::host(host.clone(), Some(*tls_enabled))
        }
    };

    info!(
        backend = %descriptor.map_or_else(|| "none".to_string(), |d| d.to_string()),
        endpoint = %params.endpoint(),
        "activated backend"
    );
    params
}

fn emulator_parameters(host: Option<&str>, port: Option<u16>) -> ConnectionParameters {
    ConnectionParameters {
        use_emulator: true,
        emulator_host: host.unwrap_or(DEFAULT_EMULATOR_HOST).to_string(),
        emulator_port: port.unwrap_or(DEFAULT_EMULATOR_PORT),
        ..ConnectionParameters::ambient()
    }
}

/// A backend chosen from a configured setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSelection {
    /// The backend in effect, after applying the emulator default.
    pub backend: BackendDescriptor,
    /// The configured descriptor string, if any.
    pub configured: Option<String>,
}

impl BackendSelection {
    /// Returns the connection parameters for the selected backend.
    pub fn connection_parameters(&self) -> ConnectionParameters {
        activate(Some(&self.backend))
    }
}

/// Parses a configured backend setting, defaulting to the emulator.
pub fn backend_from_setting(setting: Option<&str>) -> Result<BackendSelection, DescriptorError> {
    let backend = BackendDescriptor::parse(setting)?.unwrap_or_else(BackendDescriptor::emulator);
    info!(
        backend = %backend,
        configured = setting.unwrap_or(""),
        "selected backend"
    );
    Ok(BackendSelection {
        backend,
        configured: setting.map(str::to_string),
    })
}
