// TLS mode and request deadline for the HTTP client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// TLS verification mode for HTTPS backends.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed hubs on the LAN).
    DangerAcceptInvalid,
}

/// `timeout` is the only request deadline in the stack: pollers and
/// submitters never cancel an in-flight request themselves.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// One client per process; every endpoint shares its connection pool.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("homewatch/", env!("CARGO_PKG_VERSION")));

        let builder = match &self.tls {
            TlsMode::System => builder,
            TlsMode::CustomCa(path) => builder.add_root_certificate(load_ca(path)?),
            TlsMode::DangerAcceptInvalid => builder.danger_accept_invalid_certs(true),
        };
        builder
            .build()
            .map_err(|e| Error::Tls(format!("cannot build HTTP client: {e}")))
    }
}

fn load_ca(path: &Path) -> Result<reqwest::Certificate, Error> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::Tls(format!("cannot read CA file {}: {e}", path.display())))?;
    reqwest::Certificate::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("{} is not a PEM certificate: {e}", path.display())))
}
