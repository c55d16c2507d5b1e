//! Translation from the shared config file plus CLI flags to a
//! `homewatch_core::ClientConfig`.

use std::time::Duration;

use homewatch_config::Config;
use homewatch_core::{ClientConfig, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file (missing is fine) with environment overrides.
pub fn load() -> Result<Config, CliError> {
    Ok(homewatch_config::load_config()?)
}

/// Resolve the runtime config: file, then env, then flags.
pub fn resolve(cfg: &Config, global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let mut client = cfg.to_client_config(global.url.as_deref())?;

    if global.insecure {
        client.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        client.timeout = Duration::from_secs(secs);
    }

    Ok(client)
}
