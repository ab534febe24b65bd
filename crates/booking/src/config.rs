//! CLI configuration: thin wrapper around `booking_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --insecure, --timeout).

use std::time::Duration;

use booking_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use booking_config::{
    Config, ConfigError, Profile, config_path, load_config_or_default, save_config,
};

/// Comma-separated profile names, for help text.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build a `ClientConfig` from the config file, the active profile and
/// CLI overrides. Flags take priority over profile values.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();

    let (_, profile) = booking_config::resolve_profile(&cfg, global.profile.as_deref()).map_err(
        |err| match err {
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(&cfg),
            },
            other => other.into(),
        },
    )?;

    let mut client = booking_config::profile_to_client_config(&profile, &cfg.defaults)?;

    if let Some(ref url_str) = global.base_url {
        client.base_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    Ok(client)
}
