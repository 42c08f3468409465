//! Issuer configuration loader
//!
//! Loads issuer connection settings from environment variables.
//!
//! ## Environment Variables
//! - `CREDSYNC_API_KEY`: issuer API key (required, must be non-blank)
//! - `CREDSYNC_API_ENV`: `production`/`prod` or `test` (defaults to `test`)

use credsync_domain::{CredSyncError, IssuerConfig, IssuerEnvironment, Result};

/// Load issuer configuration from the process environment.
///
/// # Errors
/// Returns `CredSyncError::Config` if the API key is missing or blank,
/// or if the environment name is not recognized.
pub fn load_issuer_config() -> Result<IssuerConfig> {
    let api_key = std::env::var("CREDSYNC_API_KEY")
        .map_err(|_| CredSyncError::Config("CREDSYNC_API_KEY is not set".into()))?;
    if api_key.trim().is_empty() {
        return Err(CredSyncError::Config("CREDSYNC_API_KEY is blank".into()));
    }

    let environment = match std::env::var("CREDSYNC_API_ENV") {
        Ok(value) => parse_environment(&value)?,
        Err(_) => IssuerEnvironment::Test,
    };

    tracing::info!(?environment, "Issuer configuration loaded from environment");
    Ok(IssuerConfig::new(api_key, environment))
}

fn parse_environment(value: &str) -> Result<IssuerEnvironment> {
    match value.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Ok(IssuerEnvironment::Production),
        "test" => Ok(IssuerEnvironment::Test),
        other => {
            Err(CredSyncError::Config(format!("Unknown issuer environment: {other:?}")))
        }
    }
}
