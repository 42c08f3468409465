//! Issuer configuration
//!
//! The deployment target (production vs test host) is an explicit value
//! passed into client construction, never read from process-wide state.

use serde::{Deserialize, Serialize};

/// Remote issuer deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuerEnvironment {
    Production,
    Test,
}

impl IssuerEnvironment {
    /// API host for this environment.
    pub fn api_host(self) -> &'static str {
        match self {
            Self::Production => "api.biploma.com",
            Self::Test => "api-testing.biploma.com",
        }
    }
}

/// Configuration for the remote issuer client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerConfig {
    /// API key sent in the `Authorization` header on every call.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Which issuer deployment to talk to.
    pub environment: IssuerEnvironment,
}

impl IssuerConfig {
    /// Create a configuration for the given environment.
    pub fn new(api_key: impl Into<String>, environment: IssuerEnvironment) -> Self {
        Self { api_key: api_key.into(), environment }
    }

    /// Base URL for the issuer API, always HTTPS.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.environment.api_host())
    }
}
