//! Error types used throughout the sync engine
//!
//! Lower-level issuer errors are always wrapped with domain context
//! (course id, learner email) at the component boundary before they
//! reach the orchestrator. Nothing here is retried internally.

use thiserror::Error;

use crate::types::{CourseId, GroupId};

/// Remote issuer error code that indicates an invalid API key.
pub const INVALID_API_KEY_CODE: &str = "401001";

/// Failure reported by the remote credential issuer or its transport.
#[derive(Error, Debug, Clone)]
pub enum IssuerApiError {
    /// The issuer responded with an explicit error envelope.
    #[error("issuer error ({code}): {description}")]
    Remote { code: String, description: String },

    /// The request never produced a decodable response (connection,
    /// TLS, timeout, malformed body).
    #[error("issuer transport error: {0}")]
    Transport(String),

    /// The operation is deliberately not supported by the issuer API.
    #[error("issuer operation not supported: {0}")]
    Unsupported(&'static str),
}

impl IssuerApiError {
    /// Build a `Remote` error, annotating the invalid-API-key code for
    /// diagnostic clarity. The annotation does not change control flow.
    pub fn remote(code: impl Into<String>, description: impl Into<String>) -> Self {
        let code = code.into();
        let mut description = description.into();
        if code == INVALID_API_KEY_CODE {
            description.push_str(" / invalid API key");
        }
        Self::Remote { code, description }
    }

    /// Whether the issuer rejected the configured API key.
    pub fn is_invalid_api_key(&self) -> bool {
        matches!(self, Self::Remote { code, .. } if code == INVALID_API_KEY_CODE)
    }
}

/// Group create/update failure, carrying the course that triggered it
/// so an operator can trace the failing instance.
#[derive(Error, Debug, Clone)]
#[error("failed to sync group for course {course_id}: {source}")]
pub struct GroupSyncError {
    pub course_id: CourseId,
    #[source]
    pub source: IssuerApiError,
}

/// Credential issuance failure, carrying the learner email and group id.
#[derive(Error, Debug, Clone)]
#[error("failed to issue credential for {email} in group {group_id}: {source}")]
pub struct CredentialCreateError {
    pub email: String,
    pub group_id: GroupId,
    #[source]
    pub source: IssuerApiError,
}

/// Main error type for CredSync
#[derive(Error, Debug)]
pub enum CredSyncError {
    #[error(transparent)]
    IssuerApi(#[from] IssuerApiError),

    #[error(transparent)]
    GroupSync(#[from] GroupSyncError),

    #[error(transparent)]
    CredentialCreate(#[from] CredentialCreateError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias for CredSync operations
pub type Result<T> = std::result::Result<T, CredSyncError>;
