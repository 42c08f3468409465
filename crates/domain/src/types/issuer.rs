//! Remote issuer entities and request payloads
//!
//! Payloads are typed builders: optional fields are plain `Option`s and
//! are omitted from the serialized body when `None` (`None` means "leave
//! unchanged", never "clear the field").

use serde::{Deserialize, Serialize};

use super::{GroupId, RecordId, TemplateId};

/// A cohort/achievement bucket on the issuer. One per course instance
/// under normal operation; outlives instance deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

/// Credential appearance/schema definition, referenced by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub description: String,
}

/// One issued certificate on the remote issuer. Always fetched fresh,
/// never cached locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: RecordId,
    pub recipient_name: Option<String>,
    pub recipient_email: String,
    pub group_id: GroupId,
    pub template_id: Option<TemplateId>,
    pub issued_on: Option<String>,
    /// On-chain publication reference, when the issuer published one.
    pub transaction_id: Option<String>,
    /// Public URL of the credential, when available.
    pub url: Option<String>,
}

/// Payload for creating a group.
#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

/// Payload for updating an existing group. `None` fields are dropped
/// from the transmitted body.
#[derive(Debug, Clone, Serialize)]
pub struct GroupUpdate {
    pub group_id: GroupId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Payload for creating a credential record.
#[derive(Debug, Clone, Serialize)]
pub struct NewCredential {
    pub recipient_name: String,
    pub recipient_email: String,
    pub group_id: GroupId,
    pub template_id: Option<TemplateId>,
    /// Issue date as rendered on the certificate. Defaults to the
    /// current date when absent.
    pub issued_on: Option<String>,
    /// Registration/serial number printed on the certificate.
    pub serial: String,
}

/// Payload for updating a credential record.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialUpdate {
    pub record_id: RecordId,
    pub recipient_name: Option<String>,
    pub issued_on: Option<String>,
}

/// Filter for credential record listings. Empty filter lists everything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CredentialFilter {
    pub group_id: Option<GroupId>,
    pub template_id: Option<TemplateId>,
    pub email: Option<String>,
}

impl CredentialFilter {
    /// Dedup-lookup filter: one learner in one group/template pair.
    pub fn for_recipient(
        group_id: GroupId,
        template_id: Option<TemplateId>,
        email: impl Into<String>,
    ) -> Self {
        Self { group_id: Some(group_id), template_id, email: Some(email.into()) }
    }
}

/// Outcome of an idempotent issuance attempt.
#[derive(Debug, Clone)]
pub enum IssueOutcome {
    /// A new record was created on the issuer.
    Created(CredentialRecord),
    /// A matching record already existed; no create call was made.
    Existing(CredentialRecord),
}

impl IssueOutcome {
    pub fn record(&self) -> &CredentialRecord {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
