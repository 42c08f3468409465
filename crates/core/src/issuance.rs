//! Credential issuance
//!
//! Ensures at most one credential record exists per (group, template,
//! recipient email) by looking up before any create call. The lookup and
//! the create are two network round-trips and are not atomic; callers
//! that may race on the same key must serialize externally.

use std::sync::Arc;

use credsync_domain::{
    CredentialCreateError, CredentialFilter, GroupId, IssueOutcome, Learner, NewCredential,
    TemplateId,
};
use tracing::{debug, info, warn};

use crate::issuer_ports::IssuerClient;
use crate::lms_ports::{Clock, CredentialAuditSink};

/// Idempotent credential creation against the remote issuer.
pub struct CredentialIssuer {
    issuer: Arc<dyn IssuerClient>,
    audit: Arc<dyn CredentialAuditSink>,
    clock: Arc<dyn Clock>,
}

impl CredentialIssuer {
    pub fn new(
        issuer: Arc<dyn IssuerClient>,
        audit: Arc<dyn CredentialAuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { issuer, audit, clock }
    }

    /// Create a credential for the learner unless one already exists.
    ///
    /// Repeated calls with the same (email, group, template) return the
    /// first call's record without a create call. `issued_on` defaults
    /// to the current date on the issuer side when `None`.
    pub async fn issue_if_needed(
        &self,
        learner: &Learner,
        group_id: &GroupId,
        template_id: Option<&TemplateId>,
        issued_on: Option<String>,
    ) -> Result<IssueOutcome, CredentialCreateError> {
        let wrap = |source| CredentialCreateError {
            email: learner.email.clone(),
            group_id: group_id.clone(),
            source,
        };

        let filter = CredentialFilter::for_recipient(
            group_id.clone(),
            template_id.cloned(),
            &learner.email,
        );
        let existing = self.issuer.list_credentials(&filter).await.map_err(wrap)?;

        if let Some(record) = existing.into_iter().next() {
            debug!(
                record_id = %record.id,
                email = %learner.email,
                group_id = %group_id,
                "credential already exists, skipping create"
            );
            return Ok(IssueOutcome::Existing(record));
        }

        // Seconds-granularity serial; collisions within one second are a
        // documented limitation at this call volume.
        let serial = format!("{}_{}", group_id, self.clock.now_unix());
        let payload = NewCredential {
            recipient_name: learner.full_name.clone(),
            recipient_email: learner.email.clone(),
            group_id: group_id.clone(),
            template_id: template_id.cloned(),
            issued_on,
            serial,
        };

        let record = self.issuer.create_credential(&payload).await.map_err(wrap)?;
        info!(
            record_id = %record.id,
            email = %learner.email,
            group_id = %group_id,
            "issued credential"
        );

        if let Err(err) = self
            .audit
            .credential_created(&record.id, learner.id, payload.issued_on.as_deref())
            .await
        {
            // Audit emission is best-effort; the credential exists either way.
            warn!(record_id = %record.id, error = %err, "failed to emit audit event");
        }

        Ok(IssueOutcome::Created(record))
    }
}
