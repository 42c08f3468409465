//! Remote issuer port interface
//!
//! One operation per remote resource action. Implementations carry no
//! business logic, keep no local state, and never retry: every failure
//! maps to [`IssuerApiError`] and propagates to the caller.

use async_trait::async_trait;
use credsync_domain::{
    CredentialFilter, CredentialRecord, CredentialUpdate, Group, GroupId, GroupUpdate,
    IssuerApiError, NewCredential, NewGroup, RecordId, Template,
};

/// Result alias local to issuer operations.
pub type IssuerResult<T> = std::result::Result<T, IssuerApiError>;

/// Trait for remote credential-issuer operations
#[async_trait]
pub trait IssuerClient: Send + Sync {
    /// Create a new group and return it with its issuer-assigned id.
    async fn create_group(&self, payload: &NewGroup) -> IssuerResult<Group>;

    /// Update an existing group. `None` fields are left unchanged.
    async fn update_group(&self, payload: &GroupUpdate) -> IssuerResult<GroupId>;

    /// Fetch one group by id.
    async fn get_group(&self, id: &GroupId) -> IssuerResult<Group>;

    /// List all groups for the authenticated organization.
    async fn list_groups(&self) -> IssuerResult<Vec<Group>>;

    /// List all credential templates.
    async fn list_templates(&self) -> IssuerResult<Vec<Template>>;

    /// Create a credential record in an existing group.
    async fn create_credential(&self, payload: &NewCredential) -> IssuerResult<CredentialRecord>;

    /// Update an existing credential record.
    async fn update_credential(&self, payload: &CredentialUpdate) -> IssuerResult<RecordId>;

    /// Fetch one credential record by id.
    async fn get_credential(&self, id: &RecordId) -> IssuerResult<CredentialRecord>;

    /// List credential records matching the filter.
    async fn list_credentials(
        &self,
        filter: &CredentialFilter,
    ) -> IssuerResult<Vec<CredentialRecord>>;

    /// Delete a credential record.
    async fn delete_credential(&self, id: &RecordId) -> IssuerResult<()>;

    /// Group deletion is a defined no-op: implementations must return
    /// [`IssuerApiError::Unsupported`] without contacting the remote API.
    async fn delete_group(&self, id: &GroupId) -> IssuerResult<()>;
}
