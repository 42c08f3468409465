//! Group synchronization
//!
//! Maps one local course instance to exactly one remote group: create on
//! first sync, update in place afterwards. The group id is immutable once
//! assigned; deletion of the local instance never deletes the group.

use std::sync::Arc;

use credsync_domain::{CourseInfo, GroupId, GroupSyncError, GroupUpdate, NewGroup};
use tracing::info;

use crate::issuer_ports::IssuerClient;

/// Description used when the course summary is blank.
pub const DEFAULT_GROUP_DESCRIPTION: &str = "Recipient has completed the achievement.";

/// Keeps a course instance's remote group in step with the course record.
pub struct GroupSyncer {
    issuer: Arc<dyn IssuerClient>,
}

impl GroupSyncer {
    pub fn new(issuer: Arc<dyn IssuerClient>) -> Self {
        Self { issuer }
    }

    /// Create the group on first sync, update it on subsequent syncs.
    ///
    /// Returns the group id; on the update path the existing id is
    /// passed through unchanged. The caller persists the id only after
    /// this returns successfully.
    pub async fn ensure_group(
        &self,
        course: &CourseInfo,
        existing: Option<&GroupId>,
    ) -> Result<GroupId, GroupSyncError> {
        let description = if course.summary.trim().is_empty() {
            DEFAULT_GROUP_DESCRIPTION.to_string()
        } else {
            course.summary.clone()
        };

        match existing {
            Some(group_id) => {
                // The randomized group name is left unchanged on update;
                // None fields are dropped from the payload entirely.
                let payload = GroupUpdate {
                    group_id: group_id.clone(),
                    name: None,
                    description: Some(description),
                    link: course.link.clone(),
                };
                let id = self
                    .issuer
                    .update_group(&payload)
                    .await
                    .map_err(|source| GroupSyncError { course_id: course.id, source })?;
                info!(course_id = course.id, group_id = %id, "updated issuer group");
                Ok(id)
            }
            None => {
                // Random suffix so courses sharing a short name do not
                // collide on the issuer.
                let name = format!("{}{}", course.short_name, rand::random::<u32>());
                let payload =
                    NewGroup { name, description, link: course.link.clone() };
                let group = self
                    .issuer
                    .create_group(&payload)
                    .await
                    .map_err(|source| GroupSyncError { course_id: course.id, source })?;
                info!(course_id = course.id, group_id = %group.id, "created issuer group");
                Ok(group.id)
            }
        }
    }
}
