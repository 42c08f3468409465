//! Sync orchestration
//!
//! Top-level entry points invoked on instance creation/update and on
//! asynchronous LMS activity events. Each entry point is idempotent with
//! respect to repeated external triggering: group creation happens once
//! per instance and issuance dedups by recipient before every create.
//!
//! A failure for one learner aborts the remaining batch. That mirrors
//! the upstream behavior; per-learner failure isolation is a known
//! improvement target recorded in DESIGN.md.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use credsync_domain::{
    ActivityEvent, CourseInstance, Eligibility, GroupId, Learner, LearnerId, LearnerProgress,
    Result, TemplateId,
};
use tracing::{debug, info, instrument, warn};

use crate::completion::resolve_completion_timestamp;
use crate::eligibility::evaluate_eligibility;
use crate::group::GroupSyncer;
use crate::issuance::CredentialIssuer;
use crate::issuer_ports::IssuerClient;
use crate::lms_ports::{Clock, CourseRepository, LearnerDirectory, QuizRepository};

/// Orchestrates group sync, eligibility evaluation, and issuance.
pub struct SyncService {
    issuer: Arc<dyn IssuerClient>,
    courses: Arc<dyn CourseRepository>,
    learners: Arc<dyn LearnerDirectory>,
    quizzes: Arc<dyn QuizRepository>,
    clock: Arc<dyn Clock>,
    group_syncer: GroupSyncer,
    credential_issuer: CredentialIssuer,
}

impl SyncService {
    pub fn new(
        issuer: Arc<dyn IssuerClient>,
        courses: Arc<dyn CourseRepository>,
        learners: Arc<dyn LearnerDirectory>,
        quizzes: Arc<dyn QuizRepository>,
        audit: Arc<dyn crate::lms_ports::CredentialAuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let group_syncer = GroupSyncer::new(issuer.clone());
        let credential_issuer =
            CredentialIssuer::new(issuer.clone(), audit, clock.clone());
        Self { issuer, courses, learners, quizzes, clock, group_syncer, credential_issuer }
    }

    /// Handle creation of a new credential-activity instance.
    ///
    /// Creates the remote group, persists its id on the instance, then
    /// issues for each operator-selected learner with "now" as the
    /// issue date. Returns the new group id.
    #[instrument(skip(self, instance, selected), fields(instance_id = instance.id))]
    pub async fn on_instance_created(
        &self,
        instance: &CourseInstance,
        selected: &[LearnerId],
    ) -> Result<GroupId> {
        let course = self.courses.course(instance.course_id).await?;
        let group_id = self.group_syncer.ensure_group(&course, None).await?;

        // Persist only after the remote create succeeded.
        self.courses.set_group_id(instance.id, &group_id).await?;

        for learner_id in selected {
            let learner = self.learners.learner(*learner_id).await?;
            self.credential_issuer
                .issue_if_needed(&learner, &group_id, instance.template_id.as_ref(), None)
                .await?;
        }

        info!(group_id = %group_id, learners = selected.len(), "instance created and synced");
        Ok(group_id)
    }

    /// Handle an update to an existing instance.
    ///
    /// Updates the remote group in place when one exists, then issues
    /// for both learner lists using each learner's resolved completion
    /// date as the issue date.
    #[instrument(skip_all, fields(instance_id = instance.id))]
    pub async fn on_instance_updated(
        &self,
        instance: &CourseInstance,
        selected: &[LearnerId],
        unissued_selected: &[LearnerId],
    ) -> Result<()> {
        if let Some(group_id) = &instance.group_id {
            let course = self.courses.course(instance.course_id).await?;
            self.group_syncer.ensure_group(&course, Some(group_id)).await?;
        }

        let Some(group_id) = &instance.group_id else {
            // Nothing can be issued without a group mapping.
            warn!("instance has no group mapping; skipping issuance");
            return Ok(());
        };

        for learner_id in unissued_selected.iter().chain(selected) {
            let learner = self.learners.learner(*learner_id).await?;
            let issued_on = self.manual_issue_date(instance, *learner_id).await?;
            self.credential_issuer
                .issue_if_needed(&learner, group_id, instance.template_id.as_ref(), Some(issued_on))
                .await?;
        }

        Ok(())
    }

    /// Handle an asynchronous LMS activity event.
    #[instrument(skip(self))]
    pub async fn on_activity_event(&self, event: &ActivityEvent) -> Result<()> {
        match event {
            ActivityEvent::QuizSubmitted { course_id, quiz_id, learner_id } => {
                let learner = self.learners.learner(*learner_id).await?;
                for instance in self.courses.instances_for_course(*course_id).await? {
                    let Some(group_id) = instance.group_id.clone() else { continue };
                    if !instance.has_issue_rule() || !instance.quiz_is_relevant(*quiz_id) {
                        continue;
                    }
                    self.evaluate_and_issue(&instance, &group_id, &learner).await?;
                }
            }
            ActivityEvent::CourseCompleted { course_id, learner_id } => {
                let learner = self.learners.learner(*learner_id).await?;
                for instance in self.courses.instances_for_course(*course_id).await? {
                    let Some(group_id) = instance.group_id.clone() else { continue };
                    // Course completion only matters to checklist-driven
                    // instances.
                    if instance.checklist.is_empty() {
                        continue;
                    }
                    self.evaluate_and_issue(&instance, &group_id, &learner).await?;
                }
            }
        }
        Ok(())
    }

    /// Groups as (id, name) pairs for selection lists.
    pub async fn group_choices(&self) -> Result<Vec<(GroupId, String)>> {
        let groups = self.issuer.list_groups().await?;
        Ok(groups.into_iter().map(|g| (g.id, g.name)).collect())
    }

    /// Templates as (id, description) pairs for selection lists.
    pub async fn template_choices(&self) -> Result<Vec<(TemplateId, String)>> {
        let templates = self.issuer.list_templates().await?;
        Ok(templates.into_iter().map(|t| (t.id, t.description)).collect())
    }

    async fn evaluate_and_issue(
        &self,
        instance: &CourseInstance,
        group_id: &GroupId,
        learner: &Learner,
    ) -> Result<()> {
        let progress = self.learner_progress(instance, learner.id).await?;
        match evaluate_eligibility(instance, &progress) {
            Eligibility::Earned => {
                self.credential_issuer
                    .issue_if_needed(learner, group_id, instance.template_id.as_ref(), None)
                    .await?;
            }
            Eligibility::NotEarned => {
                debug!(instance_id = instance.id, learner_id = learner.id, "not earned");
            }
            Eligibility::Indeterminate => {
                // Ambiguous repeated-attempt state; never issue on it.
                warn!(
                    instance_id = instance.id,
                    learner_id = learner.id,
                    "eligibility indeterminate, skipping issuance"
                );
            }
        }
        Ok(())
    }

    /// Assemble the transient progress view for one learner.
    async fn learner_progress(
        &self,
        instance: &CourseInstance,
        learner_id: LearnerId,
    ) -> Result<LearnerProgress> {
        let mut progress = LearnerProgress {
            finished_attempts: self.quizzes.finished_attempts(learner_id, None).await?,
            ..LearnerProgress::default()
        };

        if let Some(quiz_id) = instance.final_quiz {
            let quiz = self.quizzes.quiz(quiz_id).await?;
            progress.final_quiz_grade_max = Some(quiz.grade);
            progress.best_final_quiz_grade =
                self.quizzes.best_grade(quiz_id, learner_id).await?;
        }

        Ok(progress)
    }

    /// Resolve the manual-issue date for one learner as `YYYY-MM-DD`.
    async fn manual_issue_date(
        &self,
        instance: &CourseInstance,
        learner_id: LearnerId,
    ) -> Result<String> {
        let (quiz, attempts) = match instance.final_quiz {
            Some(quiz_id) => {
                let quiz = self.quizzes.quiz(quiz_id).await?;
                let attempts =
                    self.quizzes.finished_attempts(learner_id, Some(quiz_id)).await?;
                (Some(quiz), attempts)
            }
            None => (None, Vec::new()),
        };

        let timestamp = resolve_completion_timestamp(
            instance,
            quiz.as_ref(),
            &attempts,
            self.clock.now_unix(),
        );
        Ok(format_issue_date(timestamp))
    }
}

/// Render a unix timestamp as the issuer's `YYYY-MM-DD` date string.
fn format_issue_date(timestamp: i64) -> String {
    match Utc.timestamp_opt(timestamp, 0).single() {
        Some(datetime) => datetime.format("%Y-%m-%d").to_string(),
        None => Utc::now().format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_date_is_iso_formatted() {
        assert_eq!(format_issue_date(0), "1970-01-01");
        assert_eq!(format_issue_date(1_700_000_000), "2023-11-14");
    }
}
