//! LMS collaborator port interfaces
//!
//! The host LMS owns course, learner, and quiz persistence; the sync
//! engine consumes them through these traits and emits audit events
//! back through [`CredentialAuditSink`].

use async_trait::async_trait;
use chrono::Utc;
use credsync_domain::{
    CourseId, CourseInfo, CourseInstance, GroupId, InstanceId, Learner, LearnerId, Quiz,
    QuizAttempt, QuizId, RecordId, Result,
};

/// Course and credential-activity instance lookups.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fetch the course fields needed for group synchronization.
    async fn course(&self, id: CourseId) -> Result<CourseInfo>;

    /// All credential-activity instances configured for a course.
    async fn instances_for_course(&self, course_id: CourseId) -> Result<Vec<CourseInstance>>;

    /// Persist the remote group id on an instance record. Called only
    /// after the group create/update succeeded.
    async fn set_group_id(&self, instance_id: InstanceId, group_id: &GroupId) -> Result<()>;
}

/// Learner record lookups.
#[async_trait]
pub trait LearnerDirectory: Send + Sync {
    async fn learner(&self, id: LearnerId) -> Result<Learner>;
}

/// Quiz and quiz-attempt lookups.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn quiz(&self, id: QuizId) -> Result<Quiz>;

    /// Best scaled grade the learner achieved on the quiz, on the same
    /// scale as [`Quiz::grade`]. `None` when no graded attempt exists.
    async fn best_grade(&self, quiz_id: QuizId, learner_id: LearnerId) -> Result<Option<f64>>;

    /// The learner's finished attempts, optionally limited to one quiz.
    async fn finished_attempts(
        &self,
        learner_id: LearnerId,
        quiz_id: Option<QuizId>,
    ) -> Result<Vec<QuizAttempt>>;
}

/// Outbound audit/event emission after a credential was created.
///
/// Failures here must never fail the issuance itself; callers log and
/// move on.
#[async_trait]
pub trait CredentialAuditSink: Send + Sync {
    async fn credential_created(
        &self,
        record_id: &RecordId,
        learner_id: LearnerId,
        issued_on: Option<&str>,
    ) -> Result<()>;
}

/// Time source, injected so issuance dates and serial numbers are
/// deterministic under test.
pub trait Clock: Send + Sync {
    /// Current unix timestamp in seconds.
    fn now_unix(&self) -> i64;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}
