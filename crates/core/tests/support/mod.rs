//! Shared in-memory fakes for orchestrator integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use credsync_core::issuer_ports::{IssuerClient, IssuerResult};
use credsync_core::lms_ports::{
    Clock, CourseRepository, CredentialAuditSink, LearnerDirectory, QuizRepository,
};
use credsync_core::SyncService;
use credsync_domain::{
    CourseId, CourseInfo, CourseInstance, CredSyncError, CredentialFilter, CredentialRecord,
    CredentialUpdate, Group, GroupId, GroupUpdate, InstanceId, IssuerApiError, Learner,
    LearnerId, NewCredential, NewGroup, Quiz, QuizAttempt, QuizId, RecordId,
    Result as DomainResult, Template,
};

pub const NOW: i64 = 1_700_000_000;

/// In-memory issuer with call counters.
#[derive(Default)]
pub struct InMemoryIssuer {
    pub groups: Mutex<Vec<Group>>,
    pub credentials: Mutex<Vec<CredentialRecord>>,
    pub created_payloads: Mutex<Vec<NewCredential>>,
    pub group_creates: AtomicUsize,
    pub group_updates: AtomicUsize,
    pub credential_creates: AtomicUsize,
    pub credential_lookups: AtomicUsize,
    /// Force create_credential to fail for this recipient email.
    pub fail_create_for: Mutex<Option<String>>,
    next_group: AtomicUsize,
    next_record: AtomicUsize,
}

impl InMemoryIssuer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_create_for(&self, email: &str) {
        *self.fail_create_for.lock().unwrap() = Some(email.to_string());
    }

    pub fn credentials_for(&self, email: &str) -> Vec<CredentialRecord> {
        self.credentials
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.recipient_email == email)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl IssuerClient for InMemoryIssuer {
    async fn create_group(&self, payload: &NewGroup) -> IssuerResult<Group> {
        self.group_creates.fetch_add(1, Ordering::SeqCst);
        let id = format!("grp-{}", self.next_group.fetch_add(1, Ordering::SeqCst) + 1);
        let group = Group {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            link: payload.link.clone(),
        };
        self.groups.lock().unwrap().push(group.clone());
        Ok(group)
    }

    async fn update_group(&self, payload: &GroupUpdate) -> IssuerResult<GroupId> {
        self.group_updates.fetch_add(1, Ordering::SeqCst);
        let mut groups = self.groups.lock().unwrap();
        let group = groups
            .iter_mut()
            .find(|g| g.id == payload.group_id)
            .ok_or_else(|| IssuerApiError::remote("404001", "group not found"))?;
        if let Some(name) = &payload.name {
            group.name = name.clone();
        }
        if let Some(description) = &payload.description {
            group.description = description.clone();
        }
        Ok(payload.group_id.clone())
    }

    async fn get_group(&self, id: &GroupId) -> IssuerResult<Group> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| &g.id == id)
            .cloned()
            .ok_or_else(|| IssuerApiError::remote("404001", "group not found"))
    }

    async fn list_groups(&self) -> IssuerResult<Vec<Group>> {
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn list_templates(&self) -> IssuerResult<Vec<Template>> {
        Ok(vec![Template { id: "tpl-1".into(), description: "Default template".into() }])
    }

    async fn create_credential(&self, payload: &NewCredential) -> IssuerResult<CredentialRecord> {
        if self.fail_create_for.lock().unwrap().as_deref() == Some(&payload.recipient_email) {
            return Err(IssuerApiError::remote("500001", "induced failure"));
        }
        self.credential_creates.fetch_add(1, Ordering::SeqCst);
        self.created_payloads.lock().unwrap().push(payload.clone());
        let id = format!("rec-{}", self.next_record.fetch_add(1, Ordering::SeqCst) + 1);
        let record = CredentialRecord {
            id,
            recipient_name: Some(payload.recipient_name.clone()),
            recipient_email: payload.recipient_email.clone(),
            group_id: payload.group_id.clone(),
            template_id: payload.template_id.clone(),
            issued_on: payload.issued_on.clone(),
            transaction_id: None,
            url: None,
        };
        self.credentials.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_credential(&self, payload: &CredentialUpdate) -> IssuerResult<RecordId> {
        Ok(payload.record_id.clone())
    }

    async fn get_credential(&self, id: &RecordId) -> IssuerResult<CredentialRecord> {
        self.credentials
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| IssuerApiError::remote("404002", "record not found"))
    }

    async fn list_credentials(
        &self,
        filter: &CredentialFilter,
    ) -> IssuerResult<Vec<CredentialRecord>> {
        self.credential_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.group_id.as_ref().map_or(true, |g| &r.group_id == g))
            .filter(|r| filter.email.as_ref().map_or(true, |e| &r.recipient_email == e))
            .cloned()
            .collect())
    }

    async fn delete_credential(&self, id: &RecordId) -> IssuerResult<()> {
        self.credentials.lock().unwrap().retain(|r| &r.id != id);
        Ok(())
    }

    async fn delete_group(&self, _id: &GroupId) -> IssuerResult<()> {
        Err(IssuerApiError::Unsupported("delete_group"))
    }
}

/// In-memory LMS: courses, instances, learners, quizzes, attempts.
#[derive(Default)]
pub struct InMemoryLms {
    pub courses: Mutex<Vec<CourseInfo>>,
    pub instances: Mutex<Vec<CourseInstance>>,
    pub learners: Mutex<Vec<Learner>>,
    pub quizzes: Mutex<Vec<Quiz>>,
    /// (learner, attempt) pairs across all quizzes.
    pub attempts: Mutex<Vec<(LearnerId, QuizAttempt)>>,
    /// (quiz, learner) -> best scaled grade.
    pub best_grades: Mutex<Vec<(QuizId, LearnerId, f64)>>,
}

impl InMemoryLms {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_course(&self, course: CourseInfo) {
        self.courses.lock().unwrap().push(course);
    }

    pub fn add_instance(&self, instance: CourseInstance) {
        self.instances.lock().unwrap().push(instance);
    }

    pub fn add_learner(&self, learner: Learner) {
        self.learners.lock().unwrap().push(learner);
    }

    pub fn add_quiz(&self, quiz: Quiz) {
        self.quizzes.lock().unwrap().push(quiz);
    }

    pub fn add_attempt(&self, learner_id: LearnerId, attempt: QuizAttempt) {
        self.attempts.lock().unwrap().push((learner_id, attempt));
    }

    pub fn set_best_grade(&self, quiz_id: QuizId, learner_id: LearnerId, grade: f64) {
        self.best_grades.lock().unwrap().push((quiz_id, learner_id, grade));
    }

    pub fn group_id_of(&self, instance_id: InstanceId) -> Option<GroupId> {
        self.instances
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == instance_id)
            .and_then(|i| i.group_id.clone())
    }
}

#[async_trait]
impl CourseRepository for InMemoryLms {
    async fn course(&self, id: CourseId) -> DomainResult<CourseInfo> {
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CredSyncError::NotFound(format!("course {id}")))
    }

    async fn instances_for_course(&self, course_id: CourseId) -> DomainResult<Vec<CourseInstance>> {
        Ok(self
            .instances
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn set_group_id(&self, instance_id: InstanceId, group_id: &GroupId) -> DomainResult<()> {
        let mut instances = self.instances.lock().unwrap();
        let instance = instances
            .iter_mut()
            .find(|i| i.id == instance_id)
            .ok_or_else(|| CredSyncError::NotFound(format!("instance {instance_id}")))?;
        instance.group_id = Some(group_id.clone());
        Ok(())
    }
}

#[async_trait]
impl LearnerDirectory for InMemoryLms {
    async fn learner(&self, id: LearnerId) -> DomainResult<Learner> {
        self.learners
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| CredSyncError::NotFound(format!("learner {id}")))
    }
}

#[async_trait]
impl QuizRepository for InMemoryLms {
    async fn quiz(&self, id: QuizId) -> DomainResult<Quiz> {
        self.quizzes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| CredSyncError::NotFound(format!("quiz {id}")))
    }

    async fn best_grade(&self, quiz_id: QuizId, learner_id: LearnerId) -> DomainResult<Option<f64>> {
        Ok(self
            .best_grades
            .lock()
            .unwrap()
            .iter()
            .find(|(q, l, _)| *q == quiz_id && *l == learner_id)
            .map(|(_, _, grade)| *grade))
    }

    async fn finished_attempts(
        &self,
        learner_id: LearnerId,
        quiz_id: Option<QuizId>,
    ) -> DomainResult<Vec<QuizAttempt>> {
        Ok(self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, a)| *l == learner_id && quiz_id.map_or(true, |q| a.quiz_id == q))
            .map(|(_, a)| a.clone())
            .collect())
    }
}

/// Audit sink that records emitted events.
#[derive(Default)]
pub struct RecordingAudit {
    pub events: Mutex<Vec<(RecordId, LearnerId)>>,
}

#[async_trait]
impl CredentialAuditSink for RecordingAudit {
    async fn credential_created(
        &self,
        record_id: &RecordId,
        learner_id: LearnerId,
        _issued_on: Option<&str>,
    ) -> DomainResult<()> {
        self.events.lock().unwrap().push((record_id.clone(), learner_id));
        Ok(())
    }
}

/// Deterministic clock.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// Wire a `SyncService` over the in-memory fakes.
pub fn service(
    issuer: &Arc<InMemoryIssuer>,
    lms: &Arc<InMemoryLms>,
    audit: &Arc<RecordingAudit>,
) -> SyncService {
    SyncService::new(
        issuer.clone(),
        lms.clone(),
        lms.clone(),
        lms.clone(),
        audit.clone(),
        Arc::new(FixedClock(NOW)),
    )
}
