//! LMS-side types
//!
//! Local records the sync engine reads but never owns. Persistence of
//! these belongs to the host LMS; the engine only receives snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CourseId, GroupId, InstanceId, LearnerId, QuizId, TemplateId};

/// A configured credential activity inside one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInstance {
    pub id: InstanceId,
    pub course_id: CourseId,
    pub name: String,
    /// Quiz whose best grade decides the grade eligibility path.
    pub final_quiz: Option<QuizId>,
    /// Passing threshold in percent, 0-100.
    pub passing_grade: u8,
    /// Required activities for the checklist eligibility path.
    pub checklist: CompletionChecklist,
    /// Remote group mapped to this instance. Assigned exactly once on
    /// first sync unless explicitly reassigned by an operator.
    pub group_id: Option<GroupId>,
    pub template_id: Option<TemplateId>,
}

impl CourseInstance {
    /// Whether any auto-issue rule is configured at all.
    pub fn has_issue_rule(&self) -> bool {
        self.final_quiz.is_some() || !self.checklist.is_empty()
    }

    /// Whether a quiz is relevant to this instance's issue rules.
    pub fn quiz_is_relevant(&self, quiz_id: QuizId) -> bool {
        self.final_quiz == Some(quiz_id) || self.checklist.tracks(quiz_id)
    }
}

/// Required-activity checklist: quiz id mapped to its completion flag.
///
/// Ordering is irrelevant; `BTreeMap` keeps iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionChecklist(BTreeMap<QuizId, bool>);

impl CompletionChecklist {
    /// Build a checklist from required quiz ids, all initially incomplete.
    pub fn required(quiz_ids: impl IntoIterator<Item = QuizId>) -> Self {
        Self(quiz_ids.into_iter().map(|id| (id, false)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the checklist tracks this quiz at all.
    pub fn tracks(&self, quiz_id: QuizId) -> bool {
        self.0.contains_key(&quiz_id)
    }

    /// Mark a tracked quiz as completed. Untracked ids are ignored.
    pub fn mark_complete(&mut self, quiz_id: QuizId) {
        if let Some(flag) = self.0.get_mut(&quiz_id) {
            *flag = true;
        }
    }

    /// Whether every tracked quiz has been completed.
    pub fn is_complete(&self) -> bool {
        self.0.values().all(|done| *done)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuizId, bool)> + '_ {
        self.0.iter().map(|(id, done)| (*id, *done))
    }
}

/// The course fields group synchronization needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInfo {
    pub id: CourseId,
    pub short_name: String,
    pub full_name: String,
    pub summary: String,
    /// Web link to the course, shown on the remote group.
    pub link: Option<String>,
}

/// A credential recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learner {
    pub id: LearnerId,
    pub full_name: String,
    pub email: String,
}

/// A quiz as graded by the LMS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    /// Maximum raw score summed over all questions.
    pub total_score: f64,
    /// Maximum scaled grade for the quiz.
    pub grade: f64,
}

/// One finished quiz attempt by a learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub quiz_id: QuizId,
    /// 1-based attempt counter per learner and quiz.
    pub attempt_number: u32,
    pub raw_score: f64,
    /// Unix timestamp of when the attempt finished.
    pub finished_at: i64,
}

/// Transient view over a learner's recorded activity, recomputed on
/// every evaluation and never persisted.
#[derive(Debug, Clone, Default)]
pub struct LearnerProgress {
    /// Best grade on the configured final quiz, already scaled to the
    /// quiz maximum (same scale as `Quiz::grade`).
    pub best_final_quiz_grade: Option<f64>,
    /// Maximum scaled grade of the final quiz, if one is configured.
    pub final_quiz_grade_max: Option<f64>,
    /// All of the learner's finished attempts across quizzes.
    pub finished_attempts: Vec<QuizAttempt>,
}

/// Tri-state eligibility decision.
///
/// `Indeterminate` is distinct from `NotEarned` on purpose: ambiguous
/// repeated-attempt state must never be mistaken for a failed check,
/// and must never trigger issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Earned,
    NotEarned,
    Indeterminate,
}

/// Asynchronous LMS activity notifications the orchestrator reacts to.
#[derive(Debug, Clone)]
pub enum ActivityEvent {
    QuizSubmitted {
        course_id: CourseId,
        quiz_id: QuizId,
        learner_id: LearnerId,
    },
    CourseCompleted {
        course_id: CourseId,
        learner_id: LearnerId,
    },
}
