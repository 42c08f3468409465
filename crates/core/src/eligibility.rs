//! Eligibility evaluation
//!
//! Decides whether a learner has earned a credential according to the
//! instance configuration. Stateless and recomputed on demand; nothing
//! here is persisted.
//!
//! Two independent paths can mark "earned":
//! - grade path: best final-quiz grade, scaled to percent and clamped
//!   at 100, meets the passing threshold
//! - checklist path: every required activity has exactly one finished
//!   attempt
//!
//! A repeated finished attempt on any checklist-tracked activity aborts
//! the whole evaluation with [`Eligibility::Indeterminate`], even when
//! the grade path already earned. That carries over the upstream
//! repeated-attempt policy unchanged; see DESIGN.md before changing it.

use credsync_domain::{CourseInstance, Eligibility, LearnerProgress};
use tracing::debug;

/// Evaluate a learner's eligibility for the instance's credential.
pub fn evaluate_eligibility(
    instance: &CourseInstance,
    progress: &LearnerProgress,
) -> Eligibility {
    if !instance.has_issue_rule() {
        return Eligibility::NotEarned;
    }

    let mut earned = false;

    if instance.final_quiz.is_some() {
        if let Some(grade) = scaled_grade(progress) {
            if grade >= f64::from(instance.passing_grade) {
                debug!(grade, passing_grade = instance.passing_grade, "grade path earned");
                earned = true;
            }
        }
    }

    if !instance.checklist.is_empty() {
        let mut checklist = instance.checklist.clone();
        for attempt in &progress.finished_attempts {
            // Repeated attempts on a required activity are ambiguous;
            // bail out rather than silently pass or fail.
            if checklist.tracks(attempt.quiz_id) && attempt.attempt_number > 1 {
                debug!(quiz_id = attempt.quiz_id, "repeated attempt on checklist activity");
                return Eligibility::Indeterminate;
            }
            checklist.mark_complete(attempt.quiz_id);
        }
        if checklist.is_complete() {
            earned = true;
        }
    }

    if earned { Eligibility::Earned } else { Eligibility::NotEarned }
}

/// Best final-quiz grade as a percentage, clamped to a maximum of 100.
fn scaled_grade(progress: &LearnerProgress) -> Option<f64> {
    let best = progress.best_final_quiz_grade?;
    let max = progress.final_quiz_grade_max?;
    if max <= 0.0 {
        return None;
    }
    Some((best / max * 100.0).min(100.0))
}
