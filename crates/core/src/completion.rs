//! Completion timestamp resolution
//!
//! Computes the effective "issued on" date for manual issuance from a
//! learner's best passing attempt on the configured final quiz. Total
//! function: always returns a concrete timestamp, falling back to `now`.

use credsync_domain::{CourseInstance, Quiz, QuizAttempt};

/// Resolve when the learner completed the course.
///
/// Selects the finished attempt with the highest raw score; ties keep
/// the earliest-seen attempt. If that attempt's percentage meets the
/// passing threshold, its finish time is returned, otherwise `now`.
pub fn resolve_completion_timestamp(
    instance: &CourseInstance,
    quiz: Option<&Quiz>,
    attempts: &[QuizAttempt],
    now: i64,
) -> i64 {
    let (Some(final_quiz), Some(quiz)) = (instance.final_quiz, quiz) else {
        return now;
    };

    let mut best: Option<&QuizAttempt> = None;
    for attempt in attempts.iter().filter(|a| a.quiz_id == final_quiz) {
        match best {
            None => best = Some(attempt),
            // Strictly greater: an equal later score does not override
            // the earliest-seen best. The raw-score scale is constant
            // across attempts of one quiz, so comparing raw is safe.
            Some(current) if attempt.raw_score > current.raw_score => best = Some(attempt),
            Some(_) => {}
        }
    }

    if let Some(best) = best {
        if quiz.total_score > 0.0 {
            let grade = best.raw_score / quiz.total_score * 100.0;
            if grade >= f64::from(instance.passing_grade) {
                return best.finished_at;
            }
        }
    }

    now
}

#[cfg(test)]
mod tests {
    use credsync_domain::CompletionChecklist;

    use super::*;

    const NOW: i64 = 9_999;

    fn instance(passing_grade: u8) -> CourseInstance {
        CourseInstance {
            id: 1,
            course_id: 10,
            name: "Certificate".into(),
            final_quiz: Some(5),
            passing_grade,
            checklist: CompletionChecklist::default(),
            group_id: None,
            template_id: None,
        }
    }

    fn quiz() -> Quiz {
        Quiz { id: 5, total_score: 100.0, grade: 100.0 }
    }

    fn attempt(raw_score: f64, finished_at: i64) -> QuizAttempt {
        QuizAttempt { quiz_id: 5, attempt_number: 1, raw_score, finished_at }
    }

    #[test]
    fn ties_keep_the_earliest_seen_highest_attempt() {
        let attempts = [attempt(80.0, 100), attempt(95.0, 200), attempt(95.0, 50)];
        let resolved =
            resolve_completion_timestamp(&instance(90), Some(&quiz()), &attempts, NOW);
        assert_eq!(resolved, 200);
    }

    #[test]
    fn below_threshold_falls_back_to_now() {
        let attempts = [attempt(60.0, 100)];
        let resolved =
            resolve_completion_timestamp(&instance(90), Some(&quiz()), &attempts, NOW);
        assert_eq!(resolved, NOW);
    }

    #[test]
    fn no_attempts_falls_back_to_now() {
        let resolved = resolve_completion_timestamp(&instance(50), Some(&quiz()), &[], NOW);
        assert_eq!(resolved, NOW);
    }

    #[test]
    fn no_final_quiz_falls_back_to_now() {
        let mut instance = instance(50);
        instance.final_quiz = None;
        let resolved = resolve_completion_timestamp(&instance, None, &[], NOW);
        assert_eq!(resolved, NOW);
    }

    #[test]
    fn attempts_on_other_quizzes_are_ignored() {
        let mut other = attempt(100.0, 300);
        other.quiz_id = 7;
        let attempts = [other, attempt(95.0, 200)];
        let resolved =
            resolve_completion_timestamp(&instance(90), Some(&quiz()), &attempts, NOW);
        assert_eq!(resolved, 200);
    }

    #[test]
    fn zero_total_score_never_passes() {
        let quiz = Quiz { id: 5, total_score: 0.0, grade: 0.0 };
        let attempts = [attempt(0.0, 100)];
        let resolved = resolve_completion_timestamp(&instance(0), Some(&quiz), &attempts, NOW);
        assert_eq!(resolved, NOW);
    }
}
