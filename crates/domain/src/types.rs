//! Domain data types
//!
//! Split between the local LMS-side view (course instances, learners,
//! quiz attempts) and the remote issuer-side entities (groups, templates,
//! credential records) plus the typed payloads sent to the issuer.

pub mod issuer;
pub mod lms;

pub use issuer::*;
pub use lms::*;

/// Issuer-assigned group identifier.
pub type GroupId = String;
/// Issuer-assigned template identifier.
pub type TemplateId = String;
/// Issuer-assigned credential record identifier.
pub type RecordId = String;

/// Local course identifier.
pub type CourseId = i64;
/// Local credential-activity instance identifier.
pub type InstanceId = i64;
/// Local learner identifier.
pub type LearnerId = i64;
/// Local quiz identifier.
pub type QuizId = i64;
