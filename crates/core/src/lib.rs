//! # CredSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Eligibility and completion-timestamp rules
//! - Port/adapter interfaces (traits)
//! - Group sync, credential issuance, and orchestration services
//!
//! ## Architecture Principles
//! - Only depends on `credsync-domain`
//! - No HTTP or platform code
//! - All external collaborators via traits
//! - Pure, testable business logic

pub mod completion;
pub mod eligibility;
pub mod group;
pub mod issuance;
pub mod sync;

// Infrastructure ports
pub mod issuer_ports;
pub mod lms_ports;

// Re-export specific items to avoid ambiguity
pub use completion::resolve_completion_timestamp;
pub use eligibility::evaluate_eligibility;
pub use group::GroupSyncer;
pub use issuance::CredentialIssuer;
pub use issuer_ports::{IssuerClient, IssuerResult};
pub use lms_ports::{
    Clock, CourseRepository, CredentialAuditSink, LearnerDirectory, QuizRepository, SystemClock,
};
pub use sync::SyncService;
