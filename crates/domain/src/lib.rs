//! # CredSync Domain
//!
//! Business domain types and models for CredSync.
//!
//! This crate contains:
//! - Domain data types (CourseInstance, Learner, CredentialRecord, etc.)
//! - Domain error types and Result definitions
//! - Issuer configuration structures
//!
//! ## Architecture
//! - No dependencies on other CredSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
