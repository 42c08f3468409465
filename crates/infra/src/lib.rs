//! # CredSync Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The REST implementation of the issuer client port
//! - The HTTP client wrapper
//! - Environment-based configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `credsync-core`
//! - Depends on `credsync-domain` and `credsync-core`
//! - Contains all "impure" code (network I/O, process environment)

pub mod config;
pub mod http;
pub mod issuer;

// Re-export commonly used items
pub use http::HttpClient;
pub use issuer::RestIssuerClient;
