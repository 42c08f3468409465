//! Remote issuer REST integration

mod client;
mod types;

pub use client::RestIssuerClient;
