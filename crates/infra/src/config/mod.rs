//! Configuration loading

mod loader;

pub use loader::load_issuer_config;
