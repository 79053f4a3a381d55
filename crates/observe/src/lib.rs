//! Logging setup shared by the deployment binaries: `tracing` subscriber
//! initialization and a panic hook that reports through it.
pub mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
