//! Container engine provider resolution.
//!
//! `engine_provider` decides which container engine family a test
//! orchestration client talks to, and which default bridge network its
//! containers attach to. Callers state a preference (`auto`, `docker` or
//! `podman`); explicit preferences are always honoured, while `auto` infers
//! the family from the daemon host address.
//!
//! # Modules
//!
//! - [`config`]: Configuration with layered precedence (CLI > env > file > defaults)
//! - [`engine`]: Endpoint resolution and `Bollard` client construction
//! - [`error`]: Semantic error types
//! - [`logging`]: Tracing subscriber setup for the binary
//! - [`provider`]: Preference policy, host classification and provider handles

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod provider;
