//! Configuration system for engine-provider.
//!
//! Configuration loading and precedence merging is handled by the
//! `ortho_config` crate. CLI flags override environment variables, which
//! override configuration files, which override defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! engine_socket = "unix:///run/user/1000/podman/podman.sock"
//! provider = "auto"
//! verify = true
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, ResolveArgs};
pub use loader::{env_var_names, load_config};
pub use types::AppConfig;
