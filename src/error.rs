//! Semantic error types for engine provider resolution.
//!
//! Conditions a caller might inspect, skip on, or report are modelled as
//! semantic enums (via `thiserror`). Opaque errors (`eyre::Report`) are
//! reserved for the binary boundary.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised while building or verifying the engine client behind a
/// provider handle.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Failed to connect to the container engine socket.
    #[error("failed to connect to container engine: {message}")]
    ConnectionFailed {
        /// A description of the connection failure.
        message: String,
    },

    /// The container engine socket was not found.
    #[error("container engine socket not found: {path}")]
    SocketNotFound {
        /// The path where the socket was expected.
        path: PathBuf,
    },

    /// Permission denied when accessing the container engine socket.
    #[error("permission denied accessing container socket: {path}")]
    PermissionDenied {
        /// The path to the socket.
        path: PathBuf,
    },

    /// Health check failed - engine did not respond correctly.
    #[error("container engine health check failed: {message}")]
    HealthCheckFailed {
        /// A description of the health check failure.
        message: String,
    },

    /// Health check timed out.
    #[error("container engine health check timed out after {seconds} seconds")]
    HealthCheckTimeout {
        /// The timeout duration in seconds.
        seconds: u64,
    },

    /// The tokio runtime backing a synchronous call could not be created.
    #[error("failed to create async runtime: {message}")]
    RuntimeCreationFailed {
        /// A description of the runtime failure.
        message: String,
    },
}

/// Errors raised by the provider selection policy itself.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested provider cannot run on this platform.
    ///
    /// Callers treat this as a skip signal rather than a hard failure.
    #[error("the {provider} provider is not supported on this platform")]
    UnsupportedPlatform {
        /// The provider that was requested.
        provider: String,
    },

    /// The textual provider preference is not one of the known values.
    #[error("unknown provider '{value}': expected one of auto, docker, podman")]
    InvalidPreference {
        /// The rejected value.
        value: String,
    },
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum EngineProviderError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine client could not be constructed or verified.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The provider selection was rejected.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl EngineProviderError {
    /// Returns true when the error signals an unsupported platform.
    ///
    /// Test suites use this to skip Podman-specific cases instead of failing.
    #[must_use]
    pub const fn is_unsupported_platform(&self) -> bool {
        matches!(
            self,
            Self::Provider(ProviderError::UnsupportedPlatform { .. })
        )
    }
}

/// A specialised `Result` type for engine provider operations.
pub type Result<T> = std::result::Result<T, EngineProviderError>;
