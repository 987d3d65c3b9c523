//! Health checks against an already-built engine client.
//!
//! Building a client never talks to the daemon, so an unreachable engine
//! only shows up here.

use std::time::Duration;

use bollard::Docker;
use tracing::debug;

use super::error_classification::classify_ping_error;
use super::{EngineConnector, HEALTH_CHECK_TIMEOUT_SECS};
use crate::error::{ContainerError, EngineProviderError};

impl EngineConnector {
    /// Perform a ping with timeout.
    async fn ping_with_timeout(docker: &Docker, endpoint: &str) -> Result<(), EngineProviderError> {
        let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);
        let socket_uri = Self::normalize_endpoint(endpoint);

        tokio::time::timeout(timeout, docker.ping())
            .await
            .map_err(|_| {
                EngineProviderError::from(ContainerError::HealthCheckTimeout {
                    seconds: HEALTH_CHECK_TIMEOUT_SECS,
                })
            })?
            .map_err(|e| EngineProviderError::from(classify_ping_error(&e, &socket_uri)))?;
        debug!(endpoint = %socket_uri, "container engine responded to ping");
        Ok(())
    }

    /// Verify the container engine at `endpoint` is responsive (async version).
    ///
    /// `endpoint` is the address `docker` was built for; it is only used to
    /// report socket-level failures against the right path.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::HealthCheckFailed` if the engine does not
    /// respond correctly, `ContainerError::SocketNotFound` or
    /// `ContainerError::PermissionDenied` for socket-level failures, and
    /// `ContainerError::HealthCheckTimeout` if the check times out.
    pub async fn health_check_async(
        docker: &Docker,
        endpoint: &str,
    ) -> Result<(), EngineProviderError> {
        Self::ping_with_timeout(docker, endpoint).await
    }

    /// Verify the container engine at `endpoint` is responsive.
    ///
    /// This is the synchronous version that creates a dedicated tokio runtime.
    /// Use [`Self::health_check_async`] when already in an async context.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::RuntimeCreationFailed` if the tokio runtime
    /// cannot be created, otherwise the errors of
    /// [`Self::health_check_async`].
    pub fn health_check(docker: &Docker, endpoint: &str) -> Result<(), EngineProviderError> {
        let rt = Self::create_runtime()?;
        rt.block_on(Self::health_check_async(docker, endpoint))
    }

    /// Create a tokio runtime for synchronous operations.
    pub(crate) fn create_runtime() -> Result<tokio::runtime::Runtime, EngineProviderError> {
        tokio::runtime::Runtime::new().map_err(|e| {
            EngineProviderError::from(ContainerError::RuntimeCreationFailed {
                message: e.to_string(),
            })
        })
    }
}
