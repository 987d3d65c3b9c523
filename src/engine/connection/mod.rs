//! Socket resolution and container engine connection.
//!
//! This module resolves the container engine endpoint from configuration,
//! environment variables and platform defaults, and builds `Bollard` clients
//! for it. Endpoints are never probed here; a client is only a configured
//! handle until [`EngineConnector::health_check`] talks to the daemon.

mod error_classification;
mod health_check;

use bollard::Docker;
use tracing::debug;

use crate::error::EngineProviderError;

use error_classification::classify_connection_error;

/// Environment variable names checked in fallback order after configuration sources.
const FALLBACK_ENV_VARS: &[&str] = &["DOCKER_HOST", "CONTAINER_HOST", "PODMAN_HOST"];

/// Connection timeout in seconds for Docker/Podman API connections.
const CONNECTION_TIMEOUT_SECS: u64 = 120;

/// Timeout in seconds for health check operations.
pub(crate) const HEALTH_CHECK_TIMEOUT_SECS: u64 = 10;

/// Default socket path for Unix platforms.
#[cfg(unix)]
const DEFAULT_SOCKET: &str = "unix:///var/run/docker.sock";

/// Default socket path for Windows platforms.
#[cfg(windows)]
const DEFAULT_SOCKET: &str = "npipe:////./pipe/docker_engine";

/// Resolves container engine socket endpoints from environment variables.
///
/// # Type Parameters
///
/// * `E` - An environment provider implementing the `mockable::Env` trait,
///   allowing for testable environment variable access.
///
/// # Example
///
/// ```ignore
/// use mockable::DefaultEnv;
/// use engine_provider::engine::SocketResolver;
///
/// let env = DefaultEnv::new();
/// let resolver = SocketResolver::new(&env);
///
/// if let Some(socket) = resolver.resolve_from_env() {
///     println!("Found socket: {}", socket);
/// }
/// ```
pub struct SocketResolver<'a, E: mockable::Env> {
    env: &'a E,
}

impl<'a, E: mockable::Env> SocketResolver<'a, E> {
    /// Creates a new socket resolver with the given environment provider.
    #[must_use]
    pub const fn new(env: &'a E) -> Self {
        Self { env }
    }

    /// Resolves the socket endpoint from fallback environment variables.
    ///
    /// Checks `DOCKER_HOST`, `CONTAINER_HOST` and `PODMAN_HOST` in that
    /// order. Returns `None` if none is set or all are empty.
    #[must_use]
    pub fn resolve_from_env(&self) -> Option<String> {
        FALLBACK_ENV_VARS
            .iter()
            .filter_map(|var_name| self.env.string(var_name))
            .find(|value| !value.is_empty())
    }

    /// Returns the platform default socket path.
    #[must_use]
    pub const fn default_socket() -> &'static str {
        DEFAULT_SOCKET
    }
}

/// Classifies socket endpoint types for connection handling.
enum SocketType {
    /// Unix socket or Windows named pipe with explicit scheme.
    Socket,
    /// HTTP, HTTPS, or TCP endpoint (TCP is rewritten to HTTP).
    Http,
    /// Bare path without scheme prefix.
    BarePath,
}

impl SocketType {
    fn is_socket_scheme(socket: &str) -> bool {
        socket.starts_with("unix://") || socket.starts_with("npipe://")
    }

    fn is_http_scheme(socket: &str) -> bool {
        socket.starts_with("tcp://")
            || socket.starts_with("http://")
            || socket.starts_with("https://")
    }

    fn classify(socket: &str) -> Self {
        match (Self::is_socket_scheme(socket), Self::is_http_scheme(socket)) {
            (true, _) => Self::Socket,
            (_, true) => Self::Http,
            _ => Self::BarePath,
        }
    }
}

/// Builds `Bollard` clients for Docker-compatible and Podman-compatible
/// engines.
///
/// Podman exposes a Docker-compatible API, so both families share the same
/// client type.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConnector;

impl EngineConnector {
    /// Build a client for the engine at the specified endpoint.
    ///
    /// Supports the following endpoint formats:
    /// - Unix sockets: `unix:///path/to/socket`
    /// - Windows named pipes: `npipe:////./pipe/name`
    /// - TCP: `tcp://host:port` (treated as HTTP connection)
    /// - HTTP: `http://host:port`
    /// - HTTPS: `https://host:port`
    /// - Bare paths: paths starting with `\\` or `//` are treated as named
    ///   pipes, all others as Unix sockets. Detection is syntax-based, not
    ///   platform-based.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::SocketNotFound` or
    /// `ContainerError::PermissionDenied` when the socket path is the cause,
    /// and `ContainerError::ConnectionFailed` otherwise.
    pub fn connect(socket: &str) -> Result<Docker, EngineProviderError> {
        let socket_uri = Self::normalize_endpoint(socket);
        debug!(endpoint = %socket_uri, "building container engine client");

        let result = match SocketType::classify(&socket_uri) {
            SocketType::Http => {
                // Rewrite tcp:// to http:// for Bollard compatibility
                let http_socket = if socket_uri.starts_with("tcp://") {
                    socket_uri.replacen("tcp://", "http://", 1)
                } else {
                    socket_uri.clone()
                };
                Docker::connect_with_http(
                    &http_socket,
                    CONNECTION_TIMEOUT_SECS,
                    bollard::API_DEFAULT_VERSION,
                )
            }
            SocketType::Socket | SocketType::BarePath => Docker::connect_with_socket(
                &socket_uri,
                CONNECTION_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
        };

        result.map_err(|e| EngineProviderError::from(classify_connection_error(&e, &socket_uri)))
    }

    /// Returns the endpoint as a URI, adding a scheme to bare paths.
    #[must_use]
    pub fn normalize_endpoint(socket: &str) -> String {
        match SocketType::classify(socket) {
            SocketType::Socket | SocketType::Http => socket.to_owned(),
            SocketType::BarePath => Self::normalize_bare_path(socket),
        }
    }

    /// Normalize a bare socket path to a URI with the appropriate scheme.
    ///
    /// Paths starting with `\\` or `//` are assumed to be Windows named pipe
    /// paths and get `npipe://`; everything else gets `unix://`.
    fn normalize_bare_path(path: &str) -> String {
        // Named pipes typically start with \\ or // (e.g., \\.\pipe\docker_engine)
        if path.starts_with("\\\\") || path.starts_with("//") {
            format!("npipe://{path}")
        } else {
            format!("unix://{path}")
        }
    }

    /// Resolves the socket endpoint without establishing a connection.
    ///
    /// Resolution order:
    /// 1. `config_socket` (from CLI, config file, or `ENGINE_PROVIDER_ENGINE_SOCKET`)
    /// 2. `DOCKER_HOST`, `CONTAINER_HOST`, `PODMAN_HOST` (via resolver)
    /// 3. Platform default socket
    ///
    /// Empty values at any step are skipped.
    #[must_use]
    pub fn resolve_socket<E: mockable::Env>(
        config_socket: Option<&str>,
        resolver: &SocketResolver<'_, E>,
    ) -> String {
        config_socket
            .filter(|s| !s.is_empty())
            .map(String::from)
            .or_else(|| resolver.resolve_from_env())
            .unwrap_or_else(|| SocketResolver::<E>::default_socket().to_owned())
    }
}
