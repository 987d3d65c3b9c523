//! Host classification seam.

use crate::engine::{EngineConnector, SocketResolver};

/// Reports the daemon host address currently in effect.
///
/// The resolver consults this only for [`super::ProviderPreference::Auto`].
/// An empty string means no host could be detected. Any `Fn() -> String`
/// closure is a classifier, which keeps tests free of real environment
/// probing.
pub trait HostClassifier {
    /// Returns the daemon host address, e.g. `unix:///run/podman/podman.sock`.
    fn classify_host(&self) -> String;
}

impl<F> HostClassifier for F
where
    F: Fn() -> String,
{
    fn classify_host(&self) -> String {
        self()
    }
}

/// Supplies the endpoint a resolver builds clients for.
///
/// A plain `String` is a fixed endpoint. Environment-backed sources resolve
/// it again on each call, so the client and the classified host come from
/// the same environment state.
pub trait EndpointSource {
    /// Returns the engine endpoint, e.g. `unix:///var/run/docker.sock`.
    fn endpoint(&self) -> String;
}

impl EndpointSource for String {
    fn endpoint(&self) -> String {
        self.clone()
    }
}

/// Classifier backed by configuration and the process environment.
///
/// Reports the configured socket when set, then `DOCKER_HOST`,
/// `CONTAINER_HOST` and `PODMAN_HOST`, then the platform default. The
/// environment is read again on every call.
pub struct EnvHostClassifier<'a, E: mockable::Env> {
    env: &'a E,
    config_socket: Option<String>,
}

impl<'a, E: mockable::Env> EnvHostClassifier<'a, E> {
    /// Creates a classifier over `env` with an optional configured socket.
    #[must_use]
    pub const fn new(env: &'a E, config_socket: Option<String>) -> Self {
        Self { env, config_socket }
    }
}

impl<E: mockable::Env> HostClassifier for EnvHostClassifier<'_, E> {
    fn classify_host(&self) -> String {
        let resolver = SocketResolver::new(self.env);
        EngineConnector::resolve_socket(self.config_socket.as_deref(), &resolver)
    }
}

impl<E: mockable::Env> EndpointSource for EnvHostClassifier<'_, E> {
    fn endpoint(&self) -> String {
        self.classify_host()
    }
}
