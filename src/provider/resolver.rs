//! Provider resolution: preference + host classification -> provider handle.

use std::fmt;

use bollard::Docker;
use tracing::{debug, info, warn};

use super::{
    EndpointSource, EnvHostClassifier, HostClassifier, NetworkName, ProviderPreference,
    supports_podman_provider,
};
use crate::engine::EngineConnector;
use crate::error::{ProviderError, Result};

/// Builds the engine client a provider handle wraps.
///
/// This abstraction keeps resolution testable without a running daemon.
pub trait ClientConnector {
    /// Build a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a `ContainerError` when the client cannot be constructed.
    fn build_client(&self, endpoint: &str) -> Result<Docker>;
}

impl ClientConnector for EngineConnector {
    fn build_client(&self, endpoint: &str) -> Result<Docker> {
        Self::connect(endpoint)
    }
}

/// A resolved engine provider.
///
/// The client endpoint and the default network are decided in the same
/// resolution and cannot change afterwards.
#[derive(Clone)]
pub struct DockerProvider {
    client: Docker,
    endpoint: String,
    preference: ProviderPreference,
    default_network: NetworkName,
}

impl DockerProvider {
    /// The engine client.
    #[must_use]
    pub const fn client(&self) -> &Docker {
        &self.client
    }

    /// The endpoint the client was built for.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The preference this handle was resolved from.
    #[must_use]
    pub const fn preference(&self) -> ProviderPreference {
        self.preference
    }

    /// The default bridge network containers attach to.
    #[must_use]
    pub const fn default_network(&self) -> NetworkName {
        self.default_network
    }

    /// The default bridge network identifier, as the engine names it.
    #[must_use]
    pub const fn default_bridge_network_name(&self) -> &'static str {
        self.default_network.as_str()
    }
}

impl fmt::Debug for DockerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockerProvider")
            .field("endpoint", &self.endpoint)
            .field("preference", &self.preference)
            .field("default_network", &self.default_network)
            .finish_non_exhaustive()
    }
}

/// Resolves provider preferences into configured [`DockerProvider`] handles.
///
/// Precedence, first match wins:
///
/// 1. `Docker` selects the bridge network without consulting the classifier.
/// 2. `Podman` selects the Podman network without consulting the classifier,
///    or fails with `ProviderError::UnsupportedPlatform` where the platform
///    cannot serve Podman.
/// 3. `Auto` asks the classifier for the host address and selects the
///    Podman network when it names a Podman socket, bridge otherwise.
///
/// The resolver keeps no state between calls; each `Auto` resolution asks
/// the classifier again, and each resolution reads the endpoint source
/// again.
pub struct ProviderResolver<C, K = EngineConnector, P = String> {
    classifier: C,
    connector: K,
    endpoint: P,
    podman_supported: bool,
}

/// Resolver whose classifier and endpoint both follow the environment.
pub type EnvProviderResolver<'a, E> =
    ProviderResolver<EnvHostClassifier<'a, E>, EngineConnector, EnvHostClassifier<'a, E>>;

impl<C: HostClassifier> ProviderResolver<C> {
    /// Creates a resolver building `Bollard` clients for `endpoint`.
    #[must_use]
    pub const fn new(classifier: C, endpoint: String) -> Self {
        Self::with_connector(classifier, EngineConnector, endpoint)
    }
}

impl<'a, E: mockable::Env> EnvProviderResolver<'a, E> {
    /// Creates a resolver driven by configuration and the environment.
    ///
    /// The endpoint is resolved on every call with the same precedence the
    /// classifier uses, so a handle never pairs a client with a network
    /// classified from a different host.
    #[must_use]
    pub fn from_env(env: &'a E, config_socket: Option<String>) -> Self {
        Self {
            classifier: EnvHostClassifier::new(env, config_socket.clone()),
            connector: EngineConnector,
            endpoint: EnvHostClassifier::new(env, config_socket),
            podman_supported: supports_podman_provider(),
        }
    }
}

impl<C: HostClassifier, K: ClientConnector> ProviderResolver<C, K> {
    /// Creates a resolver with a custom client connector.
    #[must_use]
    pub const fn with_connector(classifier: C, connector: K, endpoint: String) -> Self {
        Self {
            classifier,
            connector,
            endpoint,
            podman_supported: supports_podman_provider(),
        }
    }
}

impl<C: HostClassifier, K: ClientConnector, P: EndpointSource> ProviderResolver<C, K, P> {
    /// Overrides whether `Podman` can be served, which defaults to
    /// [`supports_podman_provider`].
    #[must_use]
    pub fn with_podman_support(self, supported: bool) -> Self {
        Self {
            podman_supported: supported,
            ..self
        }
    }

    /// The endpoint clients are currently built for.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.endpoint.endpoint()
    }

    /// Selects the default network for `preference`.
    ///
    /// Never fails; the classifier is only consulted for `Auto`.
    #[must_use]
    pub fn select_network(&self, preference: ProviderPreference) -> NetworkName {
        let host = preference
            .explicit_network()
            .is_none()
            .then(|| self.classifier.classify_host());
        let network = NetworkName::for_preference(preference, host.as_deref());
        debug!(
            %preference,
            host = host.as_deref().unwrap_or("<not consulted>"),
            %network,
            "selected default network"
        );
        network
    }

    /// Resolves `preference` into a provider handle.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::UnsupportedPlatform` for `Podman` where the
    /// platform cannot serve it, and the connector's
    /// `ContainerError` when the client cannot be built.
    pub fn resolve(&self, preference: ProviderPreference) -> Result<DockerProvider> {
        if preference == ProviderPreference::Podman && !self.podman_supported {
            warn!(%preference, "provider not supported on this platform");
            return Err(ProviderError::UnsupportedPlatform {
                provider: preference.to_string(),
            }
            .into());
        }

        let endpoint = self.endpoint.endpoint();
        let default_network = self.select_network(preference);
        let client = self.connector.build_client(&endpoint)?;
        info!(
            %preference,
            %endpoint,
            network = %default_network,
            "resolved container engine provider"
        );

        Ok(DockerProvider {
            client,
            endpoint,
            preference,
            default_network,
        })
    }

    /// Parses a textual preference, then resolves it.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidPreference` for unknown values, and the
    /// errors of [`Self::resolve`] otherwise.
    pub fn resolve_str(&self, preference: &str) -> Result<DockerProvider> {
        let parsed: ProviderPreference = preference.parse()?;
        self.resolve(parsed)
    }

    /// Resolves `preference` and checks the engine answers (async version).
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::resolve`], then
    /// `ContainerError::HealthCheckFailed`, `HealthCheckTimeout`,
    /// `SocketNotFound` or `PermissionDenied` when the engine is unreachable.
    pub async fn resolve_and_verify_async(
        &self,
        preference: ProviderPreference,
    ) -> Result<DockerProvider> {
        let provider = self.resolve(preference)?;
        EngineConnector::health_check_async(provider.client(), provider.endpoint()).await?;
        Ok(provider)
    }

    /// Resolves `preference` and checks the engine answers.
    ///
    /// Creates a dedicated tokio runtime; use
    /// [`Self::resolve_and_verify_async`] inside an async context.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::RuntimeCreationFailed` if the runtime cannot
    /// be created, otherwise the errors of [`Self::resolve_and_verify_async`].
    pub fn resolve_and_verify(&self, preference: ProviderPreference) -> Result<DockerProvider> {
        // Rejections need no runtime.
        let provider = self.resolve(preference)?;
        let rt = EngineConnector::create_runtime()?;
        rt.block_on(EngineConnector::health_check_async(
            provider.client(),
            provider.endpoint(),
        ))?;
        Ok(provider)
    }
}
