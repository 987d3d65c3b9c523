//! Provider selection for Docker-compatible and Podman-compatible engines.
//!
//! A caller declares a [`ProviderPreference`]; the [`ProviderResolver`] turns
//! it into a [`DockerProvider`] bound to the default bridge network of the
//! engine family that will actually serve it.
//!
//! Explicit preferences are authoritative. Only [`ProviderPreference::Auto`]
//! consults the [`HostClassifier`], and the classification is a plain
//! substring check for [`PODMAN_SOCKET_MARKER`] in the daemon host address.

mod classifier;
mod resolver;


use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::ProviderError;

pub use classifier::{EndpointSource, EnvHostClassifier, HostClassifier};
pub use resolver::{ClientConnector, DockerProvider, EnvProviderResolver, ProviderResolver};

/// Default network name of Docker-family engines.
pub const BRIDGE_NETWORK: &str = "bridge";

/// Default network name of Podman-family engines.
pub const PODMAN_NETWORK: &str = "podman";

/// Substring identifying a Podman-family daemon socket.
pub const PODMAN_SOCKET_MARKER: &str = "podman.sock";

/// Which engine family the caller asks for.
///
/// Configuration files and environment variables accept the same text as
/// [`FromStr`]: trimmed, case-insensitive, with `default` as an alias for
/// `auto`. The CLI matches case-insensitively as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPreference {
    /// Infer the engine family from the daemon host address.
    #[default]
    #[value(alias = "default")]
    Auto,
    /// Docker-compatible engine, regardless of the host address.
    Docker,
    /// Podman-compatible engine, regardless of the host address.
    Podman,
}

impl ProviderPreference {
    /// Returns the lowercase name used in configuration and CLI values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Docker => "docker",
            Self::Podman => "podman",
        }
    }

    /// Network fixed by an explicit preference, or `None` for `Auto`.
    #[must_use]
    pub const fn explicit_network(self) -> Option<NetworkName> {
        match self {
            Self::Auto => None,
            Self::Docker => Some(NetworkName::Bridge),
            Self::Podman => Some(NetworkName::Podman),
        }
    }
}

impl fmt::Display for ProviderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderPreference {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" | "default" => Ok(Self::Auto),
            "docker" => Ok(Self::Docker),
            "podman" => Ok(Self::Podman),
            _ => Err(ProviderError::InvalidPreference {
                value: value.to_owned(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ProviderPreference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Default bridge network a provider attaches containers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkName {
    /// Docker-family default bridge network ([`BRIDGE_NETWORK`]).
    Bridge,
    /// Podman-family default network ([`PODMAN_NETWORK`]).
    Podman,
}

impl NetworkName {
    /// Returns the network identifier the engine recognises.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bridge => BRIDGE_NETWORK,
            Self::Podman => PODMAN_NETWORK,
        }
    }

    /// Classifies a daemon host address.
    ///
    /// Addresses containing [`PODMAN_SOCKET_MARKER`] map to `Podman`; every
    /// other address, including the empty string, maps to `Bridge`.
    #[must_use]
    pub fn from_host(host: &str) -> Self {
        if host.contains(PODMAN_SOCKET_MARKER) {
            Self::Podman
        } else {
            Self::Bridge
        }
    }

    /// Selects the network for `preference`, classifying `host` only when
    /// the preference is `Auto`.
    ///
    /// An absent host under `Auto` classifies as `Bridge`.
    #[must_use]
    pub fn for_preference(preference: ProviderPreference, host: Option<&str>) -> Self {
        preference
            .explicit_network()
            .unwrap_or_else(|| Self::from_host(host.unwrap_or_default()))
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether the Podman provider can run on this platform.
///
/// Podman is only served over Unix sockets here; elsewhere an explicit
/// Podman request is rejected with `ProviderError::UnsupportedPlatform`.
#[must_use]
pub const fn supports_podman_provider() -> bool {
    cfg!(unix)
}
