//! Given/when steps for provider resolution scenarios.

use std::sync::atomic::Ordering;

use bollard::Docker;
use engine_provider::engine::EngineConnector;
use engine_provider::error::{ContainerError, EngineProviderError, ProviderError};
use engine_provider::provider::{
    ClientConnector, NetworkName, ProviderResolver, supports_podman_provider,
};
use rstest_bdd_macros::{given, when};

use super::StepResult;
use super::state::{ProviderResolutionState, ResolutionOutcome};

/// Endpoint whose client can be built without a daemon.
const TEST_ENDPOINT: &str = "tcp://localhost:2375";

/// Connector that either builds a real client or fails on demand.
struct StepConnector {
    fail: bool,
}

impl ClientConnector for StepConnector {
    fn build_client(&self, endpoint: &str) -> engine_provider::error::Result<Docker> {
        if self.fail {
            return Err(ContainerError::ConnectionFailed {
                message: format!("{endpoint}: connection refused"),
            }
            .into());
        }
        EngineConnector::connect(endpoint)
    }
}

fn outcome_from(result: engine_provider::error::Result<NetworkName>) -> ResolutionOutcome {
    match result {
        Ok(network) => ResolutionOutcome::Resolved(network),
        Err(EngineProviderError::Provider(ProviderError::InvalidPreference { .. })) => {
            ResolutionOutcome::InvalidPreference
        }
        Err(EngineProviderError::Container(ContainerError::ConnectionFailed { .. })) => {
            ResolutionOutcome::ConnectionFailed
        }
        Err(other) => ResolutionOutcome::Other(other.to_string()),
    }
}

#[given("the daemon host is {host}")]
fn given_daemon_host(provider_resolution_state: &ProviderResolutionState, host: String) {
    provider_resolution_state.host.set(host);
}

#[given("no daemon host is detected")]
fn given_no_daemon_host(provider_resolution_state: &ProviderResolutionState) {
    provider_resolution_state.host.set(String::new());
}

#[given("the provider preference is {preference}")]
fn given_preference(provider_resolution_state: &ProviderResolutionState, preference: String) {
    provider_resolution_state.preference.set(preference);
}

#[given("the engine client cannot be constructed")]
fn given_connector_fails(provider_resolution_state: &ProviderResolutionState) {
    provider_resolution_state.connector_fails.set(true);
}

#[given("the platform supports the Podman provider")]
fn given_podman_supported(provider_resolution_state: &ProviderResolutionState) -> StepResult<()> {
    let _ = provider_resolution_state;
    if !supports_podman_provider() {
        rstest_bdd::skip!("the Podman provider is not supported on this platform");
    }
    Ok(())
}

#[when("the provider is resolved")]
fn when_provider_resolved(provider_resolution_state: &ProviderResolutionState) -> StepResult<()> {
    let host = provider_resolution_state
        .host
        .get()
        .ok_or_else(|| String::from("host should be set"))?;
    let preference = provider_resolution_state
        .preference
        .get()
        .ok_or_else(|| String::from("preference should be set"))?;
    let calls = provider_resolution_state
        .classifier_calls
        .get()
        .ok_or_else(|| String::from("classifier call counter should be set"))?;
    let fail = provider_resolution_state
        .connector_fails
        .get()
        .unwrap_or(false);

    let classifier = move || {
        calls.fetch_add(1, Ordering::SeqCst);
        host.clone()
    };
    let resolver = ProviderResolver::with_connector(
        classifier,
        StepConnector { fail },
        String::from(TEST_ENDPOINT),
    );

    let result = resolver
        .resolve_str(&preference)
        .map(|provider| provider.default_network());
    provider_resolution_state.outcome.set(outcome_from(result));
    Ok(())
}
