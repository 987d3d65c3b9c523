//! Scenario state for provider resolution behavioural tests.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use engine_provider::provider::NetworkName;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Outcome of a resolution attempt.
#[derive(Debug, Clone)]
pub(crate) enum ResolutionOutcome {
    /// A provider was returned with this default network.
    Resolved(NetworkName),
    /// The preference text was not recognised.
    InvalidPreference,
    /// The engine client could not be built.
    ConnectionFailed,
    /// Any other error, rendered for diagnostics.
    Other(String),
}

#[derive(Default, ScenarioState)]
pub(crate) struct ProviderResolutionState {
    pub(crate) host: Slot<String>,
    pub(crate) preference: Slot<String>,
    pub(crate) connector_fails: Slot<bool>,
    pub(crate) classifier_calls: Slot<Arc<AtomicUsize>>,
    pub(crate) outcome: Slot<ResolutionOutcome>,
}

#[fixture]
pub(crate) fn provider_resolution_state() -> ProviderResolutionState {
    let state = ProviderResolutionState::default();
    state.host.set(String::new());
    state.preference.set(String::from("auto"));
    state.connector_fails.set(false);
    state.classifier_calls.set(Arc::new(AtomicUsize::new(0)));
    state
}
