//! Assertion helpers for provider resolution behavioural tests.

use std::sync::atomic::Ordering;

use rstest_bdd_macros::then;

use super::StepResult;
use super::state::{ProviderResolutionState, ResolutionOutcome};

fn outcome(provider_resolution_state: &ProviderResolutionState) -> StepResult<ResolutionOutcome> {
    provider_resolution_state
        .outcome
        .get()
        .ok_or_else(|| String::from("outcome should be set"))
}

#[then("resolution succeeds")]
fn resolution_succeeds(provider_resolution_state: &ProviderResolutionState) -> StepResult<()> {
    match outcome(provider_resolution_state)? {
        ResolutionOutcome::Resolved(_) => Ok(()),
        ResolutionOutcome::Other(message) => Err(format!("resolution failed: {message}")),
        other => Err(format!("expected a provider, got {other:?}")),
    }
}

#[then("the default network is {expected}")]
fn default_network_is(
    provider_resolution_state: &ProviderResolutionState,
    expected: String,
) -> StepResult<()> {
    match outcome(provider_resolution_state)? {
        ResolutionOutcome::Resolved(network) if network.as_str() == expected => Ok(()),
        ResolutionOutcome::Resolved(network) => {
            Err(format!("expected network {expected}, got {network}"))
        }
        other => Err(format!("expected network {expected}, got {other:?}")),
    }
}

#[then("the daemon host was not consulted")]
fn daemon_host_not_consulted(
    provider_resolution_state: &ProviderResolutionState,
) -> StepResult<()> {
    let calls = provider_resolution_state
        .classifier_calls
        .get()
        .ok_or_else(|| String::from("classifier call counter should be set"))?;
    match calls.load(Ordering::SeqCst) {
        0 => Ok(()),
        n => Err(format!("expected no classifier calls, got {n}")),
    }
}

#[then("resolution fails with an invalid preference error")]
fn fails_with_invalid_preference(
    provider_resolution_state: &ProviderResolutionState,
) -> StepResult<()> {
    match outcome(provider_resolution_state)? {
        ResolutionOutcome::InvalidPreference => Ok(()),
        other => Err(format!("expected an invalid preference error, got {other:?}")),
    }
}

#[then("resolution fails with a connection error")]
fn fails_with_connection_error(
    provider_resolution_state: &ProviderResolutionState,
) -> StepResult<()> {
    match outcome(provider_resolution_state)? {
        ResolutionOutcome::ConnectionFailed => Ok(()),
        other => Err(format!("expected a connection error, got {other:?}")),
    }
}
