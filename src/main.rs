//! `engine-provider` application entry point.
//!
//! Uses `eyre` for opaque error handling at the application boundary,
//! converting domain errors into human-readable reports.

use clap::Parser;
use engine_provider::config::{AppConfig, Cli, Commands, load_config};
use engine_provider::error::Result as ProviderResult;
use engine_provider::logging;
use engine_provider::provider::{EnvHostClassifier, HostClassifier, ProviderResolver};
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;

fn main() -> EyreResult<()> {
    logging::init();

    let cli = Cli::parse();
    let config = load_config(&cli).map_err(Report::from)?;

    run(&cli, &config).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
fn run(cli: &Cli, config: &AppConfig) -> ProviderResult<()> {
    let env = DefaultEnv::new();
    match cli.command {
        Commands::Resolve(_) => resolve(&env, config),
        Commands::Host => {
            print_host(&env, config);
            Ok(())
        }
    }
}

/// Resolve the configured provider and print it.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn resolve(env: &DefaultEnv, config: &AppConfig) -> ProviderResult<()> {
    let resolver = ProviderResolver::from_env(env, config.engine_socket.clone());
    let provider = if config.verify {
        resolver.resolve_and_verify(config.provider)?
    } else {
        resolver.resolve(config.provider)?
    };

    println!("provider: {}", provider.preference());
    println!("endpoint: {}", provider.endpoint());
    println!("network: {}", provider.default_bridge_network_name());
    Ok(())
}

/// Print the daemon host address used for autodetection.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_host(env: &DefaultEnv, config: &AppConfig) {
    let classifier = EnvHostClassifier::new(env, config.engine_socket.clone());
    println!("{}", classifier.classify_host());
}
