//! Configuration loading with layered precedence.
//!
//! Precedence, lowest to highest: application defaults, configuration file,
//! environment variables, command-line arguments.
//!
//! Layers are composed with `MergeComposer` by hand because the `Cli` owns
//! subcommand dispatch, and because typed environment values must fail fast:
//! `ENGINE_PROVIDER_VERIFY=maybe` or `ENGINE_PROVIDER_PROVIDER=lxc` are
//! rejected with a `ConfigError::InvalidValue` instead of being ignored.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli, Commands, ResolveArgs};
use crate::error::{ConfigError, Result};
use crate::provider::ProviderPreference;

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Boolean value (`true`/`false`). Invalid values return an error.
    Bool,
    /// Provider preference (`auto`/`docker`/`podman`). Invalid values return an error.
    Provider,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `ENGINE_PROVIDER_ENGINE_SOCKET`).
    env_var: &'static str,
    /// The top-level configuration key.
    key: &'static str,
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "ENGINE_PROVIDER_ENGINE_SOCKET",
        key: "engine_socket",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "ENGINE_PROVIDER_PROVIDER",
        key: "provider",
        var_type: EnvVarType::Provider,
    },
    EnvVarSpec {
        env_var: "ENGINE_PROVIDER_VERIFY",
        key: "verify",
        var_type: EnvVarType::Bool,
    },
];

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `ENGINE_PROVIDER_*` variable the loader reads.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
///
/// Reads through `cap_std::fs_utf8`, opening the parent directory first.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path.parent().unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Load configuration with full layer precedence.
///
/// Sources, later overriding earlier:
/// 1. Application defaults
/// 2. Configuration file (`--config`, `ENGINE_PROVIDER_CONFIG_PATH` or discovery)
/// 3. `ENGINE_PROVIDER_*` environment variables
/// 4. Command-line arguments
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - Malformed configuration files
/// - Invalid typed environment variable values (e.g., an unknown provider in
///   `ENGINE_PROVIDER_PROVIDER`)
/// - Missing required fields after merge
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    // Layer 1: defaults.
    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    // Layer 2: configuration file.
    let config_path: Option<Utf8PathBuf> =
        cli.config.clone().filter(|p| p.exists()).or_else(|| {
            let discovery = ConfigDiscovery::builder("engine-provider")
                .env_var("ENGINE_PROVIDER_CONFIG_PATH")
                .config_file_name("config.toml")
                .dotfile_name(".engine-provider.toml")
                .build();
            discovery
                .candidates()
                .into_iter()
                .filter(|p| p.exists())
                .find_map(|p| Utf8PathBuf::try_from(p).ok())
        });

    if let Some(ref path) = config_path {
        load_config_file(path, &mut composer)?;
    }

    // Layer 3: environment.
    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    // Layer 4: CLI.
    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    Ok(config)
}

/// Collect the variables in [`ENV_VAR_SPECS`] into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed variable has an unparseable
/// value.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        root.insert(spec.key.to_owned(), parse_env_value(spec, raw_value)?);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Convert a raw environment value according to its spec.
fn parse_env_value(spec: &EnvVarSpec, raw_value: String) -> Result<Value> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: spec.env_var.to_owned(),
        reason,
    };
    match spec.var_type {
        EnvVarType::String => Ok(Value::String(raw_value)),
        EnvVarType::Bool => raw_value.parse::<bool>().map(Value::Bool).map_err(|_| {
            invalid(format!("expected bool (true/false), got '{raw_value}'")).into()
        }),
        EnvVarType::Provider => raw_value
            .parse::<ProviderPreference>()
            .map(|preference| Value::String(preference.as_str().to_owned()))
            .map_err(|e| invalid(e.to_string()).into()),
    }
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    if let Some(ref socket) = cli.engine_socket {
        overrides.insert("engine_socket".to_owned(), Value::String(socket.clone()));
    }

    if let Some(preference) = cli.provider {
        overrides.insert(
            "provider".to_owned(),
            Value::String(preference.as_str().to_owned()),
        );
    }

    if matches!(cli.command, Commands::Resolve(ResolveArgs { verify: true })) {
        overrides.insert("verify".to_owned(), Value::Bool(true));
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}
