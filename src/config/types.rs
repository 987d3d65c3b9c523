//! Configuration data types.

use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

use crate::provider::ProviderPreference;

/// Root application configuration.
///
/// Loaded from defaults, configuration file, environment variables and
/// command-line arguments, in increasing order of precedence.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `ENGINE_PROVIDER_CONFIG_PATH`
/// 2. `.engine-provider.toml` in the current working directory
/// 3. `.engine-provider.toml` in the home directory
/// 4. `~/.config/engine-provider/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "ENGINE_PROVIDER",
    post_merge_hook,
    discovery(
        app_name = "engine-provider",
        env_var = "ENGINE_PROVIDER_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".engine-provider.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// The container engine socket path or URL.
    pub engine_socket: Option<String>,

    /// Which engine family to resolve.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub provider: ProviderPreference,

    /// Ping the engine after resolving the provider.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub verify: bool,
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        // A blank socket means "not configured" so the environment fallback
        // chain still applies.
        if self
            .engine_socket
            .as_deref()
            .is_some_and(|socket| socket.trim().is_empty())
        {
            self.engine_socket = None;
        }
        Ok(())
    }
}
