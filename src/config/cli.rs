//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use crate::provider::ProviderPreference;

/// Command-line interface for engine-provider.
#[derive(Debug, Parser)]
#[command(name = "engine-provider")]
#[command(
    author,
    version,
    about = "Resolve the Docker or Podman provider and its default bridge network"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Container engine socket path or URL.
    #[arg(long, global = true)]
    pub engine_socket: Option<String>,

    /// Provider to resolve.
    #[arg(long, global = true, value_enum, ignore_case = true)]
    pub provider: Option<ProviderPreference>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the provider and print its default network.
    Resolve(ResolveArgs),

    /// Print the daemon host address used for autodetection.
    Host,
}

/// Arguments for the `resolve` subcommand.
#[derive(Debug, Default, Parser)]
pub struct ResolveArgs {
    /// Ping the engine after resolving.
    #[arg(long)]
    pub verify: bool,
}
