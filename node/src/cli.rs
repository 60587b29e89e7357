//! # CLI Interface
//!
//! Command-line arguments for `energy-node`, defined with `clap` derive.
//! Subcommands: `run`, `demo`, `seed` and `version`.

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Energy protocol node.
///
/// Serves the transaction energy engine and vault over HTTP and exposes
/// Prometheus metrics on a separate port.
#[derive(Parser, Debug)]
#[command(
    name = "energy-node",
    about = "Transaction energy engine and vault signing node",
    version,
    propagate_version = true
)]
pub struct EnergyNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API and the metrics endpoint.
    Run(RunArgs),
    /// Process the reference transaction, sign it, verify it and print the
    /// resulting field snapshot.
    Demo(DemoArgs),
    /// Print a freshly generated vault seed and exit.
    Seed,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the HTTP API.
    #[arg(long, env = "ENERGY_API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "ENERGY_METRICS_PORT", default_value_t = 9090)]
    pub metrics_port: u16,

    /// Vault seed to sign with.
    ///
    /// A fresh seed is generated when omitted, and lost on exit.
    #[arg(long, env = "ENERGY_VAULT_SEED", hide_env_values = true)]
    pub vault_seed: Option<String>,

    /// Batch proximity threshold used by `/batch` when the request omits one.
    #[arg(long, default_value_t = energy_protocol::config::DEFAULT_BATCH_THRESHOLD)]
    pub batch_threshold: f64,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Network to process and sign on.
    #[arg(long, default_value = "XRP")]
    pub network: String,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Logging options shared by long-running subcommands.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Log output format: `pretty` or `json`.
    #[arg(long, env = "ENERGY_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Default filter when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl LogArgs {
    pub fn format(&self) -> LogFormat {
        LogFormat::from_str_lossy(&self.log_format)
    }
}
