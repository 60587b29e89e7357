// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Energy Node
//!
//! Entry point for the `energy-node` binary. Parses CLI arguments,
//! initializes logging and metrics, and serves the HTTP API.
//!
//! The binary supports four subcommands:
//!
//! - `run`     — serve the API and the metrics endpoint
//! - `demo`    — process, sign and verify the reference transaction
//! - `seed`    — print a fresh vault seed
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use energy_protocol::compliance::Iso20022Mapper;
use energy_protocol::config::PROTOCOL_VERSION;
use energy_protocol::energy::EnergyProcessor;
use energy_protocol::transaction::TransactionBuilder;
use energy_protocol::vault::{generate_seed, Vault};

use cli::{Commands, EnergyNodeCli};
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = EnergyNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Demo(args) => run_demo(args),
        Commands::Seed => {
            let seed = generate_seed().context("failed to generate vault seed")?;
            println!("{seed}");
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Serves the API and metrics endpoints until a shutdown signal arrives.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(&args.log.log_level, args.log.format());

    tracing::info!(
        port = args.port,
        metrics_port = args.metrics_port,
        batch_threshold = args.batch_threshold,
        "starting energy-node"
    );

    // --- Vault ---
    let vault = match args.vault_seed {
        Some(seed) => {
            tracing::info!("using vault seed from configuration");
            Vault::from_seed(seed)
        }
        None => {
            tracing::warn!("no vault seed configured, generating an ephemeral one");
            Vault::generate().context("failed to create vault")?
        }
    };

    // --- Metrics ---
    let node_metrics = Arc::new(NodeMetrics::new());

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            PROTOCOL_VERSION,
        ),
        processor: Arc::new(EnergyProcessor::with_threshold(args.batch_threshold)),
        vault: Arc::new(vault),
        mapper: Iso20022Mapper::new(),
        metrics: Arc::clone(&node_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("energy-node stopped");
    Ok(())
}

/// Runs the reference scenario against a fresh processor and vault and
/// prints each step.
fn run_demo(args: cli::DemoArgs) -> Result<()> {
    logging::init_logging(&args.log.log_level, args.log.format());

    let tx = TransactionBuilder::new()
        .id("tx_001")
        .amount(100.0)
        .sender("wallet_alice")
        .receiver("wallet_bob")
        .purpose("payment for services")
        .timestamp("2024-01-01T10:00:00Z")
        .build();

    println!("Energy protocol demo");
    println!("{}", "=".repeat(50));
    println!(
        "Processing transaction {}",
        serde_json::to_string(&tx).context("failed to encode transaction")?
    );

    let processor = EnergyProcessor::new();
    let result = processor
        .process(&tx, &args.network)
        .with_context(|| format!("failed to process transaction on {}", args.network))?;

    println!("  Energy signature  : {:.4}", result.score);
    println!("  Optimal execution : {}", result.optimal_time.to_rfc3339());
    println!(
        "  Quantum state     : {:.6}{:+.6}i",
        result.quantum_state.re, result.quantum_state.im
    );
    println!("  Network           : {}", result.network);
    println!("  Field cell        : {:?}", result.coordinates);

    println!();
    println!("Vault");
    println!("{}", "-".repeat(30));

    let vault = Vault::generate().context("failed to create vault")?;
    let signed = vault
        .sign(&tx, &args.network)
        .context("failed to sign transaction")?;
    let signature = signed.signature.as_deref().unwrap_or_default();
    println!("  Signature         : {}...", &signature[..signature.len().min(32)]);
    println!(
        "  Verification      : {}",
        if vault.verify(&signed) { "VALID" } else { "INVALID" }
    );

    println!();
    println!("Energy field snapshot");
    println!("{}", "-".repeat(30));

    let snapshot = processor.snapshot();
    println!("  Magnitude mean    : {:.6}", snapshot.magnitude_mean);
    println!("  Phase mean        : {:.6}", snapshot.phase_mean);
    println!("  Energy sum        : {:.6}", snapshot.energy_sum);
    println!("  Transaction count : {}", snapshot.transaction_count);

    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("energy-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol    {}", PROTOCOL_VERSION);
    println!("rustc       {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
