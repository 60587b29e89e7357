//! End-to-end integration tests for the energy protocol.
//!
//! These drive the public API the way the node does: process transactions
//! into a shared field, read snapshots, batch, and round-trip signed
//! records through JSON. Each test builds its own processor and vault.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use energy_protocol::compliance::{generate_compliance_report, Iso20022Mapper};
use energy_protocol::energy::{EnergyProcessor, ProcessError};
use energy_protocol::network::{Network, NetworkError};
use energy_protocol::transaction::{Transaction, TransactionBuilder, TransactionError};
use energy_protocol::vault::{verify_transaction, SignedTransaction, Vault};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn reference_tx() -> Transaction {
    TransactionBuilder::new()
        .id("tx_001")
        .amount(100.0)
        .sender("alice")
        .receiver("bob")
        .purpose("payment for services")
        .build()
}

fn numbered_tx(i: usize) -> Transaction {
    TransactionBuilder::new()
        .id(&format!("tx_{i:04}"))
        .amount(i as f64 * 10.0)
        .sender("alice")
        .receiver("bob")
        .purpose(if i % 2 == 0 { "payment" } else { "fee" })
        .build()
}

// ---------------------------------------------------------------------------
// 1. Reference Scenario
// ---------------------------------------------------------------------------

#[test]
fn reference_scenario_end_to_end() {
    let processor = EnergyProcessor::new();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let result = processor.process_at(&reference_tx(), "XRP", now).unwrap();
    let expected = 101f64.ln() * 0.01 + 0.5 * 0.1 + 0.4;
    assert!((result.score - expected).abs() < 1e-9);

    let resonance = Network::Xrp.resonance();
    let secs = (std::f64::consts::FRAC_PI_2 - resonance.phase)
        .rem_euclid(std::f64::consts::TAU)
        / (std::f64::consts::TAU * resonance.frequency);
    let offset = result.optimal_time - now;
    assert!((offset.num_microseconds().unwrap() as f64 / 1e6 - secs).abs() < 1e-6);

    let snapshot = processor.snapshot();
    assert_eq!(snapshot.transaction_count, 1);
    assert!((snapshot.energy_sum - expected).abs() < 1e-9);

    let vault = Vault::generate().unwrap();
    let signed = vault.sign(&reference_tx(), "XRP").unwrap();
    assert!(vault.verify(&signed));
}

// ---------------------------------------------------------------------------
// 2. Field Accounting
// ---------------------------------------------------------------------------

#[test]
fn transaction_count_tracks_successful_calls_only() {
    let processor = EnergyProcessor::new();
    let mut ok = 0;
    for i in 0..20 {
        let network = if i % 5 == 0 { "DOGE" } else { "XLM" };
        if processor.process(&numbered_tx(i), network).is_ok() {
            ok += 1;
        }
    }
    processor
        .process(&TransactionBuilder::new().id("no-amount").build(), "XLM")
        .unwrap_err();

    assert_eq!(ok, 16);
    assert_eq!(processor.snapshot().transaction_count, ok);
    assert_eq!(processor.field().history().len(), ok);
}

#[test]
fn errors_are_typed() {
    let processor = EnergyProcessor::new();
    assert_eq!(
        processor.process(&reference_tx(), "xrp").unwrap_err(),
        ProcessError::Network(NetworkError::UnsupportedNetwork {
            network: "xrp".into()
        })
    );
    let negative = TransactionBuilder::new().amount(-1.0).build();
    assert_eq!(
        processor.process(&negative, "XRP").unwrap_err(),
        ProcessError::Transaction(TransactionError::NegativeAmount { amount: -1.0 })
    );
    assert_eq!(processor.snapshot().transaction_count, 0);
}

#[test]
fn concurrent_processing_is_fully_counted() {
    let processor = Arc::new(EnergyProcessor::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let processor = Arc::clone(&processor);
            std::thread::spawn(move || {
                for i in 0..25 {
                    let network = Network::ALL[(t + i) % 4].as_str();
                    processor.process(&numbered_tx(t * 100 + i), network).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(processor.snapshot().transaction_count, 200);
}

#[test]
fn coordinates_are_reproducible_across_instances() {
    let a = EnergyProcessor::new().process(&reference_tx(), "XRP").unwrap();
    let b = EnergyProcessor::new().process(&reference_tx(), "HBAR").unwrap();
    assert_eq!(a.coordinates, b.coordinates);
}

// ---------------------------------------------------------------------------
// 3. Batching
// ---------------------------------------------------------------------------

#[test]
fn batching_partitions_in_order() {
    let processor = EnergyProcessor::new();
    let txs: Vec<_> = (0..30).map(numbered_tx).collect();
    let batches = processor.batch(&txs).unwrap();
    let flattened: Vec<_> = batches.into_iter().flatten().collect();
    assert_eq!(flattened, txs);
    // Batching never touches the field.
    assert_eq!(processor.snapshot().transaction_count, 0);
}

// ---------------------------------------------------------------------------
// 4. Signed Records Over the Wire
// ---------------------------------------------------------------------------

#[test]
fn signed_record_survives_json_round_trip() {
    let vault = Vault::from_seed("integration seed");
    for network in Network::ALL {
        let signed = vault.sign(&reference_tx(), network.as_str()).unwrap();
        let wire = serde_json::to_string(&signed).unwrap();
        let received: SignedTransaction = serde_json::from_str(&wire).unwrap();
        assert!(verify_transaction(&received), "{network}");
    }
}

#[test]
fn tampered_json_fails_verification() {
    let vault = Vault::from_seed("integration seed");
    let signed = vault.sign(&reference_tx(), "XDC").unwrap();
    let mut json = serde_json::to_value(&signed).unwrap();
    json["to"] = "mallory".into();
    let received: SignedTransaction = serde_json::from_value(json).unwrap();
    assert!(!verify_transaction(&received));
}

#[test]
fn seed_restores_identical_vault() {
    let original = Vault::generate().unwrap();
    let restored = Vault::from_seed(original.seed());
    for network in Network::ALL {
        assert_eq!(
            original.public_key(network.as_str()).unwrap(),
            restored.public_key(network.as_str()).unwrap()
        );
    }
}

// ---------------------------------------------------------------------------
// 5. Compliance
// ---------------------------------------------------------------------------

#[test]
fn compliance_report_matches_processed_batch() {
    let processor = EnergyProcessor::new();
    let mapper = Iso20022Mapper::new();
    let now = Utc::now();

    let txs: Vec<_> = (1..=3).map(numbered_tx).collect();
    let messages: Vec<_> = txs.iter().map(|tx| mapper.to_iso20022(tx, now)).collect();
    for tx in &txs {
        processor.process(tx, "XRP").unwrap();
    }
    let report = generate_compliance_report(messages.len(), now);
    assert_eq!(report.total_transactions, 3);
    assert_eq!(messages[1].instructed_amount.amount, "20.0");
}
