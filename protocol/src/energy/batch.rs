//! Constructive-interference batching.
//!
//! Groups an ordered sequence by score proximity. A running group keeps the
//! mean score of its members; the next item joins when its score is within
//! `threshold` of that mean (strictly less), otherwise the group closes and
//! the item starts a new one. Order is preserved and every item lands in
//! exactly one group.
//!
//! The mean is kept from a running sum. The sum adds scores in group order,
//! the same order a full rescan would, so the grouping is identical.

use crate::transaction::{Transaction, TransactionError};

use super::scoring::energy_signature;

/// Group `items` by the proximity of `score(item)` to the running group mean.
///
/// # Errors
///
/// The first error returned by `score`; no partial result is returned.
pub fn batch_by_score<T, E, F>(items: &[T], threshold: f64, mut score: F) -> Result<Vec<Vec<T>>, E>
where
    T: Clone,
    F: FnMut(&T) -> Result<f64, E>,
{
    let mut batches = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut current_sum = 0.0;
    let mut current_mean: Option<f64> = None;

    for item in items {
        let energy = score(item)?;

        match current_mean {
            Some(mean) if (mean - energy).abs() < threshold => {
                current.push(item.clone());
                current_sum += energy;
                current_mean = Some(current_sum / current.len() as f64);
            }
            Some(_) => {
                batches.push(std::mem::take(&mut current));
                current.push(item.clone());
                current_sum = energy;
                current_mean = Some(energy);
            }
            None => {
                current.push(item.clone());
                current_sum = energy;
                current_mean = Some(energy);
            }
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }

    Ok(batches)
}

/// Batch transactions by energy signature.
///
/// # Errors
///
/// Fails on the first transaction that cannot be scored.
pub fn batch_transactions(
    transactions: &[Transaction],
    threshold: f64,
) -> Result<Vec<Vec<Transaction>>, TransactionError> {
    batch_by_score(transactions, threshold, energy_signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BATCH_THRESHOLD;
    use crate::transaction::TransactionBuilder;
    use std::convert::Infallible;

    fn by_value(items: &[f64], threshold: f64) -> Vec<Vec<f64>> {
        batch_by_score(items, threshold, |s| Ok::<_, Infallible>(*s)).unwrap()
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(by_value(&[], 0.85).is_empty());
    }

    #[test]
    fn single_item_forms_one_batch() {
        assert_eq!(by_value(&[0.3], 0.85), vec![vec![0.3]]);
    }

    #[test]
    fn far_score_starts_new_batch() {
        assert_eq!(
            by_value(&[0.5, 0.5, 2.0], 0.85),
            vec![vec![0.5, 0.5], vec![2.0]]
        );
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(by_value(&[0.0, 0.5], 0.5), vec![vec![0.0], vec![0.5]]);
    }

    #[test]
    fn running_mean_drifts_with_members() {
        // 0.0 → mean 0.0; 0.8 joins → mean 0.4; 1.2 is 0.8 from 0.4, joins.
        // Compared against the first score alone 1.2 would have been rejected.
        assert_eq!(
            by_value(&[0.0, 0.8, 1.2], 0.85),
            vec![vec![0.0, 0.8, 1.2]]
        );
    }

    #[test]
    fn new_batch_resets_mean() {
        assert_eq!(
            by_value(&[0.1, 3.0, 3.1, 0.2], 0.85),
            vec![vec![0.1], vec![3.0, 3.1], vec![0.2]]
        );
    }

    #[test]
    fn batches_partition_input_in_order() {
        let items: Vec<f64> = (0..40).map(|i| (i % 7) as f64 * 0.45).collect();
        let batches = by_value(&items, 0.85);
        let flattened: Vec<f64> = batches.into_iter().flatten().collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn transactions_batch_by_energy() {
        // amount 0, priority 0, no purpose → score 0.5 exactly.
        let low = |id: &str| {
            TransactionBuilder::new()
                .id(id)
                .amount(0.0)
                .time_priority(0.0)
                .build()
        };
        // ln(1e65 + 1) · 0.01 ≈ 1.497, score ≈ 2.0.
        let high = TransactionBuilder::new()
            .id("tx3")
            .amount(1e65)
            .time_priority(0.0)
            .build();

        let txs = vec![low("tx1"), low("tx2"), high.clone()];
        let batches = batch_transactions(&txs, DEFAULT_BATCH_THRESHOLD).unwrap();
        assert_eq!(batches, vec![vec![low("tx1"), low("tx2")], vec![high]]);
    }

    #[test]
    fn unscorable_transaction_fails_batch() {
        let txs = vec![
            TransactionBuilder::new().amount(1.0).build(),
            TransactionBuilder::new().purpose("no amount").build(),
        ];
        assert_eq!(
            batch_transactions(&txs, DEFAULT_BATCH_THRESHOLD),
            Err(TransactionError::MissingField { field: "amount" })
        );
    }
}
