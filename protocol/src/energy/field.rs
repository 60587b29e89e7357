//! The energy field: a fixed 1000×1000 grid of complex accumulators plus
//! an append-only history log.
//!
//! Every processed transaction lands in exactly one cell:
//!
//! ```text
//! x = trunc(score · 100) mod 1000
//! y = coordinate_hash(id, or canonical_real(score) when id is absent) mod 1000
//! ```
//!
//! and its quantum state is *added* to that cell. Cells only accumulate.
//!
//! ## Concurrency
//!
//! Cells and history sit behind one `parking_lot::RwLock`. An update holds
//! the write lock for the cell addition and the log append together, so a
//! snapshot (read lock) always sees a cell sum and a transaction count that
//! agree with each other. Additions commute, so concurrent writers may be
//! serialized in any order.
//!
//! ## Growth
//!
//! The grid is about 16 MiB and lives as long as the field does. The history
//! log grows by one entry per update and is never evicted.

use chrono::{DateTime, Utc};
use num_complex::Complex64;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{FIELD_CELLS, FIELD_DIMENSION, FIELD_X_SCALE};
use crate::crypto::coordinate_hash;
use crate::transaction::{canonical_real, Transaction};

// ---------------------------------------------------------------------------
// FieldEntry
// ---------------------------------------------------------------------------

/// One history-log record: what was added, where, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub transaction: Transaction,
    pub energy: f64,
    pub coordinates: (usize, usize),
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// EnergySnapshot
// ---------------------------------------------------------------------------

/// Aggregate view of the field at one point in time.
///
/// Means and sums run over all cells, untouched ones included. An untouched
/// cell contributes magnitude 0 and angle 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySnapshot {
    pub magnitude_mean: f64,
    pub phase_mean: f64,
    pub energy_sum: f64,
    pub transaction_count: usize,
}

// ---------------------------------------------------------------------------
// EnergyField
// ---------------------------------------------------------------------------

struct FieldState {
    /// Row-major: cell `(x, y)` is `cells[x * FIELD_DIMENSION + y]`.
    cells: Vec<Complex64>,
    history: Vec<FieldEntry>,
}

/// Thread-safe energy field. Share it with `Arc`.
pub struct EnergyField {
    state: RwLock<FieldState>,
}

impl fmt::Debug for EnergyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnergyField")
            .field("dimension", &FIELD_DIMENSION)
            .field("transaction_count", &self.transaction_count())
            .finish()
    }
}

impl Default for EnergyField {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyField {
    /// A zeroed field with an empty history.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FieldState {
                cells: vec![Complex64::new(0.0, 0.0); FIELD_CELLS],
                history: Vec::new(),
            }),
        }
    }

    /// The cell a transaction with this score lands in.
    ///
    /// `score` must be finite; scoring guarantees that.
    pub fn coordinates(tx: &Transaction, score: f64) -> (usize, usize) {
        let dim = FIELD_DIMENSION as i64;
        let x = ((score * FIELD_X_SCALE).trunc() as i64).rem_euclid(dim) as usize;

        let key = match &tx.id {
            Some(id) => id.clone(),
            None => canonical_real(score),
        };
        let y = (coordinate_hash(key.as_bytes()) % FIELD_DIMENSION as u64) as usize;

        debug_assert!(x < FIELD_DIMENSION && y < FIELD_DIMENSION);
        (x, y)
    }

    /// Accumulate `state` into the transaction's cell and log the update.
    ///
    /// Returns the cell coordinates.
    pub fn update(&self, tx: &Transaction, score: f64, state: Complex64) -> (usize, usize) {
        self.update_at(tx, score, state, Utc::now())
    }

    /// [`update`](Self::update) with an explicit log timestamp.
    pub fn update_at(
        &self,
        tx: &Transaction,
        score: f64,
        state: Complex64,
        at: DateTime<Utc>,
    ) -> (usize, usize) {
        let (x, y) = Self::coordinates(tx, score);

        let mut guard = self.state.write();
        guard.cells[x * FIELD_DIMENSION + y] += state;
        guard.history.push(FieldEntry {
            transaction: tx.clone(),
            energy: score,
            coordinates: (x, y),
            timestamp: at,
        });

        (x, y)
    }

    /// Consistent aggregate view, taken under the read lock.
    pub fn snapshot(&self) -> EnergySnapshot {
        let guard = self.state.read();

        let mut magnitude_sum = 0.0;
        let mut phase_sum = 0.0;
        for cell in &guard.cells {
            magnitude_sum += cell.norm();
            // atan2(0, 0) == 0, so untouched cells add nothing.
            phase_sum += cell.arg();
        }

        let n = FIELD_CELLS as f64;
        EnergySnapshot {
            magnitude_mean: magnitude_sum / n,
            phase_mean: phase_sum / n,
            energy_sum: magnitude_sum,
            transaction_count: guard.history.len(),
        }
    }

    /// Current value of one cell.
    ///
    /// # Panics
    ///
    /// If `x` or `y` is outside `[0, 1000)`.
    pub fn cell(&self, x: usize, y: usize) -> Complex64 {
        assert!(x < FIELD_DIMENSION && y < FIELD_DIMENSION, "cell out of range");
        self.state.read().cells[x * FIELD_DIMENSION + y]
    }

    /// Copy of the history log.
    pub fn history(&self) -> Vec<FieldEntry> {
        self.state.read().history.clone()
    }

    /// Number of updates applied so far.
    pub fn transaction_count(&self) -> usize {
        self.state.read().history.len()
    }
}
