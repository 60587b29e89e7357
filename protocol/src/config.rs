//! # Protocol Configuration & Constants
//!
//! Every magic number in the energy engine and the vault lives here. If a
//! weight or a tag is hardcoded somewhere else, move it here.
//!
//! Changing any value in the "Wire Contract" section breaks compatibility
//! with signatures and field coordinates produced by earlier builds. The
//! scoring weights are safer to tune, but every persisted snapshot taken
//! before the change stops being comparable.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate-level protocol version, reported by the node's status endpoints.
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Version tag of the coordinate hash. Bump when [`crate::crypto::coordinate_hash`]
/// changes, since every field coordinate moves with it.
pub const COORDINATE_HASH_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// Energy Field
// ---------------------------------------------------------------------------

/// Side length of the square energy field. The field holds
/// `FIELD_DIMENSION * FIELD_DIMENSION` complex accumulators.
pub const FIELD_DIMENSION: usize = 1000;

/// Total number of cells in the energy field.
pub const FIELD_CELLS: usize = FIELD_DIMENSION * FIELD_DIMENSION;

/// Score multiplier used to derive the x coordinate: `x = trunc(score * 100) mod 1000`.
pub const FIELD_X_SCALE: f64 = 100.0;

// ---------------------------------------------------------------------------
// Scoring Weights
// ---------------------------------------------------------------------------

/// Weight applied to `ln(amount + 1)`.
pub const AMOUNT_WEIGHT: f64 = 0.01;

/// Weight applied to the transaction's time priority.
pub const TIME_PRIORITY_WEIGHT: f64 = 0.1;

/// Time priority assumed when a transaction does not carry one.
pub const DEFAULT_TIME_PRIORITY: f64 = 0.5;

/// Intent energy of a transaction with no purpose, and the starting point
/// for purposes that do have text.
pub const BASE_INTENT: f64 = 0.5;

/// Adjustment per matched intent word.
pub const INTENT_STEP: f64 = 0.1;

/// Lower clamp for intent energy.
pub const MIN_INTENT: f64 = 0.1;

/// Upper clamp for intent energy.
pub const MAX_INTENT: f64 = 1.0;

/// Purpose words that lower the intent energy. Matched as lowercase
/// substrings, no token boundaries.
pub const POSITIVE_INTENT_WORDS: [&str; 5] =
    ["payment", "transfer", "donation", "investment", "exchange"];

/// Purpose words that raise the intent energy.
pub const NEGATIVE_INTENT_WORDS: [&str; 4] = ["fee", "penalty", "withdrawal", "settlement"];

// ---------------------------------------------------------------------------
// Batching
// ---------------------------------------------------------------------------

/// Default score distance under which a transaction joins the running batch.
pub const DEFAULT_BATCH_THRESHOLD: f64 = 0.85;

// ---------------------------------------------------------------------------
// Vault & Wire Contract
// ---------------------------------------------------------------------------

/// Bytes of OS entropy drawn for a fresh vault seed.
pub const SEED_ENTROPY_BYTES: usize = 256;

/// HMAC key used to condition raw entropy into a seed.
pub const SEED_DOMAIN_TAG: &[u8] = b"quantum-seed";

/// Hex length of a generated seed (HMAC-SHA512 digest, 64 bytes).
pub const SEED_HEX_LENGTH: usize = 128;

/// Separator between fields of the canonical signing message.
pub const SIGNING_FIELD_SEPARATOR: &str = "|";

/// HMAC-SHA512 tag length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;
