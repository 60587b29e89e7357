//! Quantum state construction.
//!
//! Not quantum anything: a score `s` maps to the complex number
//! `s · e^(i·2π·s)`, a rotation by the score's own fraction of a turn
//! scaled by the score.

use num_complex::Complex64;
use std::f64::consts::TAU;

/// The complex "quantum state" of a score.
pub fn quantum_state(score: f64) -> Complex64 {
    Complex64::from_polar(score, score * TAU)
}
