//! Resonance timing.
//!
//! A network's resonance peaks whenever its phase reaches π/2. Given the
//! fixed frequency and phase offset, the wait until the next peak is
//!
//! ```text
//! time_to_peak = ((π/2 − phase) mod 2π) / (2π · frequency)
//! ```
//!
//! with `mod` taken as a Euclidean (non-negative) remainder.

use chrono::{DateTime, Duration, Utc};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Network, NetworkError, Resonance};

/// Seconds from a phase-zero instant until the resonance next peaks.
///
/// Always in `[0, 1/frequency)`.
pub fn time_to_peak(resonance: &Resonance) -> f64 {
    let mut seconds = (FRAC_PI_2 - resonance.phase).rem_euclid(TAU) / (TAU * resonance.frequency);
    // rem_euclid is non-negative; the guard only matters for a negative
    // frequency, which the table never holds.
    if seconds < 0.0 {
        seconds += 1.0 / resonance.frequency;
    }
    seconds
}

/// The next optimal execution instant on `network`, counted from `now`.
///
/// Sub-microsecond offsets are rounded to the nearest microsecond.
///
/// # Errors
///
/// [`NetworkError::UnsupportedNetwork`] if `network` is not in the table.
pub fn optimal_execution(network: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, NetworkError> {
    let network = Network::lookup(network)?;
    Ok(optimal_execution_for(network, now))
}

/// Infallible variant for an already-resolved [`Network`].
pub fn optimal_execution_for(network: Network, now: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = time_to_peak(&network.resonance());
    now + Duration::microseconds((seconds * 1e6).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::f64::consts::PI;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn xrp_time_to_peak_matches_formula() {
        let seconds = time_to_peak(&Network::Xrp.resonance());
        let expected = (PI / 2.0 - 0.1) / (2.0 * PI * 3.5);
        assert!((seconds - expected).abs() < 1e-12);
    }

    #[test]
    fn time_to_peak_is_within_one_period() {
        for network in Network::ALL {
            let r = network.resonance();
            let seconds = time_to_peak(&r);
            assert!(seconds >= 0.0);
            assert!(seconds < 1.0 / r.frequency);
        }
    }

    #[test]
    fn phase_past_peak_wraps_forward() {
        // phase = π wraps (π/2 − π) = −π/2 to 3π/2.
        let r = Resonance {
            frequency: 1.0,
            amplitude: 1.0,
            phase: PI,
        };
        let seconds = time_to_peak(&r);
        assert!((seconds - 0.75).abs() < 1e-12);
    }

    #[test]
    fn optimal_execution_is_in_the_future() {
        let now = fixed_now();
        let at = optimal_execution("HBAR", now).unwrap();
        assert!(at > now);
        assert!(at - now < Duration::seconds(1));
    }

    #[test]
    fn optimal_execution_offset_for_xrp() {
        let now = fixed_now();
        let at = optimal_execution("XRP", now).unwrap();
        let expected_us = ((PI / 2.0 - 0.1) / (2.0 * PI * 3.5) * 1e6).round() as i64;
        assert_eq!((at - now).num_microseconds(), Some(expected_us));
    }

    #[test]
    fn optimal_execution_rejects_unknown_network() {
        let err = optimal_execution("DOGE", fixed_now()).unwrap_err();
        assert_eq!(
            err,
            NetworkError::UnsupportedNetwork {
                network: "DOGE".into()
            }
        );
    }
}
