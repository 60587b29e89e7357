//! Network identifiers and the static resonance table.
//!
//! Each network carries a sinusoidal timing model `amplitude * sin(2π·f·t + phase)`.
//! The table is compiled in and immutable for the process lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::NetworkError;

// ---------------------------------------------------------------------------
// Resonance
// ---------------------------------------------------------------------------

/// Resonance parameters for one network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resonance {
    /// Oscillation frequency in Hz. Always positive.
    pub frequency: f64,
    /// Peak amplitude in `[0, 1]`. Informational; timing ignores it.
    pub amplitude: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// A supported network identifier.
///
/// Serialized as its ticker (`"XRP"`, `"XLM"`, `"XDC"`, `"HBAR"`). Parsing
/// is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "XRP")]
    Xrp,
    #[serde(rename = "XLM")]
    Xlm,
    #[serde(rename = "XDC")]
    Xdc,
    #[serde(rename = "HBAR")]
    Hbar,
}

impl Network {
    /// Every supported network, in table order.
    pub const ALL: [Network; 4] = [Network::Xrp, Network::Xlm, Network::Xdc, Network::Hbar];

    /// The ticker used on the wire and as the key-derivation tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xrp => "XRP",
            Self::Xlm => "XLM",
            Self::Xdc => "XDC",
            Self::Hbar => "HBAR",
        }
    }

    /// The network's fixed resonance parameters.
    pub fn resonance(&self) -> Resonance {
        match self {
            Self::Xrp => Resonance {
                frequency: 3.5,
                amplitude: 0.8,
                phase: 0.1,
            },
            Self::Xlm => Resonance {
                frequency: 4.2,
                amplitude: 0.7,
                phase: 0.3,
            },
            Self::Xdc => Resonance {
                frequency: 2.8,
                amplitude: 0.9,
                phase: 0.2,
            },
            Self::Hbar => Resonance {
                frequency: 5.1,
                amplitude: 0.85,
                phase: 0.4,
            },
        }
    }

    /// Resolve an identifier, failing on anything outside the table.
    pub fn lookup(identifier: &str) -> Result<Self, NetworkError> {
        identifier.parse()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| NetworkError::UnsupportedNetwork {
                network: s.to_string(),
            })
    }
}
