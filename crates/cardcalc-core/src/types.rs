//! # Domain Types
//!
//! Identifier types shared by the catalog, the ledger and sessions.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Network      │   │  Denomination   │   │     Price       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  MTN            │   │  face value     │   │  naira (i64)    │       │
//! │  │  Airtel         │   │  100, 200, ...  │   │  unit price     │       │
//! │  │  GLO            │   │  always > 0     │   │  always >= 0    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  (Network, Denomination) is the key for both the catalog and the       │
//! │  ledger. Network is closed: unknown carriers cannot enter the catalog. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Unit price in whole naira.
pub type Price = i64;

// =============================================================================
// Network
// =============================================================================

/// A telecom carrier.
///
/// Declaration order is display order; `Ord` follows it so catalogs keyed by
/// network list MTN first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum Network {
    #[serde(rename = "MTN")]
    Mtn,
    #[serde(rename = "Airtel")]
    Airtel,
    #[serde(rename = "GLO")]
    Glo,
}

impl Network {
    /// Every network, in display order.
    pub const ALL: [Network; 3] = [Network::Mtn, Network::Airtel, Network::Glo];

    /// Wire and display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Network::Mtn => "MTN",
            Network::Airtel => "Airtel",
            Network::Glo => "GLO",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ValidationError;

    /// Parses a wire name. Matching is exact after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "network".to_string(),
            });
        }

        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "network".to_string(),
                allowed: Network::ALL.iter().map(|n| n.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// Face value of a recharge card.
///
/// Serialized as a bare number; as a JSON object key it becomes a string
/// (`{"100": 98}`), which is how the catalog is stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Denomination(u32);

impl Denomination {
    /// Wraps a face value. Use [`crate::validation::validate_denomination`]
    /// when the value comes from user input.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Denomination(value)
    }

    /// Returns the face value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Denomination {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| ValidationError::InvalidFormat {
                field: "denomination".to_string(),
                reason: e.to_string(),
            })?;
        crate::validation::validate_denomination(value)?;
        Ok(Denomination(value))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
