//! Core domain entities for the Sanction subsystem

use super::address::Address;
use super::coins::Coins;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored value byte marking an address as sanctioned.
pub const SANCTION_B: u8 = 0x01;

/// Stored value byte marking a temporary unsanction.
pub const UNSANCTION_B: u8 = 0x00;

/// Status of a temporary entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempStatus {
    /// No usable status. Never stored.
    #[default]
    #[serde(rename = "TEMP_STATUS_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "TEMP_STATUS_SANCTIONED")]
    Sanctioned,
    #[serde(rename = "TEMP_STATUS_UNSANCTIONED")]
    Unsanctioned,
}

impl TempStatus {
    /// Interpret an untrusted value: exactly one marker byte, else `Unspecified`.
    pub fn from_value(bz: &[u8]) -> Self {
        match bz {
            [SANCTION_B] => Self::Sanctioned,
            [UNSANCTION_B] => Self::Unsanctioned,
            _ => Self::Unspecified,
        }
    }

    /// The marker byte stored for this status. `Unspecified` has none.
    pub fn value_byte(self) -> Option<u8> {
        match self {
            Self::Sanctioned => Some(SANCTION_B),
            Self::Unsanctioned => Some(UNSANCTION_B),
            Self::Unspecified => None,
        }
    }

    pub fn is_specified(self) -> bool {
        self != Self::Unspecified
    }
}

impl fmt::Display for TempStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unspecified => "TEMP_STATUS_UNSPECIFIED",
            Self::Sanctioned => "TEMP_STATUS_SANCTIONED",
            Self::Unsanctioned => "TEMP_STATUS_UNSANCTIONED",
        })
    }
}

/// A temporary entry as exported and queried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryEntry {
    /// Hex text form of the address.
    pub address: String,
    pub proposal_id: u64,
    pub status: TempStatus,
}

impl TemporaryEntry {
    pub fn new(address: &Address, proposal_id: u64, status: TempStatus) -> Self {
        Self {
            address: address.to_string(),
            proposal_id,
            status,
        }
    }
}

/// Immediate-action thresholds
///
/// Once a proposal's deposit reaches the relevant minimum, its effect is
/// applied provisionally as temporary entries. Zero disables the behaviour.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub immediate_sanction_min_deposit: Coins,
    pub immediate_unsanction_min_deposit: Coins,
}

impl Params {
    pub fn new(sanction_min: Coins, unsanction_min: Coins) -> Self {
        Self {
            immediate_sanction_min_deposit: sanction_min,
            immediate_unsanction_min_deposit: unsanction_min,
        }
    }

    /// Both amounts must be normalized coin sets.
    pub fn validate(&self) -> Result<(), String> {
        self.immediate_sanction_min_deposit
            .validate()
            .map_err(|e| format!("invalid immediate sanction min deposit: {e}"))?;
        self.immediate_unsanction_min_deposit
            .validate()
            .map_err(|e| format!("invalid immediate unsanction min deposit: {e}"))?;
        Ok(())
    }
}
