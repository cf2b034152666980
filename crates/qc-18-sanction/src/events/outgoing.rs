//! Outgoing events for the Sanction subsystem
//!
//! Consumed by external indexing and observability.

use crate::domain::{Address, SANCTION_B, UNSANCTION_B};
use crate::error::InvariantViolation;
use serde::{Deserialize, Serialize};

/// State-change notification emitted by the sanction ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SanctionEvent {
    /// A permanent sanction was written.
    AddressSanctioned { address: String },
    /// A permanent sanction was removed.
    AddressUnsanctioned { address: String },
    /// A temporary sanction was written for a proposal.
    TempAddressSanctioned { address: String },
    /// A temporary unsanction was written for a proposal.
    TempAddressUnsanctioned { address: String },
    ParamsUpdated,
}

impl SanctionEvent {
    pub fn address_sanctioned(addr: &Address) -> Self {
        Self::AddressSanctioned {
            address: addr.to_string(),
        }
    }

    pub fn address_unsanctioned(addr: &Address) -> Self {
        Self::AddressUnsanctioned {
            address: addr.to_string(),
        }
    }

    /// Event for a temporary write of `value` (one of the marker bytes).
    pub fn new_temp_event(value: u8, addr: &Address) -> Result<Self, InvariantViolation> {
        let address = addr.to_string();
        match value {
            SANCTION_B => Ok(Self::TempAddressSanctioned { address }),
            UNSANCTION_B => Ok(Self::TempAddressUnsanctioned { address }),
            other => Err(InvariantViolation::UnknownTempValue(other)),
        }
    }

    /// Event type name, as used by indexers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddressSanctioned { .. } => "EventAddressSanctioned",
            Self::AddressUnsanctioned { .. } => "EventAddressUnsanctioned",
            Self::TempAddressSanctioned { .. } => "EventTempAddressSanctioned",
            Self::TempAddressUnsanctioned { .. } => "EventTempAddressUnsanctioned",
            Self::ParamsUpdated => "EventParamsUpdated",
        }
    }
}
