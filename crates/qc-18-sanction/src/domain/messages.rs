//! Governance-only messages
//!
//! Each message is signed by a single authority (the governance module
//! account). Addresses travel in their text form and are decoded on use.

use super::address::Address;
use super::coins::Coins;
use super::entities::Params;
use crate::error::{SanctionError, SanctionResult};
use serde::{Deserialize, Serialize};

fn decode_authority(authority: &str) -> SanctionResult<Address> {
    Address::parse(authority)
        .map_err(|e| SanctionError::invalid_address("authority", authority, e))
}

fn validate_addresses(addresses: &[String]) -> SanctionResult<()> {
    for (i, addr) in addresses.iter().enumerate() {
        Address::parse(addr)
            .map_err(|e| SanctionError::invalid_address(format!("addresses[{i}]"), addr, e))?;
    }
    Ok(())
}

/// Permanently sanction a set of addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSanction {
    pub addresses: Vec<String>,
    pub authority: String,
}

impl MsgSanction {
    pub fn new(authority: impl Into<String>, addrs: &[Address]) -> Self {
        Self {
            addresses: addrs.iter().map(Address::to_string).collect(),
            authority: authority.into(),
        }
    }

    /// Stateless checks: the authority and every address decode.
    pub fn validate_basic(&self) -> SanctionResult<()> {
        decode_authority(&self.authority)?;
        validate_addresses(&self.addresses)
    }

    pub fn signers(&self) -> SanctionResult<Vec<Address>> {
        Ok(vec![decode_authority(&self.authority)?])
    }
}

/// Remove permanent sanctions from a set of addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnsanction {
    pub addresses: Vec<String>,
    pub authority: String,
}

impl MsgUnsanction {
    pub fn new(authority: impl Into<String>, addrs: &[Address]) -> Self {
        Self {
            addresses: addrs.iter().map(Address::to_string).collect(),
            authority: authority.into(),
        }
    }

    pub fn validate_basic(&self) -> SanctionResult<()> {
        decode_authority(&self.authority)?;
        validate_addresses(&self.addresses)
    }

    pub fn signers(&self) -> SanctionResult<Vec<Address>> {
        Ok(vec![decode_authority(&self.authority)?])
    }
}

/// Replace the module params. `None` restores the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    pub params: Option<Params>,
    pub authority: String,
}

impl MsgUpdateParams {
    pub fn new(authority: impl Into<String>, sanction_min: Coins, unsanction_min: Coins) -> Self {
        Self {
            params: Some(Params::new(sanction_min, unsanction_min)),
            authority: authority.into(),
        }
    }

    pub fn validate_basic(&self) -> SanctionResult<()> {
        decode_authority(&self.authority)?;
        if let Some(params) = &self.params {
            params
                .validate()
                .map_err(|reason| SanctionError::InvalidParams { reason })?;
        }
        Ok(())
    }

    pub fn signers(&self) -> SanctionResult<Vec<Address>> {
        Ok(vec![decode_authority(&self.authority)?])
    }
}
