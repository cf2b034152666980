//! Sanction subsystem configuration
//!
//! Values fixed at construction time. Nothing here is mutable afterwards.

use crate::domain::{Address, Coins, GenesisState, Params};
use std::env;
use thiserror::Error;
use tracing::{info, warn};

/// Default governance module account.
pub const DEFAULT_AUTHORITY: &[u8] = b"gov_module_account__";

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("authority address must not be empty")]
    EmptyAuthority,

    #[error("invalid default {name}: {reason}")]
    InvalidDefault { name: &'static str, reason: String },
}

/// Sanction subsystem configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanctionConfig {
    /// Only signer accepted for sanction, unsanction and params messages.
    pub authority: Address,
    /// Addresses that can never be sanctioned.
    pub unsanctionable_addrs: Vec<Address>,
    /// Used when no `immediate_sanction_min_deposit` param is stored.
    pub default_immediate_sanction_min_deposit: Coins,
    /// Used when no `immediate_unsanction_min_deposit` param is stored.
    pub default_immediate_unsanction_min_deposit: Coins,
}

impl Default for SanctionConfig {
    fn default() -> Self {
        Self {
            authority: Address::from_trusted(DEFAULT_AUTHORITY),
            unsanctionable_addrs: Vec::new(),
            default_immediate_sanction_min_deposit: Coins::empty(),
            default_immediate_unsanction_min_deposit: Coins::empty(),
        }
    }
}

impl SanctionConfig {
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            ..Self::default()
        }
    }

    pub fn with_unsanctionable_addrs(mut self, addrs: Vec<Address>) -> Self {
        self.unsanctionable_addrs = addrs;
        self
    }

    pub fn with_default_min_deposits(mut self, sanction: Coins, unsanction: Coins) -> Self {
        self.default_immediate_sanction_min_deposit = sanction;
        self.default_immediate_unsanction_min_deposit = unsanction;
        self
    }

    /// Defaults overridden from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_SANCTION_AUTHORITY`: hex authority address
    /// - `QC_SANCTION_UNSANCTIONABLE`: comma-separated hex addresses
    /// - `QC_SANCTION_IMMEDIATE_SANCTION_MIN_DEPOSIT`: coins, e.g. `1000stake`
    /// - `QC_SANCTION_IMMEDIATE_UNSANCTION_MIN_DEPOSIT`: coins
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(authority) = env::var("QC_SANCTION_AUTHORITY") {
            match Address::parse(authority.trim()) {
                Ok(addr) => {
                    info!("[qc-18] Loaded authority {} from environment", addr);
                    config.authority = addr;
                }
                Err(e) => warn!("[qc-18] Ignoring QC_SANCTION_AUTHORITY: {}", e),
            }
        }

        if let Ok(list) = env::var("QC_SANCTION_UNSANCTIONABLE") {
            let parsed: Result<Vec<_>, _> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Address::parse)
                .collect();
            match parsed {
                Ok(addrs) => config.unsanctionable_addrs = addrs,
                Err(e) => warn!("[qc-18] Ignoring QC_SANCTION_UNSANCTIONABLE: {}", e),
            }
        }

        if let Ok(coins) = env::var("QC_SANCTION_IMMEDIATE_SANCTION_MIN_DEPOSIT") {
            match Coins::parse_normalized(&coins) {
                Ok(c) => config.default_immediate_sanction_min_deposit = c,
                Err(e) => warn!(
                    "[qc-18] Ignoring QC_SANCTION_IMMEDIATE_SANCTION_MIN_DEPOSIT: {}",
                    e
                ),
            }
        }

        if let Ok(coins) = env::var("QC_SANCTION_IMMEDIATE_UNSANCTION_MIN_DEPOSIT") {
            match Coins::parse_normalized(&coins) {
                Ok(c) => config.default_immediate_unsanction_min_deposit = c,
                Err(e) => warn!(
                    "[qc-18] Ignoring QC_SANCTION_IMMEDIATE_UNSANCTION_MIN_DEPOSIT: {}",
                    e
                ),
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authority.is_empty() {
            return Err(ConfigError::EmptyAuthority);
        }
        self.default_immediate_sanction_min_deposit
            .validate()
            .map_err(|e| ConfigError::InvalidDefault {
                name: "immediate sanction min deposit",
                reason: e.to_string(),
            })?;
        self.default_immediate_unsanction_min_deposit
            .validate()
            .map_err(|e| ConfigError::InvalidDefault {
                name: "immediate unsanction min deposit",
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Params in effect when none are stored.
    pub fn default_params(&self) -> Params {
        Params::new(
            self.default_immediate_sanction_min_deposit.clone(),
            self.default_immediate_unsanction_min_deposit.clone(),
        )
    }

    /// Genesis state with the default params and nothing else.
    pub fn default_genesis(&self) -> GenesisState {
        GenesisState::new(Some(self.default_params()), Vec::new(), Vec::new())
    }
}
