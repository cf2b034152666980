//! Sanction Service - Core business logic
//!
//! `SanctionService` owns the frozen configuration and the governance
//! handle. All ledger state lives in the store carried by the
//! [`TxContext`](crate::context::TxContext) passed into each call.
//!
//! | File | Concern |
//! |------|---------|
//! | `sanctions.rs` | permanent entries, params, resolved status |
//! | `temporary.rs` | temporary entries and their proposal index |
//! | `gov_hooks.rs` | proposal lifecycle hook |
//! | `send_restriction.rs` | send-restriction gate |
//! | `msg_server.rs` | authority-gated messages |
//! | `queries.rs` | paginated read API |
//! | `genesis.rs` | snapshot import/export |

mod genesis;
mod gov_hooks;
mod msg_server;
pub mod queries;
mod sanctions;
mod send_restriction;
mod temporary;

use crate::config::SanctionConfig;
use crate::domain::Address;
use crate::ports::outbound::GovernanceReader;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Sanction ledger service
pub struct SanctionService<G>
where
    G: GovernanceReader,
{
    config: SanctionConfig,
    /// Frozen copy of `config.unsanctionable_addrs`.
    unsanctionable: HashSet<Address>,
    governance: Arc<G>,
}

impl<G> SanctionService<G>
where
    G: GovernanceReader,
{
    pub fn new(config: SanctionConfig, governance: Arc<G>) -> Self {
        let unsanctionable: HashSet<Address> =
            config.unsanctionable_addrs.iter().cloned().collect();
        info!(
            "[qc-18] Sanction service ready (authority: {}, {} unsanctionable addresses)",
            config.authority,
            unsanctionable.len()
        );
        Self {
            config,
            unsanctionable,
            governance,
        }
    }

    pub fn config(&self) -> &SanctionConfig {
        &self.config
    }

    /// Text form of the only signer accepted for governance messages.
    pub fn authority(&self) -> String {
        self.config.authority.to_string()
    }

    /// True if `addr` is in the configured unsanctionable set.
    pub fn is_addr_that_cannot_be_sanctioned(&self, addr: &Address) -> bool {
        self.unsanctionable.contains(addr)
    }

    pub fn governance(&self) -> &Arc<G> {
        &self.governance
    }
}
