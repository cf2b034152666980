//! Send-restriction gate
//!
//! Registered with the bank and consulted for the source of every
//! transfer leg.

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::Address;
use crate::error::{SanctionError, SanctionResult};
use crate::ports::inbound::SendRestriction;
use crate::ports::outbound::{GovernanceReader, KvStore};
use tracing::warn;

impl<G: GovernanceReader> SanctionService<G> {
    /// Allow the transfer unless the context bypasses the gate or `from` is
    /// sanctioned. The recipient is returned unchanged.
    pub fn check_send<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        from: &Address,
        to: &Address,
    ) -> SanctionResult<Address> {
        if ctx.has_bypass_sanction_restriction() {
            return Ok(to.clone());
        }
        if self.is_sanctioned_addr(ctx, from)? {
            warn!("[qc-18] Blocked send from sanctioned account {}", from);
            return Err(SanctionError::SanctionedAccount {
                address: from.clone(),
            });
        }
        Ok(to.clone())
    }
}

impl<G, S> SendRestriction<S> for SanctionService<G>
where
    G: GovernanceReader,
    S: KvStore,
{
    fn check_send(
        &self,
        ctx: &TxContext<S>,
        from: &Address,
        to: &Address,
    ) -> SanctionResult<Address> {
        SanctionService::check_send(self, ctx, from, to)
    }
}
