//! Authority-gated message handlers
//!
//! Only the configured governance authority may sign these messages, so in
//! practice they run when a proposal carrying them passes.

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::{Address, MsgSanction, MsgUnsanction, MsgUpdateParams};
use crate::error::{SanctionError, SanctionResult};
use crate::ports::outbound::{GovernanceReader, KvStore};
use tracing::{info, warn};

fn decode_addresses(addresses: &[String]) -> SanctionResult<Vec<Address>> {
    addresses
        .iter()
        .enumerate()
        .map(|(i, a)| {
            Address::parse(a).map_err(|e| SanctionError::invalid_address(format!("address[{i}]"), a, e))
        })
        .collect()
}

impl<G: GovernanceReader> SanctionService<G> {
    fn require_authority(&self, actual: &str) -> SanctionResult<()> {
        let expected = self.authority();
        if actual != expected {
            warn!(
                "[qc-18] Rejected message signed by {:?}, expected {:?}",
                actual, expected
            );
            return Err(SanctionError::InvalidAuthority {
                expected,
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Handle [`MsgSanction`]: permanently sanction its addresses.
    pub fn sanction<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        msg: &MsgSanction,
    ) -> SanctionResult<()> {
        self.require_authority(&msg.authority)?;
        let addrs = decode_addresses(&msg.addresses)?;
        self.sanction_addresses(ctx, &addrs)?;
        info!("[qc-18] Sanctioned {} addresses", addrs.len());
        Ok(())
    }

    /// Handle [`MsgUnsanction`]: remove the permanent sanction of its addresses.
    pub fn unsanction<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        msg: &MsgUnsanction,
    ) -> SanctionResult<()> {
        self.require_authority(&msg.authority)?;
        let addrs = decode_addresses(&msg.addresses)?;
        self.unsanction_addresses(ctx, &addrs)?;
        info!("[qc-18] Unsanctioned {} addresses", addrs.len());
        Ok(())
    }

    /// Handle [`MsgUpdateParams`].
    pub fn update_params<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        msg: &MsgUpdateParams,
    ) -> SanctionResult<()> {
        self.require_authority(&msg.authority)?;
        self.set_params(ctx, msg.params.as_ref())?;
        info!("[qc-18] Params updated by governance");
        Ok(())
    }
}
