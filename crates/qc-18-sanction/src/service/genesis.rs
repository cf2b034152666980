//! Genesis import and export

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::{Address, GenesisState, TempStatus, TemporaryEntry};
use crate::error::{InvariantViolation, SanctionError, SanctionResult};
use crate::ports::outbound::{GovernanceReader, KvStore};
use tracing::info;

fn into_genesis_error(err: SanctionError) -> SanctionError {
    if err.is_fatal() {
        return err;
    }
    InvariantViolation::InvalidGenesis(err.to_string()).into()
}

impl<G: GovernanceReader> SanctionService<G> {
    /// Load a snapshot: params, then permanent sanctions, then temporary
    /// entries in listed order. No events are emitted.
    ///
    /// Any failure is fatal; a chain cannot start from a bad snapshot.
    pub fn init_genesis<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        state: &GenesisState,
    ) -> SanctionResult<()> {
        state.validate().map_err(into_genesis_error)?;

        let was_muted = ctx.events().is_muted();
        ctx.events_mut().set_muted(true);
        let result = self.apply_genesis(ctx, state);
        ctx.events_mut().set_muted(was_muted);
        result.map_err(into_genesis_error)?;

        info!(
            "[qc-18] Genesis loaded: {} sanctioned addresses, {} temporary entries",
            state.sanctioned_addresses.len(),
            state.temporary_entries.len()
        );
        Ok(())
    }

    fn apply_genesis<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        state: &GenesisState,
    ) -> SanctionResult<()> {
        self.set_params(ctx, state.params.as_ref())?;

        let addrs = state
            .sanctioned_addresses
            .iter()
            .map(|a| Address::parse(a).map_err(|e| SanctionError::invalid_address("address", a, e)))
            .collect::<SanctionResult<Vec<_>>>()?;
        self.sanction_addresses(ctx, &addrs)?;

        for entry in &state.temporary_entries {
            let addr = Address::parse(&entry.address)
                .map_err(|e| SanctionError::invalid_address("address", &entry.address, e))?;
            let addrs = std::slice::from_ref(&addr);
            match entry.status {
                TempStatus::Sanctioned => {
                    self.add_temporary_sanction(ctx, entry.proposal_id, addrs)?
                }
                TempStatus::Unsanctioned => {
                    self.add_temporary_unsanction(ctx, entry.proposal_id, addrs)?
                }
                TempStatus::Unspecified => {
                    return Err(SanctionError::InvalidTempStatus {
                        field: "status".to_string(),
                        status: entry.status,
                    })
                }
            }
        }
        Ok(())
    }

    /// Snapshot of the current state, everything in key order.
    pub fn export_genesis<S: KvStore>(&self, ctx: &TxContext<S>) -> SanctionResult<GenesisState> {
        let state = GenesisState::new(
            Some(self.get_params(ctx)?),
            self.get_all_sanctioned_addresses(ctx)?,
            self.get_all_temporary_entries(ctx)?,
        );
        info!(
            "[qc-18] Genesis exported: {} sanctioned addresses, {} temporary entries",
            state.sanctioned_addresses.len(),
            state.temporary_entries.len()
        );
        Ok(state)
    }

    pub fn get_all_sanctioned_addresses<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
    ) -> SanctionResult<Vec<String>> {
        let mut rv = Vec::new();
        self.iterate_sanctioned_addresses(ctx, |addr| {
            rv.push(addr.to_string());
            false
        })?;
        Ok(rv)
    }

    pub fn get_all_temporary_entries<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
    ) -> SanctionResult<Vec<TemporaryEntry>> {
        let mut rv = Vec::new();
        self.iterate_temporary_entries(ctx, None, |addr, proposal_id, status| {
            rv.push(TemporaryEntry::new(addr, proposal_id, status));
            false
        })?;
        Ok(rv)
    }
}
