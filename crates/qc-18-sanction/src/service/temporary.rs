//! Temporary entries and their proposal index
//!
//! Every temporary entry `(addr, id) -> status` has a mirror
//! `(id, addr) -> status` in the proposal index. Both are written and
//! deleted in one atomic batch; nothing else in the crate touches either
//! prefix.

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::keys;
use crate::domain::{Address, TempStatus, SANCTION_B, UNSANCTION_B};
use crate::error::{InvariantViolation, SanctionError, SanctionResult};
use crate::events::SanctionEvent;
use crate::ports::outbound::{BatchOperation, GovernanceReader, KvStore, ScanOrder};
use tracing::{debug, warn};

impl<G: GovernanceReader> SanctionService<G> {
    /// Temporarily sanction `addrs` on behalf of proposal `proposal_id`.
    pub fn add_temporary_sanction<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
        addrs: &[Address],
    ) -> SanctionResult<()> {
        self.add_temp_entries(ctx, SANCTION_B, proposal_id, addrs)
    }

    /// Temporarily unsanction `addrs` on behalf of proposal `proposal_id`.
    pub fn add_temporary_unsanction<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
        addrs: &[Address],
    ) -> SanctionResult<()> {
        self.add_temp_entries(ctx, UNSANCTION_B, proposal_id, addrs)
    }

    /// Write a temporary entry and its index mirror for each address.
    ///
    /// A sanction-type write stops at the first unsanctionable address;
    /// earlier addresses stay written.
    pub(crate) fn add_temp_entries<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        value: u8,
        proposal_id: u64,
        addrs: &[Address],
    ) -> SanctionResult<()> {
        for addr in addrs {
            if value == SANCTION_B && self.is_addr_that_cannot_be_sanctioned(addr) {
                warn!(
                    "[qc-18] Refusing temporary sanction of unsanctionable address {} (proposal {})",
                    addr, proposal_id
                );
                return Err(SanctionError::UnsanctionableAddr {
                    address: addr.clone(),
                });
            }
            let event = SanctionEvent::new_temp_event(value, addr)?;
            ctx.store_mut().atomic_batch_write(vec![
                BatchOperation::put(keys::create_temporary_key(addr, proposal_id), [value]),
                BatchOperation::put(
                    keys::create_proposal_temp_index_key(proposal_id, addr),
                    [value],
                ),
            ])?;
            ctx.emit(event);
            debug!(
                "[qc-18] Temp entry {} for {} (proposal {})",
                TempStatus::from_value(&[value]),
                addr,
                proposal_id
            );
        }
        Ok(())
    }

    /// Status of the entry with the highest proposal id for `addr`.
    ///
    /// One reverse seek over the address's temporary prefix.
    pub fn get_latest_temp_entry<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        addr: &Address,
    ) -> SanctionResult<Option<TempStatus>> {
        if addr.is_empty() {
            return Ok(None);
        }
        let prefix = keys::create_temporary_addr_prefix(Some(addr));
        let latest = ctx
            .store()
            .prefix_scan(&prefix, ScanOrder::Reverse)?
            .next();
        match latest {
            None => Ok(None),
            Some((_, value)) => match value.as_slice() {
                [SANCTION_B] => Ok(Some(TempStatus::Sanctioned)),
                [UNSANCTION_B] => Ok(Some(TempStatus::Unsanctioned)),
                [other] => Err(InvariantViolation::UnknownTempValue(*other).into()),
                _ => Err(InvariantViolation::InvalidTempValueLength(value.len()).into()),
            },
        }
    }

    /// Remove every temporary entry (and mirror) created for `proposal_id`.
    pub fn delete_gov_prop_temp_entries<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()> {
        let prefix = keys::create_proposal_temp_index_prefix(Some(proposal_id));
        let index_keys: Vec<Vec<u8>> = ctx
            .store()
            .prefix_scan(&prefix, ScanOrder::Forward)?
            .map(|(k, _)| k)
            .collect();

        let mut batch = Vec::with_capacity(index_keys.len() * 2);
        for index_key in &index_keys {
            let (_, addr) = keys::parse_proposal_temp_index_key(index_key)?;
            batch.push(BatchOperation::delete(keys::create_temporary_key(&addr, proposal_id)));
            batch.push(BatchOperation::delete(index_key.clone()));
        }
        ctx.store_mut().atomic_batch_write(batch)?;
        if !index_keys.is_empty() {
            debug!(
                "[qc-18] Deleted {} temp entries of proposal {}",
                index_keys.len(),
                proposal_id
            );
        }
        Ok(())
    }

    /// Remove every temporary entry (and mirror) of each address.
    pub fn delete_addr_temp_entries<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        addrs: &[Address],
    ) -> SanctionResult<()> {
        for addr in addrs {
            let prefix = keys::create_temporary_addr_prefix(Some(addr));
            let temp_keys: Vec<Vec<u8>> = ctx
                .store()
                .prefix_scan(&prefix, ScanOrder::Forward)?
                .map(|(k, _)| k)
                .collect();

            let mut batch = Vec::with_capacity(temp_keys.len() * 2);
            for temp_key in &temp_keys {
                let (_, proposal_id) = keys::parse_temporary_key(temp_key)?;
                batch.push(BatchOperation::delete(
                    keys::create_proposal_temp_index_key(proposal_id, addr),
                ));
                batch.push(BatchOperation::delete(temp_key.clone()));
            }
            ctx.store_mut().atomic_batch_write(batch)?;
        }
        Ok(())
    }

    /// Visit temporary entries in key order, optionally restricted to one
    /// address, until `cb` returns `true`.
    pub fn iterate_temporary_entries<S, F>(
        &self,
        ctx: &TxContext<S>,
        addr: Option<&Address>,
        mut cb: F,
    ) -> SanctionResult<()>
    where
        S: KvStore,
        F: FnMut(&Address, u64, TempStatus) -> bool,
    {
        let prefix = keys::create_temporary_addr_prefix(addr);
        for (key, value) in ctx.store().prefix_scan(&prefix, ScanOrder::Forward)? {
            let (addr, proposal_id) = keys::parse_temporary_key(&key)?;
            if cb(&addr, proposal_id, keys::to_temp_status(&value)) {
                break;
            }
        }
        Ok(())
    }

    /// Visit proposal index entries in key order, optionally restricted to
    /// one proposal, until `cb` returns `true`.
    pub fn iterate_proposal_index_entries<S, F>(
        &self,
        ctx: &TxContext<S>,
        proposal_id: Option<u64>,
        mut cb: F,
    ) -> SanctionResult<()>
    where
        S: KvStore,
        F: FnMut(u64, &Address) -> bool,
    {
        let prefix = keys::create_proposal_temp_index_prefix(proposal_id);
        for (key, _) in ctx.store().prefix_scan(&prefix, ScanOrder::Forward)? {
            let (id, addr) = keys::parse_proposal_temp_index_key(&key)?;
            if cb(id, &addr) {
                break;
            }
        }
        Ok(())
    }
}
