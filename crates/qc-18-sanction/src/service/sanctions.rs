//! Permanent sanctions, params and resolved status

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::keys::{
    self, PARAM_NAME_IMMEDIATE_SANCTION_MIN_DEPOSIT, PARAM_NAME_IMMEDIATE_UNSANCTION_MIN_DEPOSIT,
};
use crate::domain::{Address, Coins, Params, TempStatus, SANCTION_B};
use crate::error::{InvariantViolation, SanctionError, SanctionResult};
use crate::events::SanctionEvent;
use crate::ports::outbound::{GovernanceReader, KvStore, ScanOrder};
use tracing::{debug, warn};

/// Parse a stored coin string. Empty means zero; garbage means `default`.
pub(crate) fn to_coins_or_default(coins: &str, default: &Coins) -> Coins {
    if coins.is_empty() {
        return Coins::empty();
    }
    Coins::parse_normalized(coins).unwrap_or_else(|_| default.clone())
}

impl<G: GovernanceReader> SanctionService<G> {
    /// Resolved sanction status of `addr`.
    ///
    /// The temporary entry with the highest proposal id wins over the
    /// permanent entry. Empty and unsanctionable addresses are never
    /// sanctioned.
    pub fn is_sanctioned_addr<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        addr: &Address,
    ) -> SanctionResult<bool> {
        if addr.is_empty() || self.is_addr_that_cannot_be_sanctioned(addr) {
            return Ok(false);
        }
        match self.get_latest_temp_entry(ctx, addr)? {
            Some(TempStatus::Sanctioned) => Ok(true),
            Some(_) => Ok(false),
            None => Ok(ctx.store().exists(&keys::create_sanctioned_addr_key(addr))?),
        }
    }

    /// Permanently sanction each address, in order.
    ///
    /// Stops at the first unsanctionable address. Addresses before it stay
    /// written; discarding them is up to the surrounding transaction.
    pub fn sanction_addresses<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        addrs: &[Address],
    ) -> SanctionResult<()> {
        for addr in addrs {
            if self.is_addr_that_cannot_be_sanctioned(addr) {
                warn!("[qc-18] Refusing to sanction unsanctionable address {}", addr);
                return Err(SanctionError::UnsanctionableAddr {
                    address: addr.clone(),
                });
            }
            ctx.store_mut()
                .set(&keys::create_sanctioned_addr_key(addr), &[SANCTION_B])?;
            ctx.emit(SanctionEvent::address_sanctioned(addr));
            debug!("[qc-18] Sanctioned {}", addr);
            self.delete_addr_temp_entries(ctx, std::slice::from_ref(addr))?;
        }
        Ok(())
    }

    /// Remove the permanent sanction of each address. Never rejected.
    pub fn unsanction_addresses<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        addrs: &[Address],
    ) -> SanctionResult<()> {
        for addr in addrs {
            ctx.store_mut()
                .delete(&keys::create_sanctioned_addr_key(addr))?;
            ctx.emit(SanctionEvent::address_unsanctioned(addr));
            debug!("[qc-18] Unsanctioned {}", addr);
            self.delete_addr_temp_entries(ctx, std::slice::from_ref(addr))?;
        }
        Ok(())
    }

    /// Visit permanently sanctioned addresses in key order until `cb`
    /// returns `true`.
    pub fn iterate_sanctioned_addresses<S, F>(
        &self,
        ctx: &TxContext<S>,
        mut cb: F,
    ) -> SanctionResult<()>
    where
        S: KvStore,
        F: FnMut(&Address) -> bool,
    {
        let iter = ctx
            .store()
            .prefix_scan(&[keys::SANCTIONED_PREFIX], ScanOrder::Forward)?;
        for (key, _) in iter {
            let addr = keys::parse_sanctioned_addr_key(&key)?;
            if cb(&addr) {
                break;
            }
        }
        Ok(())
    }

    /// Stored params, each falling back to its configured default.
    pub fn get_params<S: KvStore>(&self, ctx: &TxContext<S>) -> SanctionResult<Params> {
        let mut rv = self.config.default_params();
        let mut unknown = None;
        self.iterate_params(ctx, |name, value| {
            match name {
                PARAM_NAME_IMMEDIATE_SANCTION_MIN_DEPOSIT => {
                    rv.immediate_sanction_min_deposit = to_coins_or_default(
                        value,
                        &self.config.default_immediate_sanction_min_deposit,
                    );
                }
                PARAM_NAME_IMMEDIATE_UNSANCTION_MIN_DEPOSIT => {
                    rv.immediate_unsanction_min_deposit = to_coins_or_default(
                        value,
                        &self.config.default_immediate_unsanction_min_deposit,
                    );
                }
                other => {
                    unknown = Some(other.to_string());
                    return true;
                }
            }
            false
        })?;
        if let Some(name) = unknown {
            return Err(InvariantViolation::UnknownParamName(name).into());
        }
        Ok(rv)
    }

    /// Store `params`, or delete every param entry when `None`.
    pub fn set_params<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        params: Option<&Params>,
    ) -> SanctionResult<()> {
        match params {
            None => {
                self.delete_param(ctx, PARAM_NAME_IMMEDIATE_SANCTION_MIN_DEPOSIT)?;
                self.delete_param(ctx, PARAM_NAME_IMMEDIATE_UNSANCTION_MIN_DEPOSIT)?;
                debug!("[qc-18] Params reset to defaults");
            }
            Some(params) => {
                self.set_param(
                    ctx,
                    PARAM_NAME_IMMEDIATE_SANCTION_MIN_DEPOSIT,
                    &params.immediate_sanction_min_deposit.to_string(),
                )?;
                self.set_param(
                    ctx,
                    PARAM_NAME_IMMEDIATE_UNSANCTION_MIN_DEPOSIT,
                    &params.immediate_unsanction_min_deposit.to_string(),
                )?;
                debug!(
                    "[qc-18] Params updated: sanction min {:?}, unsanction min {:?}",
                    params.immediate_sanction_min_deposit.to_string(),
                    params.immediate_unsanction_min_deposit.to_string()
                );
            }
        }
        ctx.emit(SanctionEvent::ParamsUpdated);
        Ok(())
    }

    /// Visit stored params in key order until `cb` returns `true`.
    pub fn iterate_params<S, F>(&self, ctx: &TxContext<S>, mut cb: F) -> SanctionResult<()>
    where
        S: KvStore,
        F: FnMut(&str, &str) -> bool,
    {
        let iter = ctx
            .store()
            .prefix_scan(&[keys::PARAMS_PREFIX], ScanOrder::Forward)?;
        for (key, value) in iter {
            let name = keys::parse_param_key(&key)?;
            if cb(&name, &String::from_utf8_lossy(&value)) {
                break;
            }
        }
        Ok(())
    }

    pub fn get_immediate_sanction_min_deposit<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
    ) -> SanctionResult<Coins> {
        self.get_param_as_coins_or_default(
            ctx,
            PARAM_NAME_IMMEDIATE_SANCTION_MIN_DEPOSIT,
            &self.config.default_immediate_sanction_min_deposit,
        )
    }

    pub fn get_immediate_unsanction_min_deposit<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
    ) -> SanctionResult<Coins> {
        self.get_param_as_coins_or_default(
            ctx,
            PARAM_NAME_IMMEDIATE_UNSANCTION_MIN_DEPOSIT,
            &self.config.default_immediate_unsanction_min_deposit,
        )
    }

    pub(crate) fn get_param<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        name: &str,
    ) -> SanctionResult<Option<String>> {
        let value = ctx.store().get(&keys::create_param_key(name))?;
        Ok(value.map(|v| String::from_utf8_lossy(&v).into_owned()))
    }

    pub(crate) fn set_param<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        name: &str,
        value: &str,
    ) -> SanctionResult<()> {
        ctx.store_mut()
            .set(&keys::create_param_key(name), value.as_bytes())?;
        Ok(())
    }

    pub(crate) fn delete_param<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        name: &str,
    ) -> SanctionResult<()> {
        ctx.store_mut().delete(&keys::create_param_key(name))?;
        Ok(())
    }

    fn get_param_as_coins_or_default<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        name: &str,
        default: &Coins,
    ) -> SanctionResult<Coins> {
        Ok(match self.get_param(ctx, name)? {
            Some(value) => to_coins_or_default(&value, default),
            None => default.clone(),
        })
    }
}
