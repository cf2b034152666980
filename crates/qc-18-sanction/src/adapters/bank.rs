//! Bank adapter
//!
//! Minimal in-memory funds-movement module implementing the `BankKeeper`
//! port. It exists to exercise the send-restriction gate end to end; it does
//! no account bookkeeping beyond plain balances.

use crate::context::TxContext;
use crate::domain::{Address, Coins};
use crate::error::SanctionError;
use crate::ports::inbound::SendRestriction;
use crate::ports::outbound::{BankKeeper, KvStore};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Bank errors
#[derive(Debug, Error)]
pub enum BankError {
    /// Rejected by the registered send restriction.
    #[error(transparent)]
    Restricted(#[from] SanctionError),

    #[error("insufficient funds: {address} has {available:?}, needs {needed:?}")]
    InsufficientFunds {
        address: Address,
        available: String,
        needed: String,
    },

    #[error("sum of inputs {inputs:?} does not match sum of outputs {outputs:?}")]
    InputOutputMismatch { inputs: String, outputs: String },
}

/// In-memory bank for testing.
pub struct InMemoryBank<S: KvStore> {
    balances: RwLock<HashMap<Address, Coins>>,
    restriction: RwLock<Option<Arc<dyn SendRestriction<S>>>>,
}

impl<S: KvStore> Default for InMemoryBank<S> {
    fn default() -> Self {
        Self {
            balances: RwLock::new(HashMap::new()),
            restriction: RwLock::new(None),
        }
    }
}

impl<S: KvStore> InMemoryBank<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `addr` out of thin air.
    pub fn mint(&self, addr: &Address, amount: &Coins) {
        let mut balances = self.balances.write();
        let balance = balances.entry(addr.clone()).or_default();
        *balance = balance.add(amount);
    }

    pub fn balance(&self, addr: &Address) -> Coins {
        self.balances.read().get(addr).cloned().unwrap_or_default()
    }

    pub fn has_send_restriction(&self) -> bool {
        self.restriction.read().is_some()
    }

    /// Run the registered gate for one leg. No gate means no restriction.
    fn check_leg(
        &self,
        ctx: &TxContext<S>,
        from: &Address,
        to: &Address,
    ) -> Result<Address, BankError> {
        match self.restriction.read().as_ref() {
            Some(restriction) => Ok(restriction.check_send(ctx, from, to)?),
            None => Ok(to.clone()),
        }
    }

    fn debit(
        balances: &mut HashMap<Address, Coins>,
        addr: &Address,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let available = balances.get(addr).cloned().unwrap_or_default();
        let remaining =
            available
                .checked_sub(amount)
                .ok_or_else(|| BankError::InsufficientFunds {
                    address: addr.clone(),
                    available: available.to_string(),
                    needed: amount.to_string(),
                })?;
        balances.insert(addr.clone(), remaining);
        Ok(())
    }

    fn credit(balances: &mut HashMap<Address, Coins>, addr: &Address, amount: &Coins) {
        let balance = balances.entry(addr.clone()).or_default();
        *balance = balance.add(amount);
    }
}

impl<S: KvStore> BankKeeper<S> for InMemoryBank<S> {
    type Error = BankError;

    fn register_send_restriction(&self, restriction: Arc<dyn SendRestriction<S>>) {
        *self.restriction.write() = Some(restriction);
    }

    fn send_coins(
        &self,
        ctx: &TxContext<S>,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let to = self.check_leg(ctx, from, to)?;

        let mut balances = self.balances.write();
        Self::debit(&mut balances, from, amount)?;
        Self::credit(&mut balances, &to, amount);
        debug!("[qc-18] bank: sent {} from {} to {}", amount, from, to);
        Ok(())
    }

    fn input_output_coins(
        &self,
        ctx: &TxContext<S>,
        inputs: &[(Address, Coins)],
        outputs: &[(Address, Coins)],
    ) -> Result<(), BankError> {
        let total_in = inputs
            .iter()
            .fold(Coins::empty(), |acc, (_, amount)| acc.add(amount));
        let total_out = outputs
            .iter()
            .fold(Coins::empty(), |acc, (_, amount)| acc.add(amount));
        if total_in != total_out {
            return Err(BankError::InputOutputMismatch {
                inputs: total_in.to_string(),
                outputs: total_out.to_string(),
            });
        }

        // Every source is checked against every recipient before any
        // balance moves.
        let mut recipients = Vec::with_capacity(outputs.len());
        for (to, amount) in outputs {
            let mut to = to.clone();
            for (from, _) in inputs {
                to = self.check_leg(ctx, from, &to)?;
            }
            recipients.push((to, amount));
        }

        let mut balances = self.balances.write();
        let mut staged = balances.clone();
        for (from, amount) in inputs {
            Self::debit(&mut staged, from, amount)?;
        }
        for (to, amount) in recipients {
            Self::credit(&mut staged, &to, amount);
        }
        *balances = staged;
        Ok(())
    }

    fn spendable_coins(&self, addr: &Address) -> Coins {
        self.balance(addr)
    }
}
