//! Driving Ports (API - Inbound)

use crate::context::TxContext;
use crate::domain::Address;
use crate::error::SanctionResult;
use crate::ports::outbound::KvStore;

/// Gate consulted by the funds-movement module before every transfer leg.
pub trait SendRestriction<S: KvStore>: Send + Sync {
    /// Returns the (unchanged) recipient if `from` may send, or
    /// `SanctionError::SanctionedAccount` if it may not.
    fn check_send(&self, ctx: &TxContext<S>, from: &Address, to: &Address)
        -> SanctionResult<Address>;
}

/// Governance lifecycle callbacks.
///
/// Every callback re-reads the proposal and reacts to its current status,
/// whatever transition triggered it.
pub trait GovHooks<S: KvStore>: Send + Sync {
    fn after_proposal_submission(&self, ctx: &mut TxContext<S>, proposal_id: u64)
        -> SanctionResult<()>;

    fn after_proposal_deposit(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
        depositor: &Address,
    ) -> SanctionResult<()>;

    fn after_proposal_vote(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
        voter: &Address,
    ) -> SanctionResult<()>;

    fn after_proposal_failed_min_deposit(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()>;

    fn after_proposal_voting_period_ended(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()>;
}
