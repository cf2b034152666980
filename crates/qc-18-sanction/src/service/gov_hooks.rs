//! Proposal lifecycle hook
//!
//! Reacts to the proposal's current status, never to the transition that
//! triggered the call:
//!
//! | Status | Action |
//! |--------|--------|
//! | DepositPeriod, VotingPeriod | temporary entries once the deposit reaches the immediate minimum |
//! | Passed | nothing; message execution applies the permanent effect |
//! | Rejected, Failed, not found | delete the proposal's temporary entries |
//! | anything else | invariant violation |

use super::SanctionService;
use crate::context::TxContext;
use crate::domain::{Address, Coins, Proposal, ProposalMessage, ProposalStatus};
use crate::error::{InvariantViolation, SanctionResult};
use crate::ports::inbound::GovHooks;
use crate::ports::outbound::{GovernanceReader, KvStore};
use tracing::{debug, info};

/// True for the message kinds the hook acts on.
pub(crate) fn is_module_gov_hooks_msg(msg: &ProposalMessage) -> bool {
    matches!(
        msg,
        ProposalMessage::Sanction(_) | ProposalMessage::Unsanction(_)
    )
}

/// Decoded addresses of a sanction or unsanction message. Other kinds,
/// legacy envelopes included, name no addresses.
pub(crate) fn get_msg_addresses(msg: &ProposalMessage) -> Result<Vec<Address>, String> {
    let addresses = match msg {
        ProposalMessage::Sanction(m) => &m.addresses,
        ProposalMessage::Unsanction(m) => &m.addresses,
        _ => return Ok(Vec::new()),
    };
    addresses
        .iter()
        .map(|a| Address::parse(a).map_err(|e| format!("address {a:?}: {e}")))
        .collect()
}

impl<G: GovernanceReader> SanctionService<G> {
    /// Bring the temporary entries of `proposal_id` in line with the
    /// proposal's current status.
    pub fn proposal_gov_hook<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()> {
        let Some(proposal) = self.governance.get_proposal(proposal_id) else {
            info!(
                "[qc-18] Proposal {} not found, clearing its temp entries",
                proposal_id
            );
            return self.delete_gov_prop_temp_entries(ctx, proposal_id);
        };

        match ProposalStatus::from_raw(proposal.status) {
            Some(ProposalStatus::DepositPeriod | ProposalStatus::VotingPeriod) => {
                self.apply_immediate_actions(ctx, &proposal)
            }
            Some(ProposalStatus::Passed) => {
                debug!("[qc-18] Proposal {} passed, nothing to do", proposal_id);
                Ok(())
            }
            Some(ProposalStatus::Rejected | ProposalStatus::Failed) => {
                info!(
                    "[qc-18] Proposal {} did not pass, clearing its temp entries",
                    proposal_id
                );
                self.delete_gov_prop_temp_entries(ctx, proposal_id)
            }
            Some(ProposalStatus::Unspecified) | None => {
                Err(InvariantViolation::UnknownProposalStatus(proposal.status).into())
            }
        }
    }

    /// Minimum deposit that triggers the immediate effect of `msg`. Zero for
    /// message kinds the hook does not act on.
    pub fn get_immediate_min_deposit<S: KvStore>(
        &self,
        ctx: &TxContext<S>,
        msg: &ProposalMessage,
    ) -> SanctionResult<Coins> {
        match msg {
            ProposalMessage::Sanction(_) => self.get_immediate_sanction_min_deposit(ctx),
            ProposalMessage::Unsanction(_) => self.get_immediate_unsanction_min_deposit(ctx),
            _ => Ok(Coins::empty()),
        }
    }

    fn apply_immediate_actions<S: KvStore>(
        &self,
        ctx: &mut TxContext<S>,
        proposal: &Proposal,
    ) -> SanctionResult<()> {
        for msg in proposal.messages.iter().filter(|m| is_module_gov_hooks_msg(m)) {
            let min_deposit = self.get_immediate_min_deposit(ctx, msg)?;
            if min_deposit.is_zero() || !proposal.total_deposit.is_all_gte(&min_deposit) {
                continue;
            }
            let addrs = get_msg_addresses(msg).map_err(|reason| {
                InvariantViolation::InvalidProposalMessage {
                    proposal_id: proposal.id,
                    reason,
                }
            })?;
            match msg {
                ProposalMessage::Sanction(_) => {
                    info!(
                        "[qc-18] Proposal {} deposit {} reached {}, temporarily sanctioning {} addresses",
                        proposal.id,
                        proposal.total_deposit,
                        min_deposit,
                        addrs.len()
                    );
                    self.add_temporary_sanction(ctx, proposal.id, &addrs)?;
                }
                _ => {
                    info!(
                        "[qc-18] Proposal {} deposit {} reached {}, temporarily unsanctioning {} addresses",
                        proposal.id,
                        proposal.total_deposit,
                        min_deposit,
                        addrs.len()
                    );
                    self.add_temporary_unsanction(ctx, proposal.id, &addrs)?;
                }
            }
        }
        Ok(())
    }
}

impl<G, S> GovHooks<S> for SanctionService<G>
where
    G: GovernanceReader,
    S: KvStore,
{
    fn after_proposal_submission(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()> {
        self.proposal_gov_hook(ctx, proposal_id)
    }

    fn after_proposal_deposit(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
        _depositor: &Address,
    ) -> SanctionResult<()> {
        self.proposal_gov_hook(ctx, proposal_id)
    }

    fn after_proposal_vote(
        &self,
        _ctx: &mut TxContext<S>,
        _proposal_id: u64,
        _voter: &Address,
    ) -> SanctionResult<()> {
        Ok(())
    }

    fn after_proposal_failed_min_deposit(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()> {
        self.proposal_gov_hook(ctx, proposal_id)
    }

    fn after_proposal_voting_period_ended(
        &self,
        ctx: &mut TxContext<S>,
        proposal_id: u64,
    ) -> SanctionResult<()> {
        self.proposal_gov_hook(ctx, proposal_id)
    }
}
