//! Governance adapter
//!
//! In-memory proposal registry implementing the `GovernanceReader` port.
//! Tests drive the proposal state machine by hand through it.

use crate::domain::{Coins, Proposal, ProposalMessage, ProposalStatus};
use crate::ports::outbound::GovernanceReader;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory governance module for testing.
#[derive(Default)]
pub struct InMemoryGovernance {
    proposals: RwLock<HashMap<u64, Proposal>>,
    next_id: RwLock<u64>,
    lookups: RwLock<Vec<u64>>,
}

impl InMemoryGovernance {
    pub fn new() -> Self {
        Self {
            next_id: RwLock::new(1),
            ..Self::default()
        }
    }

    /// Store a new proposal in the deposit period and return its id.
    pub fn submit(&self, messages: Vec<ProposalMessage>, deposit: Coins) -> u64 {
        let mut next_id = self.next_id.write();
        let id = (*next_id).max(1);
        *next_id = id.saturating_add(1);
        let proposal = Proposal::new(id, ProposalStatus::DepositPeriod, messages)
            .with_deposit(deposit);
        self.proposals.write().insert(id, proposal);
        id
    }

    /// Insert or replace a proposal as-is.
    pub fn insert(&self, proposal: Proposal) {
        let mut next_id = self.next_id.write();
        if proposal.id >= *next_id {
            *next_id = proposal.id.saturating_add(1);
        }
        self.proposals.write().insert(proposal.id, proposal);
    }

    pub fn set_status(&self, proposal_id: u64, status: ProposalStatus) {
        self.set_raw_status(proposal_id, status.as_raw());
    }

    pub fn set_raw_status(&self, proposal_id: u64, status: i32) {
        if let Some(p) = self.proposals.write().get_mut(&proposal_id) {
            p.status = status;
        }
    }

    /// Add to a proposal's total deposit.
    pub fn add_deposit(&self, proposal_id: u64, amount: &Coins) {
        if let Some(p) = self.proposals.write().get_mut(&proposal_id) {
            p.total_deposit = p.total_deposit.add(amount);
        }
    }

    /// Forget a proposal entirely (pruned after failing its deposit period).
    pub fn remove(&self, proposal_id: u64) {
        self.proposals.write().remove(&proposal_id);
    }

    pub fn next_proposal_id(&self) -> u64 {
        (*self.next_id.read()).max(1)
    }

    /// Ids passed to `get_proposal`, in call order.
    pub fn lookups(&self) -> Vec<u64> {
        self.lookups.read().clone()
    }
}

impl GovernanceReader for InMemoryGovernance {
    fn get_proposal(&self, proposal_id: u64) -> Option<Proposal> {
        self.lookups.write().push(proposal_id);
        self.proposals.read().get(&proposal_id).cloned()
    }
}
