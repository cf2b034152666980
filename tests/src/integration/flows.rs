//! # Integration Test Flows
//!
//! Drives the sanction ledger the way a host chain does: governance
//! proposals move through their lifecycle, the hooks keep temporary entries
//! in step, and the bank consults the send-restriction gate on every
//! transfer.
//!
//! ## Flows Tested:
//!
//! 1. **Immediate sanction**: deposit reaches the minimum, sender is frozen before the vote ends
//! 2. **Rejected proposal**: temporary entries are cleaned up, sender is released
//! 3. **Immediate unsanction**: a permanently sanctioned account is released while the vote runs
//! 4. **Multi-leg transfers and bypass**
//! 5. **Genesis**: JSON export/import round trip

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use qc_18_sanction::{
        Address, BankError, BankKeeper, Coins, GenesisState, GovHooks, InMemoryBank,
        InMemoryGovernance, InMemoryKvStore, MsgSanction, MsgUnsanction, ProposalMessage,
        ProposalStatus, SanctionConfig, SanctionError, SanctionService, TxContext,
    };

    type Service = SanctionService<InMemoryGovernance>;
    type Ctx = TxContext<InMemoryKvStore>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Chain {
        service: Arc<Service>,
        gov: Arc<InMemoryGovernance>,
        bank: InMemoryBank<InMemoryKvStore>,
        ctx: Ctx,
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("qc_18_sanction=debug")
            .with_test_writer()
            .try_init();
    }

    fn addr(name: &str) -> Address {
        Address::new(name.as_bytes().to_vec()).unwrap()
    }

    fn coins(s: &str) -> Coins {
        Coins::parse_normalized(s).unwrap()
    }

    fn authority() -> Address {
        addr("gov_module_account__")
    }

    /// Chain with immediate minimums of 100stake (sanction) and
    /// 200stake (unsanction).
    fn chain_with(unsanctionable: Vec<Address>) -> Chain {
        init_tracing();
        let gov = Arc::new(InMemoryGovernance::new());
        let config = SanctionConfig::new(authority())
            .with_unsanctionable_addrs(unsanctionable)
            .with_default_min_deposits(coins("100stake"), coins("200stake"));
        let service = Arc::new(SanctionService::new(config, gov.clone()));

        let bank = InMemoryBank::new();
        bank.register_send_restriction(service.clone());

        Chain {
            service,
            gov,
            bank,
            ctx: TxContext::new(InMemoryKvStore::new()),
        }
    }

    fn chain() -> Chain {
        chain_with(Vec::new())
    }

    fn sanction_proposal(targets: &[Address]) -> Vec<ProposalMessage> {
        vec![ProposalMessage::Sanction(MsgSanction::new(
            authority().to_string(),
            targets,
        ))]
    }

    fn unsanction_proposal(targets: &[Address]) -> Vec<ProposalMessage> {
        vec![ProposalMessage::Unsanction(MsgUnsanction::new(
            authority().to_string(),
            targets,
        ))]
    }

    fn assert_blocked(result: Result<(), BankError>, sender: &Address) {
        match result {
            Err(BankError::Restricted(SanctionError::SanctionedAccount { address })) => {
                assert_eq!(&address, sender)
            }
            other => panic!("expected sanctioned account error, got {:?}", other),
        }
    }

    // =============================================================================
    // GOVERNANCE → LEDGER → BANK
    // =============================================================================

    #[test]
    fn test_immediate_sanction_then_passed_proposal() {
        let mut c = chain();
        let (bad, victim) = (addr("bad_actor"), addr("victim"));
        c.bank.mint(&bad, &coins("1000stake"));
        assert!(c.bank.has_send_restriction());

        // Below the immediate minimum: nothing changes.
        let id = c.gov.submit(sanction_proposal(&[bad.clone()]), coins("50stake"));
        c.service.after_proposal_submission(&mut c.ctx, id).unwrap();
        c.bank
            .send_coins(&c.ctx, &bad, &victim, &coins("10stake"))
            .unwrap();

        // Deposit tops up past the minimum: frozen immediately.
        c.gov.add_deposit(id, &coins("50stake"));
        c.service
            .after_proposal_deposit(&mut c.ctx, id, &addr("depositor"))
            .unwrap();
        assert_blocked(
            c.bank.send_coins(&c.ctx, &bad, &victim, &coins("10stake")),
            &bad,
        );

        // Voting does not change anything.
        c.gov.set_status(id, ProposalStatus::VotingPeriod);
        c.service
            .after_proposal_vote(&mut c.ctx, id, &addr("voter"))
            .unwrap();

        // Proposal passes; its message runs and makes the sanction permanent.
        c.gov.set_status(id, ProposalStatus::Passed);
        c.service
            .after_proposal_voting_period_ended(&mut c.ctx, id)
            .unwrap();
        c.service
            .sanction(
                &mut c.ctx,
                &MsgSanction::new(c.service.authority(), &[bad.clone()]),
            )
            .unwrap();

        let state = c.service.export_genesis(&c.ctx).unwrap();
        assert_eq!(state.sanctioned_addresses, vec![bad.to_string()]);
        assert!(state.temporary_entries.is_empty());
        assert_blocked(
            c.bank.send_coins(&c.ctx, &bad, &victim, &coins("1stake")),
            &bad,
        );

        assert_eq!(c.bank.balance(&bad), coins("990stake"));
        assert_eq!(c.bank.balance(&victim), coins("10stake"));
    }

    #[test]
    fn test_rejected_proposal_releases_sender() {
        let mut c = chain();
        let (bad, victim) = (addr("suspect"), addr("victim"));
        c.bank.mint(&bad, &coins("10stake"));

        let id = c.gov.submit(sanction_proposal(&[bad.clone()]), coins("150stake"));
        c.service.after_proposal_submission(&mut c.ctx, id).unwrap();
        assert!(c.service.is_sanctioned_addr(&c.ctx, &bad).unwrap());

        c.gov.set_status(id, ProposalStatus::Rejected);
        c.service
            .after_proposal_voting_period_ended(&mut c.ctx, id)
            .unwrap();
        assert!(!c.service.is_sanctioned_addr(&c.ctx, &bad).unwrap());
        c.bank
            .send_coins(&c.ctx, &bad, &victim, &coins("10stake"))
            .unwrap();
    }

    #[test]
    fn test_pruned_proposal_is_cleaned_up() {
        let mut c = chain();
        let bad = addr("suspect");

        let id = c.gov.submit(sanction_proposal(&[bad.clone()]), coins("100stake"));
        c.service.after_proposal_submission(&mut c.ctx, id).unwrap();
        assert!(c.service.is_sanctioned_addr(&c.ctx, &bad).unwrap());

        c.gov.remove(id);
        c.service
            .after_proposal_failed_min_deposit(&mut c.ctx, id)
            .unwrap();
        assert!(!c.service.is_sanctioned_addr(&c.ctx, &bad).unwrap());
    }

    #[test]
    fn test_immediate_unsanction_overrides_permanent() {
        let mut c = chain();
        let (frozen, shop) = (addr("frozen_account"), addr("shop"));
        c.bank.mint(&frozen, &coins("5stake"));
        c.service
            .sanction_addresses(&mut c.ctx, &[frozen.clone()])
            .unwrap();
        assert_blocked(
            c.bank.send_coins(&c.ctx, &frozen, &shop, &coins("1stake")),
            &frozen,
        );

        // 150stake meets the sanction minimum but not the unsanction one.
        let id = c.gov.submit(unsanction_proposal(&[frozen.clone()]), coins("150stake"));
        c.service.after_proposal_submission(&mut c.ctx, id).unwrap();
        assert!(c.service.is_sanctioned_addr(&c.ctx, &frozen).unwrap());

        c.gov.add_deposit(id, &coins("50stake"));
        c.service
            .after_proposal_deposit(&mut c.ctx, id, &addr("depositor"))
            .unwrap();
        c.bank
            .send_coins(&c.ctx, &frozen, &shop, &coins("1stake"))
            .unwrap();

        // The proposal fails: the permanent entry applies again.
        c.gov.set_status(id, ProposalStatus::Failed);
        c.service
            .after_proposal_voting_period_ended(&mut c.ctx, id)
            .unwrap();
        assert_blocked(
            c.bank.send_coins(&c.ctx, &frozen, &shop, &coins("1stake")),
            &frozen,
        );
    }

    #[test]
    fn test_later_proposal_wins() {
        let mut c = chain();
        let target = addr("contested");

        let first = c.gov.submit(sanction_proposal(&[target.clone()]), coins("100stake"));
        let second = c.gov.submit(unsanction_proposal(&[target.clone()]), coins("200stake"));
        c.service.after_proposal_submission(&mut c.ctx, second).unwrap();
        c.service.after_proposal_submission(&mut c.ctx, first).unwrap();
        assert!(!c.service.is_sanctioned_addr(&c.ctx, &target).unwrap());

        c.gov.set_status(second, ProposalStatus::Rejected);
        c.service
            .after_proposal_voting_period_ended(&mut c.ctx, second)
            .unwrap();
        assert!(c.service.is_sanctioned_addr(&c.ctx, &target).unwrap());
    }

    #[test]
    fn test_unsanctionable_account_cannot_be_frozen() {
        let treasury = addr("community_treasury__");
        let mut c = chain_with(vec![treasury.clone()]);
        c.bank.mint(&treasury, &coins("100stake"));

        let id = c.gov.submit(sanction_proposal(&[treasury.clone()]), coins("100stake"));
        let err = c
            .service
            .after_proposal_submission(&mut c.ctx, id)
            .unwrap_err();
        assert!(matches!(err, SanctionError::UnsanctionableAddr { .. }));
        assert!(!err.is_fatal());

        let err = c
            .service
            .sanction_addresses(&mut c.ctx, &[treasury.clone()])
            .unwrap_err();
        assert!(matches!(err, SanctionError::UnsanctionableAddr { .. }));

        c.bank
            .send_coins(&c.ctx, &treasury, &addr("grantee"), &coins("100stake"))
            .unwrap();
    }

    // =============================================================================
    // BANK LEGS
    // =============================================================================

    #[test]
    fn test_multi_leg_transfer_checks_every_input() {
        let mut c = chain();
        let (good, bad, out) = (addr("good_sender"), addr("bad_sender"), addr("receiver"));
        c.bank.mint(&good, &coins("10stake"));
        c.bank.mint(&bad, &coins("10stake"));
        c.service
            .sanction_addresses(&mut c.ctx, &[bad.clone()])
            .unwrap();

        let inputs = vec![(good.clone(), coins("5stake")), (bad.clone(), coins("5stake"))];
        let outputs = vec![(out.clone(), coins("10stake"))];
        assert_blocked(c.bank.input_output_coins(&c.ctx, &inputs, &outputs), &bad);
        // Nothing moved.
        assert_eq!(c.bank.balance(&good), coins("10stake"));
        assert_eq!(c.bank.balance(&out), Coins::empty());

        let inputs = vec![(good.clone(), coins("10stake"))];
        c.bank
            .input_output_coins(&c.ctx, &inputs, &outputs)
            .unwrap();
        assert_eq!(c.bank.spendable_coins(&out), coins("10stake"));
    }

    #[test]
    fn test_bypass_context_skips_the_gate() {
        let mut c = chain();
        let (bad, module) = (addr("bad_sender"), addr("fee_collector"));
        c.bank.mint(&bad, &coins("3stake"));
        c.service
            .sanction_addresses(&mut c.ctx, &[bad.clone()])
            .unwrap();

        let privileged = c.ctx.with_bypass_sanction_restriction(true);
        c.bank
            .send_coins(&privileged, &bad, &module, &coins("2stake"))
            .unwrap();
        assert_eq!(c.bank.balance(&module), coins("2stake"));

        let mut ctx = privileged;
        ctx.set_bypass_sanction_restriction(false);
        assert_blocked(
            c.bank.send_coins(&ctx, &bad, &module, &coins("1stake")),
            &bad,
        );
    }

    // =============================================================================
    // GENESIS
    // =============================================================================

    #[test]
    fn test_genesis_json_round_trip() {
        let mut c = chain();
        let (a, b, t) = (addr("permanent_a"), addr("permanent_b"), addr("temporary"));
        c.service
            .sanction_addresses(&mut c.ctx, &[b.clone(), a.clone()])
            .unwrap();
        let id = c.gov.submit(sanction_proposal(&[t.clone()]), coins("100stake"));
        c.service.after_proposal_submission(&mut c.ctx, id).unwrap();
        c.service
            .update_params(
                &mut c.ctx,
                &qc_18_sanction::MsgUpdateParams::new(
                    c.service.authority(),
                    coins("7stake"),
                    coins("9stake"),
                ),
            )
            .unwrap();

        let exported = c.service.export_genesis(&c.ctx).unwrap();
        let json = serde_json::to_string_pretty(&exported).unwrap();
        let decoded: GenesisState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, exported);

        let fresh = chain();
        let mut ctx = TxContext::new(InMemoryKvStore::new());
        fresh.service.init_genesis(&mut ctx, &decoded).unwrap();
        assert!(ctx.events().events().is_empty());
        assert_eq!(fresh.service.export_genesis(&ctx).unwrap(), exported);
        assert!(fresh.service.is_sanctioned_addr(&ctx, &t).unwrap());
    }

    #[test]
    fn test_genesis_from_json_text() {
        let c = chain();
        let addr_hex = addr("from_json").to_string();
        let json = format!(
            r#"{{
                "params": {{
                    "immediate_sanction_min_deposit": "5stake",
                    "immediate_unsanction_min_deposit": ""
                }},
                "sanctioned_addresses": ["{addr_hex}"],
                "temporary_entries": [
                    {{"address": "{addr_hex}", "proposal_id": 3, "status": "TEMP_STATUS_UNSANCTIONED"}}
                ]
            }}"#
        );
        let state: GenesisState = serde_json::from_str(&json).unwrap();

        let mut ctx = TxContext::new(InMemoryKvStore::new());
        c.service.init_genesis(&mut ctx, &state).unwrap();
        assert!(!c.service.is_sanctioned_addr(&ctx, &addr("from_json")).unwrap());
        assert_eq!(
            c.service.get_immediate_sanction_min_deposit(&ctx).unwrap(),
            coins("5stake")
        );
        assert!(c
            .service
            .get_immediate_unsanction_min_deposit(&ctx)
            .unwrap()
            .is_zero());
    }
}
