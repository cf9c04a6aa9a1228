mod common;

use std::collections::BTreeMap;

use pdg_core_types::{Amount, BlsPublicKey, WithdrawalCredentials};
use pdg_guarantee::ValidatorStage;
use pdg_metrics::{Metrics, SharedRegistry};
use pdg_test::{address, pubkey};

use common::*;

fn rank(stage: ValidatorStage) -> u8 {
    match stage {
        ValidatorStage::None => 0,
        ValidatorStage::Predeposited => 1,
        ValidatorStage::Proven | ValidatorStage::Disproven => 2,
        ValidatorStage::Activated | ValidatorStage::Compensated => 3,
    }
}

fn stages(env: &Env, pubkeys: &[BlsPublicKey]) -> BTreeMap<BlsPublicKey, ValidatorStage> {
    pubkeys.iter().map(|pk| (*pk, env.stage(pk))).collect()
}

#[test]
fn bond_and_stages_stay_consistent() {
    arbtest::arbtest(|u| {
        let mut env = Env::new();
        let foreign = WithdrawalCredentials::from_address(0x02, &address(0x66));
        let pubkeys: Vec<_> = (1..=8).map(pubkey).collect();

        for _ in 0..u.int_in_range(1..=24)? {
            let before = stages(&env, &pubkeys);
            let pk = *u.choose(&pubkeys)?;

            let _ = match u.int_in_range(0..=6)? {
                0 => env.top_up(u.int_in_range(0..=2)?),
                1 => env.predeposit(&[pk]),
                2 => {
                    let call = env.call(operator());
                    let amount = Amount::ether(u.int_in_range(0..=2)?);
                    env.guarantee
                        .withdraw(&mut env.host, &call, &operator(), amount, &operator())
                }
                3 | 4 => {
                    if !env.indices.contains_key(&pk) {
                        let wc = if u.ratio(2, 3)? { env.vault_wc() } else { foreign };
                        env.appear(pk, wc);
                    }

                    let witness = env.witness(&pk);
                    let call = env.call(stranger());

                    if u.arbitrary()? {
                        env.guarantee
                            .prove_validator_wc(&env.host, &call, &witness)
                            .map(|_| ())
                    } else {
                        env.guarantee
                            .prove_invalid_validator_wc(&env.host, &call, &witness, &foreign)
                            .map(|_| ())
                    }
                }
                5 => {
                    let call = env.call(owner());
                    env.guarantee
                        .compensate_disproven_predeposit(&mut env.host, &call, &pk, &owner())
                        .map(|_| ())
                }
                _ => {
                    let call = env.call(operator());
                    env.guarantee.activate_validator(&mut env.host, &call, &pk)
                }
            };

            env.assert_bond_invariant(&operator());

            let after = stages(&env, &pubkeys);
            for pk in &pubkeys {
                assert!(
                    rank(after[pk]) >= rank(before[pk]),
                    "{pk}: {} -> {}",
                    before[pk],
                    after[pk]
                );
            }

            // Everything forfeited and not yet paid out is held in escrow
            let disproven = after
                .values()
                .filter(|stage| **stage == ValidatorStage::Disproven)
                .count();
            assert_eq!(
                env.guarantee.pending_compensation(),
                unit().checked_mul(disproven as u64).unwrap()
            );
        }

        Ok(())
    });
}

#[test]
fn operations_are_counted() {
    let registry = SharedRegistry::default();

    let mut env = Env::new();
    env.guarantee = env.guarantee.with_metrics(Metrics::register(&registry));

    env.top_up(1).unwrap();
    env.predeposit(&[pubkey(1)]).unwrap();
    env.predeposit(&[pubkey(1)]).unwrap_err();
    env.predeposit(&[pubkey(2)]).unwrap_err();

    let mut out = String::new();
    registry.export(&mut out).unwrap();

    assert!(out.contains("pdg_predeposits_total 1"), "{out}");
    assert!(
        out.contains(r#"pdg_rejected_operations_total{kind="state_machine"} 1"#),
        "{out}"
    );
    assert!(
        out.contains(r#"pdg_rejected_operations_total{kind="economic"} 1"#),
        "{out}"
    );
    assert!(out.contains("pdg_locked_bond_gwei 1000000000"), "{out}");
}
