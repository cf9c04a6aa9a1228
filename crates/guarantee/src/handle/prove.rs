use tracing::info;

use pdg_core_state_machine::Input;
use pdg_core_types::{Address, Host, ValidatorWitness};
use pdg_proof::{validate_withdrawal_credentials, BeaconRoots};

use crate::handle::{parse_witness_pubkey, Context, VaultInfo};
use crate::{Error, Event, State, ValidatorStatus};

/// Prove that a predeposited validator carries its vault's withdrawal
/// credentials, releasing the bond locked for it.
pub fn prove_validator_wc<R: BeaconRoots, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &H,
    witness: &ValidatorWitness,
) -> Result<ValidatorStatus, Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    prove_wc(ctx, state, host, witness)
}

pub(crate) fn prove_wc<R: BeaconRoots, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &H,
    witness: &ValidatorWitness,
) -> Result<ValidatorStatus, Error> {
    let pubkey = parse_witness_pubkey(&witness.pubkey)?;
    let status = state.registry.check(&pubkey, Input::ProveValid)?;

    let vault = VaultInfo::load(host, &status.vault)?;
    let wc = vault.withdrawal_credentials;

    validate_withdrawal_credentials(&wc, &vault.address, ctx.params.wc_versions)?;
    ctx.verifier.validate_pubkey_wc_proof(witness, &wc)?;

    let status = state.registry.advance(&pubkey, Input::ProveValid)?;
    let bond = state
        .ledger
        .unlock(&status.operator, ctx.params.predeposit_amount)?;

    state.events.push(Event::ValidatorProven {
        pubkey,
        operator: status.operator,
        vault: status.vault,
        withdrawal_credentials: wc,
    });

    state.events.push(Event::BalanceUnlocked {
        operator: status.operator,
        total: bond.total,
        locked: bond.locked,
    });

    info!(%pubkey, vault = %status.vault, operator = %status.operator, "Proved validator");

    Ok(status)
}

/// Prove a validator that reached the beacon chain without a predeposit.
///
/// Only the vault owner may do this; no bond is involved.
pub fn prove_unknown_validator<R: BeaconRoots, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &H,
    witness: &ValidatorWitness,
    vault: &Address,
) -> Result<ValidatorStatus, Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    let pubkey = parse_witness_pubkey(&witness.pubkey)?;

    let vault = VaultInfo::load(host, vault)?;
    vault.check_owner(&ctx.sender())?;

    state.registry.check(&pubkey, Input::ProveUnknown)?;

    let wc = vault.withdrawal_credentials;
    validate_withdrawal_credentials(&wc, &vault.address, ctx.params.wc_versions)?;
    ctx.verifier.validate_pubkey_wc_proof(witness, &wc)?;

    let status = state
        .registry
        .create(pubkey, Input::ProveUnknown, vault.address, vault.operator)?;

    state.events.push(Event::UnknownValidatorProven {
        pubkey,
        operator: vault.operator,
        vault: vault.address,
    });

    info!(%pubkey, vault = %vault.address, "Proved unknown validator");

    Ok(status)
}
