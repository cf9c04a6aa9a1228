use tracing::info;

use pdg_core_state_machine::Input;
use pdg_core_types::{Address, BlsPublicKey, Deposit, Host, ValidatorTopUp, ValidatorWitness};
use pdg_proof::BeaconRoots;

use crate::handle::prove::prove_wc;
use crate::handle::{
    check_deposit_data_root, deposit_to_beacon_chain as forward, parse_pubkey, unsigned_deposit,
    Context, VaultInfo,
};
use crate::{Error, Event, State};

/// Route further deposits to proven validators of `vault`.
pub fn deposit_to_beacon_chain<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    vault: &Address,
    deposits: &[Deposit],
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    deposit_to_proven(ctx, state, host, vault, deposits)
}

/// Prove every witness, then deposit to the now proven validators.
///
/// With no deposits the call only proves.
pub fn prove_and_deposit<R: BeaconRoots, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    witnesses: &[ValidatorWitness],
    deposits: &[Deposit],
    vault: &Address,
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    for witness in witnesses {
        prove_wc(ctx, state, &*host, witness)?;
    }

    if deposits.is_empty() {
        return Ok(());
    }

    deposit_to_proven(ctx, state, host, vault, deposits)
}

fn deposit_to_proven<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    vault: &Address,
    deposits: &[Deposit],
) -> Result<(), Error> {
    if deposits.is_empty() {
        return Err(Error::ZeroArgument("deposits"));
    }

    let vault = VaultInfo::load(host, vault)?;
    ctx.check_depositor(state, &vault.operator)?;
    vault.check_depositor_is(&ctx.address)?;

    for deposit in deposits {
        let pubkey = parse_pubkey(&deposit.pubkey)?;
        check_proven_in(state, &pubkey, &vault.address)?;
        check_deposit_data_root(&pubkey, &vault.withdrawal_credentials, deposit)?;

        state.events.push(Event::DepositedToBeaconChain {
            pubkey,
            vault: vault.address,
            amount: deposit.amount,
        });
    }

    forward(host, &vault.address, deposits)?;

    info!(vault = %vault.address, count = deposits.len(), "Deposited to proven validators");

    Ok(())
}

/// The validator must be proven, and belong to `vault`.
fn check_proven_in(state: &State, pubkey: &BlsPublicKey, vault: &Address) -> Result<(), Error> {
    let status = state.registry.check(pubkey, Input::TopUp)?;

    if status.vault != *vault {
        return Err(Error::DepositToWrongVault {
            pubkey: *pubkey,
            expected: status.vault,
            actual: *vault,
        });
    }

    Ok(())
}

/// Top up proven validators, all belonging to the same vault.
pub fn top_up_existing_validators<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    top_ups: &[ValidatorTopUp],
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    let Some(first) = top_ups.first() else {
        return Err(Error::ZeroArgument("top_ups"));
    };

    let status = state.registry.check(&first.pubkey, Input::TopUp)?;
    let vault = VaultInfo::load(host, &status.vault)?;

    ctx.check_depositor(state, &vault.operator)?;
    vault.check_depositor_is(&ctx.address)?;

    let mut deposits = Vec::with_capacity(top_ups.len());

    for top_up in top_ups {
        let status = state.registry.check(&top_up.pubkey, Input::TopUp)?;

        if status.vault != vault.address {
            return Err(Error::MixedVaultsInBatch {
                expected: vault.address,
                actual: status.vault,
            });
        }

        deposits.push(unsigned_deposit(
            &top_up.pubkey,
            &vault.withdrawal_credentials,
            top_up.amount,
        )?);

        state.events.push(Event::DepositedToBeaconChain {
            pubkey: top_up.pubkey,
            vault: vault.address,
            amount: top_up.amount,
        });
    }

    forward(host, &vault.address, &deposits)?;

    info!(vault = %vault.address, count = top_ups.len(), "Topped up existing validators");

    Ok(())
}

/// Deposit the activation amount to a proven validator.
pub fn activate_validator<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    pubkey: &BlsPublicKey,
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    let status = state.registry.check(pubkey, Input::Activate)?;
    let vault = VaultInfo::load(host, &status.vault)?;

    ctx.check_depositor(state, &vault.operator)?;
    vault.check_depositor_is(&ctx.address)?;

    let amount = ctx.params.activation_deposit_amount;
    let deposit = unsigned_deposit(pubkey, &vault.withdrawal_credentials, amount)?;

    state.registry.advance(pubkey, Input::Activate)?;

    state.events.push(Event::ValidatorActivated {
        pubkey: *pubkey,
        vault: vault.address,
        amount,
    });

    forward(host, &vault.address, &[deposit])?;

    info!(%pubkey, vault = %vault.address, %amount, "Activated validator");

    Ok(())
}
