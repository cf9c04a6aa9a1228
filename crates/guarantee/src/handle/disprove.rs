use tracing::info;

use pdg_core_state_machine::Input;
use pdg_core_types::{Address, Amount, BlsPublicKey, Host, ValidatorWitness, WithdrawalCredentials};
use pdg_proof::BeaconRoots;

use crate::handle::{parse_witness_pubkey, send_value, Context, VaultInfo};
use crate::{Error, Event, State, ValidatorStatus};

/// Prove that a predeposited validator carries withdrawal credentials
/// other than its vault's.
///
/// The operator's locked bond for it is forfeited into the pending
/// compensation, to be paid out by the vault owner.
pub fn prove_invalid_validator_wc<R: BeaconRoots, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &H,
    witness: &ValidatorWitness,
    invalid_wc: &WithdrawalCredentials,
) -> Result<ValidatorStatus, Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    let pubkey = parse_witness_pubkey(&witness.pubkey)?;
    let status = state.registry.check(&pubkey, Input::ProveInvalid)?;

    let vault = VaultInfo::load(host, &status.vault)?;
    if vault.withdrawal_credentials == *invalid_wc {
        return Err(Error::WithdrawalCredentialsMatch(*invalid_wc));
    }

    ctx.verifier.validate_pubkey_wc_proof(witness, invalid_wc)?;

    let status = state.registry.advance(&pubkey, Input::ProveInvalid)?;

    let amount = ctx.params.predeposit_amount;
    state.ledger.slash(&status.operator, amount)?;
    state.pending_compensation = state
        .pending_compensation
        .checked_add(amount)
        .ok_or(Error::AmountOverflow)?;

    state.events.push(Event::ValidatorDisproven {
        pubkey,
        operator: status.operator,
        vault: status.vault,
        invalid_withdrawal_credentials: *invalid_wc,
    });

    info!(
        %pubkey, vault = %status.vault, operator = %status.operator, wc = %invalid_wc,
        "Disproved validator"
    );

    Ok(status)
}

/// Pay the bond forfeited for a disproven validator to `recipient`.
pub fn compensate_disproven_predeposit<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    pubkey: &BlsPublicKey,
    recipient: &Address,
) -> Result<Amount, Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    if recipient.is_zero() {
        return Err(Error::ZeroArgument("recipient"));
    }

    let status = state.registry.check(pubkey, Input::Compensate)?;

    let vault = VaultInfo::load(host, &status.vault)?;
    vault.check_owner(&ctx.sender())?;

    if *recipient == vault.address {
        return Err(Error::CompensateToVaultNotAllowed(vault.address));
    }

    state.registry.advance(pubkey, Input::Compensate)?;

    let amount = ctx.params.predeposit_amount;
    state.pending_compensation = state
        .pending_compensation
        .checked_sub(amount)
        .ok_or(Error::AmountOverflow)?;

    state.events.push(Event::ValidatorCompensated {
        pubkey: *pubkey,
        vault: vault.address,
        recipient: *recipient,
        amount,
    });

    send_value(host, recipient, amount)?;

    info!(%pubkey, vault = %vault.address, %recipient, %amount, "Compensated disproven predeposit");

    Ok(amount)
}
