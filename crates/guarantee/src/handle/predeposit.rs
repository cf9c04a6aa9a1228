use tracing::info;

use pdg_bond_ledger::BondError;
use pdg_core_state_machine::Input;
use pdg_core_types::{Address, Deposit, DepositAuth, Host};
use pdg_proof::validate_withdrawal_credentials;

use crate::handle::{check_deposit_data_root, deposit_to_beacon_chain, parse_pubkey, Context, VaultInfo};
use crate::{Error, Event, State};

/// Deposit `PREDEPOSIT_AMOUNT` to each new validator through `vault`,
/// locking as much of the node operator's bond.
///
/// Ether sent with the call tops the bond up first, which is only possible
/// for operators that are their own guarantor.
pub fn predeposit<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    vault: &Address,
    deposits: &[Deposit],
    auth: &[DepositAuth],
) -> Result<(), Error> {
    ctx.when_resumed(state)?;

    if deposits.is_empty() {
        return Err(Error::ZeroArgument("deposits"));
    }

    if deposits.len() != auth.len() {
        return Err(Error::ArrayLengthMismatch {
            first: deposits.len(),
            second: auth.len(),
        });
    }

    let vault = VaultInfo::load(host, vault)?;
    let operator = vault.operator;
    let wc = vault.withdrawal_credentials;

    ctx.check_depositor(state, &operator)?;
    vault.check_depositor_is(&ctx.address)?;
    validate_withdrawal_credentials(&wc, &vault.address, ctx.params.wc_versions)?;

    let value = ctx.call.value;
    if !value.is_zero() {
        if state.ledger.has_delegated_guarantor(&operator) {
            return Err(BondError::NotGuarantor {
                operator,
                sender: ctx.sender(),
            }
            .into());
        }

        state.ledger.top_up(&operator, &operator, value)?;

        state.events.push(Event::BalanceToppedUp {
            operator,
            sender: ctx.sender(),
            amount: value,
        });
    }

    let unit = ctx.params.predeposit_amount;

    for (deposit, auth) in deposits.iter().zip(auth) {
        let pubkey = parse_pubkey(&deposit.pubkey)?;

        if deposit.amount != unit {
            return Err(Error::PredepositAmountInvalid {
                pubkey,
                amount: deposit.amount,
            });
        }

        check_deposit_data_root(&pubkey, &wc, deposit)?;

        if !host.verify_deposit_message(deposit, auth, &wc) {
            return Err(Error::InvalidDepositSignature(pubkey));
        }

        // Also rejects a pubkey repeated within the batch
        state
            .registry
            .create(pubkey, Input::Predeposit, vault.address, operator)?;

        state.events.push(Event::ValidatorPredeposited {
            pubkey,
            operator,
            vault: vault.address,
            withdrawal_credentials: wc,
        });
    }

    let total = unit
        .checked_mul(deposits.len() as u64)
        .ok_or(Error::AmountOverflow)?;

    let bond = state.ledger.lock(&operator, total)?;

    state.events.push(Event::BalanceLocked {
        operator,
        total: bond.total,
        locked: bond.locked,
    });

    deposit_to_beacon_chain(host, &vault.address, deposits)?;

    info!(
        vault = %vault.address, %operator, count = deposits.len(), locked = %bond.locked,
        "Predeposited validators"
    );

    Ok(())
}
