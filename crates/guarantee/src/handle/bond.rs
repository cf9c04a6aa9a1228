use tracing::info;

use pdg_core_types::{Address, Amount, Host};

use crate::handle::{send_value, Context};
use crate::{Error, Event, State};

/// Credit the ether sent with the call to the bond of `operator`.
pub fn top_up<R>(ctx: Context<'_, R>, state: &mut State, operator: &Address) -> Result<(), Error> {
    ctx.when_resumed(state)?;

    let amount = ctx.call.value;
    let bond = state.ledger.top_up(&ctx.sender(), operator, amount)?;

    state.events.push(Event::BalanceToppedUp {
        operator: *operator,
        sender: ctx.sender(),
        amount,
    });

    info!(%operator, %amount, total = %bond.total, "Topped up node operator bond");

    Ok(())
}

pub fn withdraw<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    operator: &Address,
    amount: Amount,
    recipient: &Address,
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    if recipient.is_zero() {
        return Err(Error::ZeroArgument("recipient"));
    }

    let bond = state.ledger.withdraw(&ctx.sender(), operator, amount)?;

    state.events.push(Event::BalanceWithdrawn {
        operator: *operator,
        recipient: *recipient,
        amount,
    });

    send_value(host, recipient, amount)?;

    info!(%operator, %recipient, %amount, total = %bond.total, "Withdrew node operator bond");

    Ok(())
}

/// Hand the caller's bond over to `guarantor`, refunding the previous one.
pub fn set_guarantor<R>(
    ctx: Context<'_, R>,
    state: &mut State,
    guarantor: &Address,
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    let operator = ctx.sender();
    let change = state.ledger.set_guarantor(&operator, guarantor)?;

    if !change.refund.is_zero() {
        state.events.push(Event::GuarantorRefundAdded {
            guarantor: change.previous,
            operator,
            amount: change.refund,
        });
    }

    state.events.push(Event::GuarantorSet {
        operator,
        guarantor: *guarantor,
        previous: change.previous,
    });

    info!(
        %operator, %guarantor, previous = %change.previous, refund = %change.refund,
        "Changed node operator guarantor"
    );

    Ok(())
}

pub fn set_depositor<R>(
    ctx: Context<'_, R>,
    state: &mut State,
    depositor: &Address,
) -> Result<(), Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    let operator = ctx.sender();
    let previous = state.ledger.set_depositor(&operator, depositor)?;

    state.events.push(Event::DepositorSet {
        operator,
        depositor: *depositor,
        previous,
    });

    info!(%operator, %depositor, %previous, "Changed node operator depositor");

    Ok(())
}

/// Pay the refund owed to the caller, as a former guarantor, to `recipient`.
pub fn claim_refund<R, H: Host>(
    ctx: Context<'_, R>,
    state: &mut State,
    host: &mut H,
    recipient: &Address,
) -> Result<Amount, Error> {
    ctx.when_resumed(state)?;
    ctx.non_payable()?;

    if recipient.is_zero() {
        return Err(Error::ZeroArgument("recipient"));
    }

    let guarantor = ctx.sender();
    let amount = state.ledger.take_refund(&guarantor)?;

    state.events.push(Event::GuarantorRefundClaimed {
        guarantor,
        recipient: *recipient,
        amount,
    });

    send_value(host, recipient, amount)?;

    info!(%guarantor, %recipient, %amount, "Claimed guarantor refund");

    Ok(amount)
}
