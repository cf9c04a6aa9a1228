use tracing::{info, warn};

use pdg_core_types::Address;

use crate::handle::Context;
use crate::pause::Role;
use crate::{Error, Event, State};

pub fn pause_for<R>(ctx: Context<'_, R>, state: &mut State, duration: u64) -> Result<u64, Error> {
    ctx.non_payable()?;
    state.pause.check_role(Role::Pause, &ctx.sender())?;

    let resume_since = state.pause.pause_for(ctx.now(), duration)?;
    state.events.push(Event::Paused { resume_since });

    warn!(sender = %ctx.sender(), %resume_since, "Paused");

    Ok(resume_since)
}

pub fn pause_until<R>(ctx: Context<'_, R>, state: &mut State, until: u64) -> Result<u64, Error> {
    ctx.non_payable()?;
    state.pause.check_role(Role::Pause, &ctx.sender())?;

    let resume_since = state.pause.pause_until(ctx.now(), until)?;
    state.events.push(Event::Paused { resume_since });

    warn!(sender = %ctx.sender(), %resume_since, "Paused");

    Ok(resume_since)
}

pub fn resume<R>(ctx: Context<'_, R>, state: &mut State) -> Result<(), Error> {
    ctx.non_payable()?;
    state.pause.check_role(Role::Resume, &ctx.sender())?;

    state.pause.resume(ctx.now())?;
    state.events.push(Event::Resumed);

    info!(sender = %ctx.sender(), "Resumed");

    Ok(())
}

pub fn grant_role<R>(
    ctx: Context<'_, R>,
    state: &mut State,
    role: Role,
    account: &Address,
) -> Result<(), Error> {
    ctx.non_payable()?;

    if state.pause.grant_role(&ctx.sender(), role, *account)? {
        state.events.push(Event::RoleGranted {
            role,
            account: *account,
        });

        info!(%role, %account, "Granted role");
    }

    Ok(())
}

pub fn revoke_role<R>(
    ctx: Context<'_, R>,
    state: &mut State,
    role: Role,
    account: &Address,
) -> Result<(), Error> {
    ctx.non_payable()?;

    if state.pause.revoke_role(&ctx.sender(), role, account)? {
        state.events.push(Event::RoleRevoked {
            role,
            account: *account,
        });

        info!(%role, %account, "Revoked role");
    }

    Ok(())
}
