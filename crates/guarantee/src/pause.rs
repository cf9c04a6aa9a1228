use core::fmt;
use std::collections::BTreeSet;

use pdg_core_types::Address;

/// Pause duration meaning "until explicitly resumed".
pub const PAUSE_INFINITELY: u64 = u64::MAX;

/// Roles gating the pause switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Pause,
    Resume,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Pause => write!(f, "PAUSE_ROLE"),
            Role::Resume => write!(f, "RESUME_ROLE"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PauseError {
    #[error("Contract is paused until {resume_since}")]
    NotResumed { resume_since: u64 },

    #[error("Contract is already paused")]
    ResumedExpected,

    #[error("Contract is not paused")]
    PausedExpected,

    #[error("Pause duration must not be zero")]
    ZeroPauseDuration,

    #[error("Pause end {until} is in the past (now {now})")]
    PauseUntilMustBeInFuture { until: u64, now: u64 },

    #[error("{account} is missing role {role}")]
    MissingRole { role: Role, account: Address },

    #[error("{0} is not the admin")]
    NotAdmin(Address),
}

/// Emergency stop with an optional expiry.
///
/// The switch is paused while `now < resume_since`.
#[derive(Clone, Debug)]
pub struct PauseController {
    admin: Address,
    members: BTreeSet<(Role, Address)>,
    resume_since: u64,
}

impl PauseController {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            members: BTreeSet::new(),
            resume_since: 0,
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn resume_since(&self) -> u64 {
        self.resume_since
    }

    pub fn is_paused(&self, now: u64) -> bool {
        now < self.resume_since
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members.contains(&(role, *account))
    }

    pub fn check_role(&self, role: Role, account: &Address) -> Result<(), PauseError> {
        if !self.has_role(role, account) {
            return Err(PauseError::MissingRole {
                role,
                account: *account,
            });
        }

        Ok(())
    }

    pub fn check_resumed(&self, now: u64) -> Result<(), PauseError> {
        if self.is_paused(now) {
            return Err(PauseError::NotResumed {
                resume_since: self.resume_since,
            });
        }

        Ok(())
    }

    /// Returns `false` if `account` already had the role.
    pub fn grant_role(
        &mut self,
        sender: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, PauseError> {
        self.check_admin(sender)?;
        Ok(self.members.insert((role, account)))
    }

    /// Returns `false` if `account` did not have the role.
    pub fn revoke_role(
        &mut self,
        sender: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, PauseError> {
        self.check_admin(sender)?;
        Ok(self.members.remove(&(role, *account)))
    }

    fn check_admin(&self, sender: &Address) -> Result<(), PauseError> {
        if *sender != self.admin {
            return Err(PauseError::NotAdmin(*sender));
        }

        Ok(())
    }

    /// Pause for `duration` seconds, or forever with [`PAUSE_INFINITELY`].
    ///
    /// Returns the timestamp from which operations resume.
    pub fn pause_for(&mut self, now: u64, duration: u64) -> Result<u64, PauseError> {
        self.check_resumed(now).map_err(|_| PauseError::ResumedExpected)?;

        if duration == 0 {
            return Err(PauseError::ZeroPauseDuration);
        }

        self.resume_since = if duration == PAUSE_INFINITELY {
            PAUSE_INFINITELY
        } else {
            now.saturating_add(duration)
        };

        Ok(self.resume_since)
    }

    /// Pause up to and including `until`, or forever with [`PAUSE_INFINITELY`].
    pub fn pause_until(&mut self, now: u64, until: u64) -> Result<u64, PauseError> {
        self.check_resumed(now).map_err(|_| PauseError::ResumedExpected)?;

        if until < now {
            return Err(PauseError::PauseUntilMustBeInFuture { until, now });
        }

        self.resume_since = until.saturating_add(1);

        Ok(self.resume_since)
    }

    pub fn resume(&mut self, now: u64) -> Result<(), PauseError> {
        if !self.is_paused(now) {
            return Err(PauseError::PausedExpected);
        }

        self.resume_since = now;

        Ok(())
    }
}
