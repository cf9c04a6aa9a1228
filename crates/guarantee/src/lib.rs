//! Predeposit guarantee.
//!
//! Lets a staking vault bootstrap validators run by a third-party node
//! operator without trusting the operator with the validators' withdrawal
//! credentials:
//!
//! 1. The operator bonds ether, then predeposits a small amount to each new
//!    validator through the vault, locking the same amount of bond.
//! 2. Once the validator is visible on the beacon chain, anyone proves its
//!    withdrawal credentials against a historical beacon block root, which
//!    unlocks the bond and allows full deposits.
//! 3. If the credentials point anywhere else, proving so forfeits the
//!    operator's bond, which the vault owner pays out as compensation.

#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

mod call;
mod error;
mod event;
mod guarantee;
mod handle;
mod params;
mod pause;
mod registry;
mod state;

pub use call::Call;
pub use error::{Error, ErrorKind};
pub use event::Event;
pub use guarantee::PredepositGuarantee;
pub use params::Params;
pub use pause::{PauseController, PauseError, Role, PAUSE_INFINITELY};
pub use registry::{ValidatorRegistry, ValidatorStatus};
pub use state::State;

pub use pdg_core_state_machine::ValidatorStage;
