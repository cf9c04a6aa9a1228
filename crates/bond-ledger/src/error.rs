use pdg_core_types::{Address, Amount};

/// Errors that can be yielded by the bond ledger.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BondError {
    #[error("Zero argument: {0}")]
    ZeroArgument(&'static str),

    #[error("{sender} is not the guarantor of node operator {operator}")]
    NotGuarantor { operator: Address, sender: Address },

    #[error("Amount {amount} is not a multiple of the predeposit amount {unit}")]
    NotMultipleOfPredepositAmount { amount: Amount, unit: Amount },

    #[error("Not enough unlocked bond: unlocked {unlocked}, required {required}")]
    NotEnoughUnlocked { unlocked: Amount, required: Amount },

    #[error("Not enough locked bond: locked {locked}, required {required}")]
    NotEnoughLocked { locked: Amount, required: Amount },

    #[error("Locked bond is not zero: {0}")]
    LockedIsNotZero(Amount),

    #[error("{0} is already the guarantor")]
    SameGuarantor(Address),

    #[error("{0} is already the depositor")]
    SameDepositor(Address),

    #[error("Nothing to refund to {0}")]
    NothingToRefund(Address),

    #[error("Bond balance overflow")]
    Overflow,
}
