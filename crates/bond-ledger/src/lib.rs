//! Bond ledger: what each node operator has bonded, what is locked behind
//! in-flight predeposits, who may move the bond, and refunds owed to former
//! guarantors.

#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

mod error;
mod ledger;

pub use error::BondError;
pub use ledger::{BondLedger, GuarantorChange, OperatorBond};
