//! Common data types and abstractions for the predeposit guarantee.

#![forbid(unsafe_code)]
#![deny(unused_crate_dependencies, trivial_casts, trivial_numeric_casts)]
#![warn(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    variant_size_differences
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

mod address;
mod amount;
mod credentials;
mod deposit;
mod hash;
mod host;
mod pubkey;
mod vault;
mod witness;

pub use address::{Address, ParseAddressError};
pub use amount::Amount;
pub use credentials::WithdrawalCredentials;
pub use deposit::{Deposit, DepositAuth, ValidatorTopUp, SIGNATURE_LENGTH};
pub use hash::Hash;
pub use host::{Host, TransferError};
pub use pubkey::{BlsPublicKey, InvalidPubkeyLength};
pub use vault::{StakingVault, VaultError};
pub use witness::ValidatorWitness;
