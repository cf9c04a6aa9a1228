//! Verification of validator withdrawal credentials against consensus-layer history.
//!
//! A [`ValidatorWitness`](pdg_core_types::ValidatorWitness) proves that the
//! `(pubkey, withdrawal_credentials)` parent node of a validator container is
//! part of a beacon block whose root is exposed to the execution layer for a
//! given child block timestamp (EIP-4788).

#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

mod beacon_roots;
mod credentials;
mod error;
mod gindex;
mod merkle;
mod verifier;

pub mod ssz;

pub use beacon_roots::{BeaconRoots, BeaconRootsHistory, HISTORY_BUFFER_LENGTH};
pub use credentials::{validate_withdrawal_credentials, WcVersions};
pub use error::ProofError;
pub use gindex::GIndex;
pub use merkle::{process_proof, verify_proof};
pub use verifier::{
    verify_pubkey_wc_proof, ProofParams, ProofVerifier, ProvenValidator,
    GI_FIRST_VALIDATOR_DENEB, GI_FIRST_VALIDATOR_ELECTRA, GI_PUBKEY_WC_PARENT,
    GI_STATE_ROOT, ELECTRA_FORK_SLOT, VALIDATOR_REGISTRY_LIMIT,
};
