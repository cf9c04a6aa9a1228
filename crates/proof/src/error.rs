use pdg_core_types::{Address, Hash, WithdrawalCredentials};

/// Errors that can be yielded when verifying a validator witness.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    #[error("Invalid pubkey length: expected 48, got {0}")]
    InvalidPubkeyLength(usize),

    #[error("No beacon block root found for child block timestamp {0}")]
    RootNotFound(u64),

    #[error("Validator index {0} is outside the validator registry")]
    InvalidValidatorIndex(u64),

    #[error("Generalized index overflow")]
    GIndexOverflow,

    #[error("Invalid proof length: expected {expected}, got {actual}")]
    InvalidProofLength { expected: usize, actual: usize },

    #[error("Slot {slot} and proposer index {proposer_index} are not committed by the proof")]
    InvalidSlot { slot: u64, proposer_index: u64 },

    #[error("Proof does not lead to root {expected}, got {actual}")]
    InvalidProof { expected: Hash, actual: Hash },

    #[error("Unsupported withdrawal credentials version: {0}")]
    UnsupportedWcVersion(u8),

    #[error("Malformed withdrawal credentials: {0}")]
    MalformedWc(WithdrawalCredentials),

    #[error("Withdrawal credentials point to {actual}, expected vault {vault}")]
    WcMismatch { vault: Address, actual: Address },
}
