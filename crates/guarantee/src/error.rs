use core::fmt;

use pdg_bond_ledger::BondError;
use pdg_core_state_machine::{Input, InvalidTransition, ValidatorStage};
use pdg_core_types::{
    Address, Amount, BlsPublicKey, TransferError, VaultError, WithdrawalCredentials,
};
use pdg_proof::ProofError;

use crate::pause::PauseError;

/// Errors that can be yielded by the guarantee operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Bond(#[from] BondError),

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Pause(#[from] PauseError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Zero argument: {0}")]
    ZeroArgument(&'static str),

    #[error("Invalid pubkey length: expected 48, got {0}")]
    InvalidPubkeyLength(usize),

    #[error("Array length mismatch: {first} != {second}")]
    ArrayLengthMismatch { first: usize, second: usize },

    #[error("Call carries {0} but accepts no value")]
    UnexpectedValue(Amount),

    #[error("Invalid predeposit amount for {pubkey}: {amount}")]
    PredepositAmountInvalid { pubkey: BlsPublicKey, amount: Amount },

    #[error("Invalid deposit amount for {pubkey}: {amount}")]
    InvalidDepositAmount { pubkey: BlsPublicKey, amount: Amount },

    #[error("Deposit data root mismatch for {0}")]
    DepositDataRootMismatch(BlsPublicKey),

    #[error("Invalid deposit message signature for {0}")]
    InvalidDepositSignature(BlsPublicKey),

    #[error("Deposit amount overflow")]
    AmountOverflow,

    #[error("Unknown staking vault {0}")]
    VaultNotFound(Address),

    #[error("{sender} is not the owner of vault {vault}")]
    NotStakingVaultOwner { vault: Address, sender: Address },

    #[error("{sender} is not the depositor of node operator {operator}")]
    NotDepositor { operator: Address, sender: Address },

    #[error("Vault {vault} accepts deposits from {depositor}, not from the guarantee")]
    GuaranteeNotDepositor { vault: Address, depositor: Address },

    #[error("Compensation recipient must not be the vault {0}")]
    CompensateToVaultNotAllowed(Address),

    #[error("Validator {pubkey} is not new: {stage}")]
    ValidatorNotNew {
        pubkey: BlsPublicKey,
        stage: ValidatorStage,
    },

    #[error("Validator {pubkey} is not predeposited: {stage}")]
    ValidatorNotPredeposited {
        pubkey: BlsPublicKey,
        stage: ValidatorStage,
    },

    #[error("Validator {pubkey} is not proven: {stage}")]
    ValidatorNotProven {
        pubkey: BlsPublicKey,
        stage: ValidatorStage,
    },

    #[error("Validator {pubkey} is not disproven: {stage}")]
    ValidatorNotDisproven {
        pubkey: BlsPublicKey,
        stage: ValidatorStage,
    },

    #[error("Cannot deposit to validator {pubkey} in stage {stage}")]
    DepositToUnprovenValidator {
        pubkey: BlsPublicKey,
        stage: ValidatorStage,
    },

    #[error("Validator {pubkey} belongs to vault {expected}, not {actual}")]
    DepositToWrongVault {
        pubkey: BlsPublicKey,
        expected: Address,
        actual: Address,
    },

    #[error("Top-up batch spans vaults {expected} and {actual}")]
    MixedVaultsInBatch { expected: Address, actual: Address },

    #[error("Withdrawal credentials {0} match the vault's")]
    WithdrawalCredentialsMatch(WithdrawalCredentials),
}

impl Error {
    /// Map an invalid stage transition to the error describing what the
    /// operation expected of the validator.
    pub fn from_transition(pubkey: BlsPublicKey, transition: InvalidTransition) -> Self {
        let InvalidTransition { stage, input } = transition;

        match input {
            Input::Predeposit | Input::ProveUnknown => Error::ValidatorNotNew { pubkey, stage },
            Input::ProveValid | Input::ProveInvalid => {
                Error::ValidatorNotPredeposited { pubkey, stage }
            }
            Input::Activate => Error::ValidatorNotProven { pubkey, stage },
            Input::Compensate => Error::ValidatorNotDisproven { pubkey, stage },
            Input::TopUp => Error::DepositToUnprovenValidator { pubkey, stage },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Bond(e) => match e {
                BondError::ZeroArgument(_)
                | BondError::NotMultipleOfPredepositAmount { .. }
                | BondError::SameGuarantor(_)
                | BondError::SameDepositor(_)
                | BondError::Overflow => ErrorKind::InputValidation,
                BondError::NotGuarantor { .. } => ErrorKind::Authorization,
                BondError::NotEnoughUnlocked { .. }
                | BondError::NotEnoughLocked { .. }
                | BondError::LockedIsNotZero(_)
                | BondError::NothingToRefund(_) => ErrorKind::Economic,
            },

            Error::Proof(ProofError::InvalidPubkeyLength(_)) => ErrorKind::InputValidation,
            Error::Proof(_) => ErrorKind::Proof,

            Error::Pause(e) => match e {
                PauseError::NotResumed { .. }
                | PauseError::ResumedExpected
                | PauseError::PausedExpected => ErrorKind::Operational,
                PauseError::ZeroPauseDuration | PauseError::PauseUntilMustBeInFuture { .. } => {
                    ErrorKind::InputValidation
                }
                PauseError::MissingRole { .. } | PauseError::NotAdmin(_) => {
                    ErrorKind::Authorization
                }
            },

            Error::Transfer(_) | Error::Vault(_) => ErrorKind::Transfer,

            Error::ZeroArgument(_)
            | Error::InvalidPubkeyLength(_)
            | Error::ArrayLengthMismatch { .. }
            | Error::UnexpectedValue(_)
            | Error::PredepositAmountInvalid { .. }
            | Error::InvalidDepositAmount { .. }
            | Error::DepositDataRootMismatch(_)
            | Error::InvalidDepositSignature(_)
            | Error::AmountOverflow
            | Error::VaultNotFound(_)
            | Error::CompensateToVaultNotAllowed(_) => ErrorKind::InputValidation,

            Error::NotStakingVaultOwner { .. }
            | Error::NotDepositor { .. }
            | Error::GuaranteeNotDepositor { .. } => ErrorKind::Authorization,

            Error::ValidatorNotNew { .. }
            | Error::ValidatorNotPredeposited { .. }
            | Error::ValidatorNotProven { .. }
            | Error::ValidatorNotDisproven { .. }
            | Error::DepositToUnprovenValidator { .. }
            | Error::DepositToWrongVault { .. }
            | Error::MixedVaultsInBatch { .. }
            | Error::WithdrawalCredentialsMatch(_) => ErrorKind::StateMachine,
        }
    }
}

/// Broad classes of failures, as reported to callers and metrics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InputValidation,
    Authorization,
    Economic,
    StateMachine,
    Proof,
    Transfer,
    Operational,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputValidation => "input_validation",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Economic => "economic",
            ErrorKind::StateMachine => "state_machine",
            ErrorKind::Proof => "proof",
            ErrorKind::Transfer => "transfer",
            ErrorKind::Operational => "operational",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
