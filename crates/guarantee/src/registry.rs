use std::collections::BTreeMap;

use pdg_core_state_machine::{apply, Input, ValidatorStage};
use pdg_core_types::{Address, BlsPublicKey};

use crate::Error;

/// What the guarantee knows about a validator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatorStatus {
    pub stage: ValidatorStage,
    pub vault: Address,
    pub operator: Address,
}

/// Append-only record of every validator the guarantee has seen.
///
/// Records are never removed, and only move through [`apply`].
#[derive(Clone, Debug, Default)]
pub struct ValidatorRegistry {
    records: BTreeMap<BlsPublicKey, ValidatorStatus>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of `pubkey`, in stage `NONE` if unknown.
    pub fn status(&self, pubkey: &BlsPublicKey) -> ValidatorStatus {
        self.records.get(pubkey).copied().unwrap_or_default()
    }

    /// Status of `pubkey` after checking it accepts `input`.
    pub fn check(&self, pubkey: &BlsPublicKey, input: Input) -> Result<ValidatorStatus, Error> {
        let status = self.status(pubkey);

        apply(status.stage, input).map_err(|e| Error::from_transition(*pubkey, e))?;

        Ok(status)
    }

    /// Create a record for a new validator.
    pub fn create(
        &mut self,
        pubkey: BlsPublicKey,
        input: Input,
        vault: Address,
        operator: Address,
    ) -> Result<ValidatorStatus, Error> {
        let current = self.status(&pubkey);
        let stage = apply(current.stage, input).map_err(|e| Error::from_transition(pubkey, e))?;

        let status = ValidatorStatus {
            stage,
            vault,
            operator,
        };

        self.records.insert(pubkey, status);

        Ok(status)
    }

    /// Move an existing record forward.
    pub fn advance(&mut self, pubkey: &BlsPublicKey, input: Input) -> Result<ValidatorStatus, Error> {
        let status = self.status(pubkey);
        let stage = apply(status.stage, input).map_err(|e| Error::from_transition(*pubkey, e))?;

        let status = ValidatorStatus { stage, ..status };
        self.records.insert(*pubkey, status);

        Ok(status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlsPublicKey, &ValidatorStatus)> {
        self.records.iter()
    }

    /// Number of validators of `operator` in `stage`.
    pub fn count(&self, operator: &Address, stage: ValidatorStage) -> usize {
        self.records
            .values()
            .filter(|status| status.operator == *operator && status.stage == stage)
            .count()
    }
}
