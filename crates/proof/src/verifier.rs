use tracing::debug;

use pdg_core_types::{BlsPublicKey, Hash, ValidatorWitness, WithdrawalCredentials};

use crate::ssz::{pubkey_wc_parent, slot_proposer_node};
use crate::{verify_proof, BeaconRoots, GIndex, ProofError};

/// Maximum number of validators in the beacon state (`VALIDATOR_REGISTRY_LIMIT`).
pub const VALIDATOR_REGISTRY_LIMIT: u64 = 1 << 40;

/// `state_root` in a `BeaconBlockHeader` (5 fields, depth 3).
pub const GI_STATE_ROOT: GIndex = GIndex::new(11);

/// Parent of `pubkey` and `withdrawal_credentials` in a `Validator` (8 fields, depth 3).
pub const GI_PUBKEY_WC_PARENT: GIndex = GIndex::new(4);

/// `validators[0]` in the block header tree, for a `BeaconState` of 28 fields (Deneb):
/// `state_root (11) ‖ state.validators (43) ‖ list data (2) ‖ item 0 (2^40)`.
pub const GI_FIRST_VALIDATOR_DENEB: GIndex = GIndex::new(726 << 40);

/// `validators[0]` in the block header tree, for a `BeaconState` of 37 fields (Electra):
/// `state_root (11) ‖ state.validators (75) ‖ list data (2) ‖ item 0 (2^40)`.
pub const GI_FIRST_VALIDATOR_ELECTRA: GIndex = GIndex::new(1430 << 40);

/// First slot of the Electra fork on mainnet.
pub const ELECTRA_FORK_SLOT: u64 = 364_032 * 32;

/// Fork-dependent location of the validator list in the block header tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProofParams {
    /// Index of `validators[0]` for blocks before `pivot_slot`.
    pub gi_first_validator_prev: GIndex,
    /// Index of `validators[0]` for blocks at or after `pivot_slot`.
    pub gi_first_validator_curr: GIndex,
    /// Slot from which `gi_first_validator_curr` applies.
    pub pivot_slot: u64,
}

impl ProofParams {
    pub const MAINNET: Self = Self {
        gi_first_validator_prev: GI_FIRST_VALIDATOR_DENEB,
        gi_first_validator_curr: GI_FIRST_VALIDATOR_ELECTRA,
        pivot_slot: ELECTRA_FORK_SLOT,
    };

    pub fn first_validator_gindex(&self, slot: u64) -> GIndex {
        if slot < self.pivot_slot {
            self.gi_first_validator_prev
        } else {
            self.gi_first_validator_curr
        }
    }

    /// Index of the `(pubkey, withdrawal_credentials)` parent node of the
    /// validator at `validator_index`, in the tree of the block at `slot`.
    pub fn validator_gindex(&self, validator_index: u64, slot: u64) -> Result<GIndex, ProofError> {
        if validator_index >= VALIDATOR_REGISTRY_LIMIT {
            return Err(ProofError::InvalidValidatorIndex(validator_index));
        }

        self.first_validator_gindex(slot)
            .offset(validator_index)
            .and_then(|gindex| gindex.concat(GI_PUBKEY_WC_PARENT))
            .ok_or(ProofError::GIndexOverflow)
    }
}

impl Default for ProofParams {
    fn default() -> Self {
        Self::MAINNET
    }
}

/// A validator whose pubkey and withdrawal credentials were proven against a block root.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProvenValidator {
    pub pubkey: BlsPublicKey,
    pub validator_index: u64,
    pub withdrawal_credentials: WithdrawalCredentials,
    pub slot: u64,
}

/// Verify that the validator described by `witness` has withdrawal credentials `wc`
/// in the beacon block with root `block_root`.
///
/// Pure: depends only on its arguments.
pub fn verify_pubkey_wc_proof(
    witness: &ValidatorWitness,
    wc: &WithdrawalCredentials,
    block_root: Hash,
    params: &ProofParams,
) -> Result<ProvenValidator, ProofError> {
    let pubkey = BlsPublicKey::try_from(witness.pubkey.as_slice())
        .map_err(|e| ProofError::InvalidPubkeyLength(e.0))?;

    let gindex = params.validator_gindex(witness.validator_index, witness.slot)?;

    let expected = gindex.depth() as usize;
    if witness.proof.len() != expected {
        return Err(ProofError::InvalidProofLength {
            expected,
            actual: witness.proof.len(),
        });
    }

    // The header's (slot, proposer_index) node is the second to last sibling on
    // the path from state_root, which pins the slot used to pick the gindex.
    let slot_node = slot_proposer_node(witness.slot, witness.proposer_index);
    if witness.proof[expected - 2] != slot_node {
        return Err(ProofError::InvalidSlot {
            slot: witness.slot,
            proposer_index: witness.proposer_index,
        });
    }

    verify_proof(
        &witness.proof,
        block_root,
        pubkey_wc_parent(&pubkey, wc),
        gindex,
    )?;

    Ok(ProvenValidator {
        pubkey,
        validator_index: witness.validator_index,
        withdrawal_credentials: *wc,
        slot: witness.slot,
    })
}

/// Verifies witnesses against the block roots exposed by a [`BeaconRoots`] source.
#[derive(Clone, Debug)]
pub struct ProofVerifier<R> {
    roots: R,
    params: ProofParams,
}

impl<R> ProofVerifier<R>
where
    R: BeaconRoots,
{
    pub fn new(roots: R, params: ProofParams) -> Self {
        Self { roots, params }
    }

    pub fn params(&self) -> &ProofParams {
        &self.params
    }

    pub fn roots(&self) -> &R {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut R {
        &mut self.roots
    }

    /// Verify `witness` against the parent block root of its child block timestamp.
    pub fn validate_pubkey_wc_proof(
        &self,
        witness: &ValidatorWitness,
        wc: &WithdrawalCredentials,
    ) -> Result<ProvenValidator, ProofError> {
        if witness.pubkey.len() != BlsPublicKey::LENGTH {
            return Err(ProofError::InvalidPubkeyLength(witness.pubkey.len()));
        }

        let block_root = self
            .roots
            .parent_block_root(witness.child_block_timestamp)
            .ok_or(ProofError::RootNotFound(witness.child_block_timestamp))?;

        let proven = verify_pubkey_wc_proof(witness, wc, block_root, &self.params)?;

        debug!(
            pubkey = %proven.pubkey,
            index = proven.validator_index,
            slot = proven.slot,
            %block_root,
            "Verified validator withdrawal credentials proof"
        );

        Ok(proven)
    }
}
