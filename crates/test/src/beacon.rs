//! A minimal beacon chain model producing structurally real witnesses.
//!
//! Only the parts of the containers on the proof path are faithful; every
//! other field is filled with a distinct placeholder chunk.

use pdg_core_types::{BlsPublicKey, Hash, ValidatorWitness, WithdrawalCredentials};
use pdg_proof::ssz::{mix_in_length, pubkey_wc_parent, sha256_pair, u64_chunk, zero_hashes};
use pdg_proof::{ProofParams, GI_STATE_ROOT};

/// Depth of the validator list data tree (`VALIDATOR_REGISTRY_LIMIT = 2^40`).
const LIST_DEPTH: usize = 40;

/// Depth of the `BeaconBlockHeader` tree (5 fields).
const HEADER_DEPTH: usize = 3;

const FAR_FUTURE_EPOCH: u64 = u64::MAX;

#[derive(Clone, Debug)]
struct Validator {
    pubkey: BlsPublicKey,
    withdrawal_credentials: WithdrawalCredentials,
    effective_balance_gwei: u64,
}

impl Validator {
    /// Siblings of the `(pubkey, withdrawal_credentials)` node, bottom-up.
    fn siblings(&self) -> [Hash; 2] {
        let balance_slashed = sha256_pair(&u64_chunk(self.effective_balance_gwei), &u64_chunk(0));
        let epochs = sha256_pair(
            &sha256_pair(&u64_chunk(0), &u64_chunk(0)),
            &sha256_pair(&u64_chunk(FAR_FUTURE_EPOCH), &u64_chunk(FAR_FUTURE_EPOCH)),
        );

        [balance_slashed, epochs]
    }

    fn root(&self) -> Hash {
        let [balance_slashed, epochs] = self.siblings();
        let left = sha256_pair(
            &pubkey_wc_parent(&self.pubkey, &self.withdrawal_credentials),
            &balance_slashed,
        );

        sha256_pair(&left, &epochs)
    }
}

/// Layers of a sparse binary Merkle tree of the given depth, bottom-up.
///
/// Missing nodes are roots of all-zero subtrees.
struct Tree {
    layers: Vec<Vec<Hash>>,
    zeros: Vec<Hash>,
}

impl Tree {
    fn new(leaves: Vec<Hash>, depth: usize) -> Self {
        let zeros = zero_hashes(depth);
        let mut layers = vec![leaves];

        for d in 0..depth {
            let layer = &layers[d];
            let next = layer
                .chunks(2)
                .map(|pair| sha256_pair(&pair[0], pair.get(1).unwrap_or(&zeros[d])))
                .collect();

            layers.push(next);
        }

        Self { layers, zeros }
    }

    fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    fn root(&self) -> Hash {
        let depth = self.depth();
        self.layers[depth].first().copied().unwrap_or(self.zeros[depth])
    }

    fn branch(&self, index: usize) -> Vec<Hash> {
        (0..self.depth())
            .map(|d| {
                let sibling = (index >> d) ^ 1;
                self.layers[d].get(sibling).copied().unwrap_or(self.zeros[d])
            })
            .collect()
    }
}

/// The validator registry of a beacon state.
#[derive(Clone, Debug, Default)]
pub struct BeaconState {
    validators: Vec<Validator>,
}

impl BeaconState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator with 32 ETH of effective balance, returning its index.
    pub fn add_validator(&mut self, pubkey: BlsPublicKey, wc: WithdrawalCredentials) -> u64 {
        self.validators.push(Validator {
            pubkey,
            withdrawal_credentials: wc,
            effective_balance_gwei: 32_000_000_000,
        });

        (self.validators.len() - 1) as u64
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Seal the state in a block at `slot`, laid out as `params` expects
    /// for that slot.
    pub fn block(&self, slot: u64, proposer_index: u64, params: &ProofParams) -> BeaconBlock {
        let first_validator = params.first_validator_gindex(slot);

        // header (3) ‖ state (d) ‖ list data (1) ‖ items (40)
        let state_depth = first_validator.depth() as usize - HEADER_DEPTH - 1 - LIST_DEPTH;
        let state_gindex = first_validator.get() >> (LIST_DEPTH + 1);
        let validators_field = (state_gindex - (GI_STATE_ROOT.get() << state_depth)) as usize;

        let list = Tree::new(self.validators.iter().map(Validator::root).collect(), LIST_DEPTH);
        let length = u64_chunk(self.validators.len() as u64);

        let mut fields: Vec<Hash> = (0..1u64 << state_depth)
            .map(|i| u64_chunk(0xfeed_0000 + i))
            .collect();
        fields[validators_field] = mix_in_length(&list.root(), self.validators.len() as u64);

        let state = Tree::new(fields, state_depth);

        let header = Tree::new(
            vec![
                u64_chunk(slot),
                u64_chunk(proposer_index),
                Hash::new([0xaa; 32]),
                state.root(),
                Hash::new([0xbb; 32]),
            ],
            HEADER_DEPTH,
        );

        BeaconBlock {
            slot,
            proposer_index,
            validators: self.validators.clone(),
            list,
            length,
            state,
            validators_field,
            header,
        }
    }
}

/// A beacon block header committing to a [`BeaconState`].
pub struct BeaconBlock {
    slot: u64,
    proposer_index: u64,
    validators: Vec<Validator>,
    list: Tree,
    length: Hash,
    state: Tree,
    validators_field: usize,
    header: Tree,
}

impl BeaconBlock {
    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Root of the block header, as exposed to the execution layer by the
    /// block that follows it.
    pub fn root(&self) -> Hash {
        self.header.root()
    }

    /// Witness for the validator at `index`, to be checked against the root
    /// recorded for `child_block_timestamp`.
    pub fn witness(&self, index: u64, child_block_timestamp: u64) -> ValidatorWitness {
        let validator = &self.validators[index as usize];

        let mut proof = validator.siblings().to_vec();
        proof.extend(self.list.branch(index as usize));
        proof.push(self.length);
        proof.extend(self.state.branch(self.validators_field));
        proof.extend(self.header.branch(3));

        ValidatorWitness {
            pubkey: validator.pubkey.as_bytes().to_vec(),
            validator_index: index,
            child_block_timestamp,
            proof,
            slot: self.slot,
            proposer_index: self.proposer_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use pdg_core_types::Address;
    use pdg_proof::{verify_pubkey_wc_proof, ProofError, ELECTRA_FORK_SLOT};

    use super::*;

    fn state() -> (BeaconState, WithdrawalCredentials) {
        let wc = WithdrawalCredentials::from_address(0x02, &Address::new([9; 20]));
        let mut state = BeaconState::new();

        for i in 0..5 {
            state.add_validator(BlsPublicKey::new([i + 1; 48]), wc);
        }

        (state, wc)
    }

    #[test]
    fn witnesses_verify_in_both_layouts() {
        let (state, wc) = state();
        let params = ProofParams::MAINNET;

        for slot in [ELECTRA_FORK_SLOT - 1, ELECTRA_FORK_SLOT, ELECTRA_FORK_SLOT + 100] {
            let block = state.block(slot, 42, &params);

            for index in 0..state.len() as u64 {
                let witness = block.witness(index, 1000);
                verify_pubkey_wc_proof(&witness, &wc, block.root(), &params).unwrap();
            }
        }
    }

    #[test]
    fn witness_for_other_credentials_fails() {
        let (state, _) = state();
        let params = ProofParams::MAINNET;
        let block = state.block(ELECTRA_FORK_SLOT, 42, &params);

        let other = WithdrawalCredentials::from_address(0x02, &Address::new([8; 20]));
        let err = verify_pubkey_wc_proof(&block.witness(3, 1000), &other, block.root(), &params)
            .unwrap_err();

        assert!(matches!(err, ProofError::InvalidProof { .. }));
    }

    #[test]
    fn witness_with_wrong_index_fails() {
        let (state, wc) = state();
        let params = ProofParams::MAINNET;
        let block = state.block(ELECTRA_FORK_SLOT, 42, &params);

        let mut witness = block.witness(2, 1000);
        witness.validator_index = 3;

        let err = verify_pubkey_wc_proof(&witness, &wc, block.root(), &params).unwrap_err();
        assert!(matches!(err, ProofError::InvalidProof { .. }));
    }

    #[test]
    fn witness_with_lying_slot_fails() {
        let (state, wc) = state();
        let params = ProofParams::MAINNET;
        let block = state.block(ELECTRA_FORK_SLOT, 42, &params);

        // Claiming a Deneb slot would select the other layout
        let mut witness = block.witness(1, 1000);
        witness.slot = ELECTRA_FORK_SLOT - 1;

        let err = verify_pubkey_wc_proof(&witness, &wc, block.root(), &params).unwrap_err();
        assert!(matches!(
            err,
            ProofError::InvalidProofLength { .. } | ProofError::InvalidSlot { .. }
        ));
    }
}
