use crate::Hash;

/// A Merkle inclusion proof tying a validator's pubkey and withdrawal
/// credentials to the beacon block root exposed for `child_block_timestamp`.
///
/// The proof starts at the sibling of the `(pubkey, withdrawal_credentials)`
/// parent node inside the validator container and ends at the sibling of the
/// header's left half. Used once per call and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorWitness {
    /// Raw validator pubkey, expected to be 48 bytes.
    pub pubkey: Vec<u8>,
    /// Position of the validator in the beacon state validator list.
    pub validator_index: u64,
    /// Timestamp of the execution block whose parent beacon block root is proven against.
    pub child_block_timestamp: u64,
    /// Sibling nodes, leaf to root.
    pub proof: Vec<Hash>,
    /// Slot of the proven beacon block header.
    pub slot: u64,
    /// Proposer index of the proven beacon block header.
    pub proposer_index: u64,
}
