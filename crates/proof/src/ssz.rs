//! SSZ hash tree root helpers for the few containers the guarantee touches.

use sha2::{Digest, Sha256};

use pdg_core_types::{BlsPublicKey, Hash, WithdrawalCredentials, SIGNATURE_LENGTH};

/// SHA-256 of the concatenation of two chunks: the parent of two Merkle nodes.
pub fn sha256_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Hash::new(hasher.finalize().into())
}

fn sha256_padded(data: &[u8], padding: usize) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.update(&[0u8; Hash::LENGTH][..padding]);
    Hash::new(hasher.finalize().into())
}

/// A `uint64` packed into a chunk, little-endian, right-padded with zeros.
pub fn u64_chunk(value: u64) -> Hash {
    let mut chunk = [0; Hash::LENGTH];
    chunk[..8].copy_from_slice(&value.to_le_bytes());
    Hash::new(chunk)
}

/// Root of a 48-byte pubkey: two chunks, the second zero-padded.
pub fn pubkey_root(pubkey: &BlsPublicKey) -> Hash {
    sha256_padded(pubkey.as_bytes(), 16)
}

/// Parent node of the first two fields of a `Validator` container.
pub fn pubkey_wc_parent(pubkey: &BlsPublicKey, wc: &WithdrawalCredentials) -> Hash {
    sha256_pair(&pubkey_root(pubkey), &wc.to_chunk())
}

/// Parent node of the first two fields of a `BeaconBlockHeader`.
pub fn slot_proposer_node(slot: u64, proposer_index: u64) -> Hash {
    sha256_pair(&u64_chunk(slot), &u64_chunk(proposer_index))
}

/// Root of the `length` mix-in for SSZ lists.
pub fn mix_in_length(root: &Hash, length: u64) -> Hash {
    sha256_pair(root, &u64_chunk(length))
}

/// Hash tree root of a `DepositData` container, as checked by the deposit contract.
pub fn deposit_data_root(
    pubkey: &BlsPublicKey,
    wc: &WithdrawalCredentials,
    amount_gwei: u64,
    signature: &[u8; SIGNATURE_LENGTH],
) -> Hash {
    let signature_root = sha256_pair(
        &sha256_padded(&signature[..64], 0),
        &sha256_padded(&signature[64..], 32),
    );

    sha256_pair(
        &pubkey_wc_parent(pubkey, wc),
        &sha256_pair(&u64_chunk(amount_gwei), &signature_root),
    )
}

/// Roots of all-zero subtrees: `zero_hashes(n)[d]` is the root of a subtree of depth `d`.
pub fn zero_hashes(depth: usize) -> Vec<Hash> {
    let mut hashes = Vec::with_capacity(depth + 1);
    hashes.push(Hash::ZERO);

    for d in 0..depth {
        let next = sha256_pair(&hashes[d], &hashes[d]);
        hashes.push(next);
    }

    hashes
}
