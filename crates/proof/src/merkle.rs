use pdg_core_types::Hash;

use crate::ssz::sha256_pair;
use crate::{GIndex, ProofError};

/// Fold `proof` over `leaf` along the path of `gindex`, returning the root it leads to.
pub fn process_proof(proof: &[Hash], leaf: Hash, gindex: GIndex) -> Result<Hash, ProofError> {
    let expected = gindex.depth() as usize;

    if proof.len() != expected {
        return Err(ProofError::InvalidProofLength {
            expected,
            actual: proof.len(),
        });
    }

    let mut node = leaf;
    let mut index = gindex.get();

    for sibling in proof {
        node = if index & 1 == 1 {
            sha256_pair(sibling, &node)
        } else {
            sha256_pair(&node, sibling)
        };

        index >>= 1;
    }

    Ok(node)
}

/// Check that `leaf` sits at `gindex` in the tree with the given `root`.
pub fn verify_proof(proof: &[Hash], root: Hash, leaf: Hash, gindex: GIndex) -> Result<(), ProofError> {
    let actual = process_proof(proof, leaf, gindex)?;

    if actual != root {
        return Err(ProofError::InvalidProof {
            expected: root,
            actual,
        });
    }

    Ok(())
}
