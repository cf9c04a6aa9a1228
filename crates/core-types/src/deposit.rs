use crate::{Amount, BlsPublicKey, Hash};

/// Length of a compressed BLS12-381 signature.
pub const SIGNATURE_LENGTH: usize = 96;

/// A beacon-chain deposit routed through a staking vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deposit {
    /// Raw validator pubkey, checked to be 48 bytes before use.
    pub pubkey: Vec<u8>,
    /// Compressed BLS signature over the deposit message.
    pub signature: [u8; SIGNATURE_LENGTH],
    /// Deposit amount, must be a whole number of gwei.
    pub amount: Amount,
    /// SSZ hash tree root of the `DepositData` container.
    pub deposit_data_root: Hash,
}

impl Deposit {
    pub fn new(
        pubkey: impl Into<Vec<u8>>,
        signature: [u8; SIGNATURE_LENGTH],
        amount: Amount,
        deposit_data_root: Hash,
    ) -> Self {
        Self {
            pubkey: pubkey.into(),
            signature,
            amount,
            deposit_data_root,
        }
    }
}

/// Uncompressed Y coordinates accompanying a deposit, used by the host to
/// check the deposit message signature without decompressing points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositAuth {
    /// Y coordinate of the pubkey (Fp).
    pub pubkey_y: [u8; 48],
    /// Y coordinate of the signature (Fp2, c0 || c1).
    pub signature_y: [u8; 96],
}

/// A request to route more ether to an already proven validator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidatorTopUp {
    pub pubkey: BlsPublicKey,
    pub amount: Amount,
}
