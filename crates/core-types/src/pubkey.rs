use core::fmt;

/// A compressed BLS12-381 validator public key.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlsPublicKey([u8; Self::LENGTH]);

impl BlsPublicKey {
    pub const LENGTH: usize = 48;

    pub const fn new(value: [u8; Self::LENGTH]) -> Self {
        Self(value)
    }

    pub const fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid pubkey length: expected {expected}, got {0}", expected = BlsPublicKey::LENGTH)]
pub struct InvalidPubkeyLength(pub usize);

impl TryFrom<&[u8]> for BlsPublicKey {
    type Error = InvalidPubkeyLength;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| InvalidPubkeyLength(bytes.len()))
    }
}

impl From<[u8; BlsPublicKey::LENGTH]> for BlsPublicKey {
    fn from(value: [u8; BlsPublicKey::LENGTH]) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlsPublicKey {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for BlsPublicKey {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsPublicKey({self})")
    }
}
