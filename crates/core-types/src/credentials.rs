use core::fmt;

use crate::{Address, Hash};

/// The 32-byte withdrawal credentials field of a validator.
///
/// Layout for the address-bearing versions (`0x01`, `0x02`):
/// `version (1) || zero padding (11) || execution address (20)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WithdrawalCredentials([u8; Self::LENGTH]);

impl WithdrawalCredentials {
    pub const LENGTH: usize = 32;

    const PADDING: core::ops::Range<usize> = 1..12;
    const ADDRESS: core::ops::Range<usize> = 12..32;

    pub const fn new(value: [u8; Self::LENGTH]) -> Self {
        Self(value)
    }

    /// Well-formed credentials of the given version pointing at `address`.
    pub fn from_address(version: u8, address: &Address) -> Self {
        let mut value = [0; Self::LENGTH];
        value[0] = version;
        value[Self::ADDRESS].copy_from_slice(address.as_bytes());
        Self(value)
    }

    pub const fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    pub const fn version(&self) -> u8 {
        self.0[0]
    }

    /// Whether the bytes between the version and the address are all zero.
    pub fn has_zero_padding(&self) -> bool {
        self.0[Self::PADDING].iter().all(|b| *b == 0)
    }

    /// The trailing 20 bytes, interpreted as an execution-layer address.
    pub fn address(&self) -> Address {
        let mut address = [0; Address::LENGTH];
        address.copy_from_slice(&self.0[Self::ADDRESS]);
        Address::new(address)
    }

    /// The credentials as an SSZ chunk.
    pub const fn to_chunk(&self) -> Hash {
        Hash::new(self.0)
    }
}

impl From<[u8; WithdrawalCredentials::LENGTH]> for WithdrawalCredentials {
    fn from(value: [u8; WithdrawalCredentials::LENGTH]) -> Self {
        Self(value)
    }
}

impl fmt::Display for WithdrawalCredentials {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for WithdrawalCredentials {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WithdrawalCredentials({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let addr = Address::new([0xab; 20]);
        let wc = WithdrawalCredentials::from_address(0x02, &addr);

        assert_eq!(wc.version(), 0x02);
        assert!(wc.has_zero_padding());
        assert_eq!(wc.address(), addr);

        let mut bytes = *wc.as_bytes();
        bytes[5] = 1;
        assert!(!WithdrawalCredentials::new(bytes).has_zero_padding());
    }
}
