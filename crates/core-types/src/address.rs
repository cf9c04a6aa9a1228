use core::fmt;
use core::str::FromStr;

/// An execution-layer account identity: operators, guarantors, vaults, recipients.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; Self::LENGTH]);

impl Address {
    pub const LENGTH: usize = 20;

    /// The zero address, used as the "unset" sentinel for arguments.
    pub const ZERO: Self = Self([0; Self::LENGTH]);

    pub const fn new(value: [u8; Self::LENGTH]) -> Self {
        Self(value)
    }

    pub const fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; Self::LENGTH]
    }
}

impl From<[u8; Address::LENGTH]> for Address {
    fn from(value: [u8; Address::LENGTH]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseAddressError {
    #[error("Invalid hex in address: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid address length: expected {expected}, got {actual}")]
    Length { expected: usize, actual: usize },
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;

        let value = <[u8; Self::LENGTH]>::try_from(bytes.as_slice()).map_err(|_| {
            ParseAddressError::Length {
                expected: Self::LENGTH,
                actual: bytes.len(),
            }
        })?;

        Ok(Self(value))
    }
}
