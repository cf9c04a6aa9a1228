use core::fmt;
use core::iter::Sum;

/// An amount of ether, in wei.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const WEI_PER_GWEI: u128 = 1_000_000_000;
    pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    pub const fn from_gwei(gwei: u64) -> Self {
        Self(gwei as u128 * Self::WEI_PER_GWEI)
    }

    pub const fn ether(ether: u64) -> Self {
        Self(ether as u128 * Self::WEI_PER_ETHER)
    }

    pub const fn as_wei(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The amount in gwei, if it is a whole number of gwei that fits the
    /// consensus-layer `u64` amount field.
    pub fn to_gwei(&self) -> Option<u64> {
        if self.0 % Self::WEI_PER_GWEI != 0 {
            return None;
        }

        u64::try_from(self.0 / Self::WEI_PER_GWEI).ok()
    }

    /// Whether the amount is a (possibly zero) whole multiple of `unit`.
    pub fn is_multiple_of(&self, unit: Amount) -> bool {
        unit.0 != 0 && self.0 % unit.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_mul(self, n: u64) -> Option<Self> {
        self.0.checked_mul(u128::from(n)).map(Self)
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|a| a.0).sum())
    }
}

impl fmt::Display for Amount {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}
