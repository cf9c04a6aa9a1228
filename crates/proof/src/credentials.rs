use core::ops::RangeInclusive;

use pdg_core_types::{Address, WithdrawalCredentials};

use crate::ProofError;

/// The inclusive range of accepted withdrawal credentials versions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WcVersions {
    pub min: u8,
    pub max: u8,
}

impl WcVersions {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, version: u8) -> bool {
        self.range().contains(&version)
    }

    pub fn range(&self) -> RangeInclusive<u8> {
        self.min..=self.max
    }
}

impl Default for WcVersions {
    /// `0x01` (execution address) and `0x02` (compounding).
    fn default() -> Self {
        Self::new(0x01, 0x02)
    }
}

/// Check that `wc` is a supported, well-formed credential pointing at `vault`.
///
/// The three failures are kept apart: an unsupported version, a malformed
/// layout, and a well-formed credential pointing elsewhere.
pub fn validate_withdrawal_credentials(
    wc: &WithdrawalCredentials,
    vault: &Address,
    versions: WcVersions,
) -> Result<(), ProofError> {
    let version = wc.version();

    if !versions.contains(version) {
        return Err(ProofError::UnsupportedWcVersion(version));
    }

    if !wc.has_zero_padding() {
        return Err(ProofError::MalformedWc(*wc));
    }

    let actual = wc.address();
    if actual != *vault {
        return Err(ProofError::WcMismatch {
            vault: *vault,
            actual,
        });
    }

    Ok(())
}
