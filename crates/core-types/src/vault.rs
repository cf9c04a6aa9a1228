use crate::{Address, Deposit, WithdrawalCredentials};

/// A failed call into a staking vault.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Vault {vault} rejected the beacon chain deposit: {reason}")]
pub struct VaultError {
    pub vault: Address,
    pub reason: String,
}

/// The slice of a staking vault the guarantee relies on.
///
/// The guarantee never assumes a concrete vault: it reads the vault's
/// identities and withdrawal credentials, and asks it to forward deposits
/// to the beacon chain deposit contract.
pub trait StakingVault {
    /// The vault's own execution-layer address.
    fn address(&self) -> Address;

    /// Owner of the vault, allowed to prove unknown validators and claim compensation.
    fn owner(&self) -> Address;

    /// Node operator assigned to the vault.
    fn node_operator(&self) -> Address;

    /// The address the vault accepts deposit calls from.
    fn depositor(&self) -> Address;

    /// Withdrawal credentials every validator of this vault must carry.
    fn withdrawal_credentials(&self) -> WithdrawalCredentials;

    /// Forward the whole batch to the beacon chain, or nothing at all.
    fn deposit_to_beacon_chain(&mut self, deposits: &[Deposit]) -> Result<(), VaultError>;
}
