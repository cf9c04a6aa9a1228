use crate::{Address, Amount, Deposit, DepositAuth, StakingVault, WithdrawalCredentials};

/// Ether could not be delivered to the recipient.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Failed to send {amount} to {recipient}")]
pub struct TransferError {
    pub recipient: Address,
    pub amount: Amount,
}

/// The execution environment the guarantee runs in.
///
/// Gives access to staking vaults by address, delivers ether held by the
/// guarantee to recipients, and checks deposit message signatures.
pub trait Host {
    type Vault: StakingVault;

    fn vault(&self, address: &Address) -> Option<&Self::Vault>;

    fn vault_mut(&mut self, address: &Address) -> Option<&mut Self::Vault>;

    /// Deliver `amount` held by the guarantee to `recipient`.
    fn send_value(&mut self, recipient: &Address, amount: Amount) -> Result<(), TransferError>;

    /// Check the BLS signature of a deposit message for the given credentials.
    fn verify_deposit_message(
        &self,
        deposit: &Deposit,
        auth: &DepositAuth,
        withdrawal_credentials: &WithdrawalCredentials,
    ) -> bool;
}
