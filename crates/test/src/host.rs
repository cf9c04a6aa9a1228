use std::collections::{BTreeMap, BTreeSet};

use pdg_core_types::{
    Address, Amount, BlsPublicKey, Deposit, DepositAuth, Host, StakingVault, TransferError,
    VaultError, WithdrawalCredentials,
};

/// A staking vault recording the deposits it forwards.
#[derive(Clone, Debug)]
pub struct MockVault {
    pub address: Address,
    pub owner: Address,
    pub node_operator: Address,
    pub depositor: Address,
    pub withdrawal_credentials: WithdrawalCredentials,

    /// Deposits forwarded to the beacon chain so far
    pub deposits: Vec<Deposit>,

    /// Reject every deposit batch
    pub fail_deposits: bool,
}

impl MockVault {
    /// A vault with `0x02` credentials pointing at itself.
    pub fn new(address: Address, owner: Address, node_operator: Address, depositor: Address) -> Self {
        Self {
            address,
            owner,
            node_operator,
            depositor,
            withdrawal_credentials: WithdrawalCredentials::from_address(0x02, &address),
            deposits: Vec::new(),
            fail_deposits: false,
        }
    }

    pub fn with_withdrawal_credentials(self, withdrawal_credentials: WithdrawalCredentials) -> Self {
        Self {
            withdrawal_credentials,
            ..self
        }
    }

    pub fn deposited(&self) -> Amount {
        self.deposits.iter().map(|d| d.amount).sum()
    }
}

impl StakingVault for MockVault {
    fn address(&self) -> Address {
        self.address
    }

    fn owner(&self) -> Address {
        self.owner
    }

    fn node_operator(&self) -> Address {
        self.node_operator
    }

    fn depositor(&self) -> Address {
        self.depositor
    }

    fn withdrawal_credentials(&self) -> WithdrawalCredentials {
        self.withdrawal_credentials
    }

    fn deposit_to_beacon_chain(&mut self, deposits: &[Deposit]) -> Result<(), VaultError> {
        if self.fail_deposits {
            return Err(VaultError {
                vault: self.address,
                reason: "deposits are disabled".to_string(),
            });
        }

        self.deposits.extend_from_slice(deposits);
        Ok(())
    }
}

/// Execution environment holding vaults and tracking delivered ether.
#[derive(Clone, Debug, Default)]
pub struct MockHost {
    vaults: BTreeMap<Address, MockVault>,
    received: BTreeMap<Address, Amount>,
    rejecting: BTreeSet<Address>,
    bad_signatures: BTreeSet<BlsPublicKey>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vault(&mut self, vault: MockVault) -> Address {
        let address = vault.address;
        self.vaults.insert(address, vault);
        address
    }

    /// Ether delivered to `account` so far.
    pub fn received(&self, account: &Address) -> Amount {
        self.received.get(account).copied().unwrap_or_default()
    }

    /// Make every payment to `account` fail.
    pub fn reject_payments_to(&mut self, account: Address) {
        self.rejecting.insert(account);
    }

    pub fn accept_payments_to(&mut self, account: &Address) {
        self.rejecting.remove(account);
    }

    /// Make the deposit message signature of `pubkey` invalid.
    pub fn reject_signature_of(&mut self, pubkey: BlsPublicKey) {
        self.bad_signatures.insert(pubkey);
    }
}

impl Host for MockHost {
    type Vault = MockVault;

    fn vault(&self, address: &Address) -> Option<&MockVault> {
        self.vaults.get(address)
    }

    fn vault_mut(&mut self, address: &Address) -> Option<&mut MockVault> {
        self.vaults.get_mut(address)
    }

    fn send_value(&mut self, recipient: &Address, amount: Amount) -> Result<(), TransferError> {
        if self.rejecting.contains(recipient) {
            return Err(TransferError {
                recipient: *recipient,
                amount,
            });
        }

        let received = self.received.entry(*recipient).or_default();
        *received = received.checked_add(amount).ok_or(TransferError {
            recipient: *recipient,
            amount,
        })?;

        Ok(())
    }

    fn verify_deposit_message(
        &self,
        deposit: &Deposit,
        _auth: &DepositAuth,
        _withdrawal_credentials: &WithdrawalCredentials,
    ) -> bool {
        BlsPublicKey::try_from(deposit.pubkey.as_slice())
            .map(|pubkey| !self.bad_signatures.contains(&pubkey))
            .unwrap_or(false)
    }
}
