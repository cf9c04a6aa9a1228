use pdg_core_types::{Address, Amount, BlsPublicKey, WithdrawalCredentials};

use crate::pause::Role;

/// Changes committed by the guarantee, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    BalanceToppedUp {
        operator: Address,
        sender: Address,
        amount: Amount,
    },
    BalanceWithdrawn {
        operator: Address,
        recipient: Address,
        amount: Amount,
    },
    BalanceLocked {
        operator: Address,
        total: Amount,
        locked: Amount,
    },
    BalanceUnlocked {
        operator: Address,
        total: Amount,
        locked: Amount,
    },
    GuarantorSet {
        operator: Address,
        guarantor: Address,
        previous: Address,
    },
    GuarantorRefundAdded {
        guarantor: Address,
        operator: Address,
        amount: Amount,
    },
    GuarantorRefundClaimed {
        guarantor: Address,
        recipient: Address,
        amount: Amount,
    },
    DepositorSet {
        operator: Address,
        depositor: Address,
        previous: Address,
    },
    ValidatorPredeposited {
        pubkey: BlsPublicKey,
        operator: Address,
        vault: Address,
        withdrawal_credentials: WithdrawalCredentials,
    },
    ValidatorProven {
        pubkey: BlsPublicKey,
        operator: Address,
        vault: Address,
        withdrawal_credentials: WithdrawalCredentials,
    },
    UnknownValidatorProven {
        pubkey: BlsPublicKey,
        operator: Address,
        vault: Address,
    },
    ValidatorDisproven {
        pubkey: BlsPublicKey,
        operator: Address,
        vault: Address,
        invalid_withdrawal_credentials: WithdrawalCredentials,
    },
    ValidatorCompensated {
        pubkey: BlsPublicKey,
        vault: Address,
        recipient: Address,
        amount: Amount,
    },
    ValidatorActivated {
        pubkey: BlsPublicKey,
        vault: Address,
        amount: Amount,
    },
    DepositedToBeaconChain {
        pubkey: BlsPublicKey,
        vault: Address,
        amount: Amount,
    },
    Paused {
        resume_since: u64,
    },
    Resumed,
    RoleGranted {
        role: Role,
        account: Address,
    },
    RoleRevoked {
        role: Role,
        account: Address,
    },
}
