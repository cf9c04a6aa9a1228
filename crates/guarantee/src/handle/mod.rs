//! Operations of the guarantee, each run against a staged [`State`].
//!
//! Every operation checks all of its guards before its single external
//! effect (a vault deposit or an ether transfer), which comes last.

pub mod bond;
pub mod deposit;
pub mod disprove;
pub mod pause;
pub mod predeposit;
pub mod prove;

use derive_where::derive_where;
use tracing::warn;

use pdg_core_types::{
    Address, Amount, BlsPublicKey, Deposit, Host, StakingVault, WithdrawalCredentials,
    SIGNATURE_LENGTH,
};
use pdg_proof::{ssz, ProofError, ProofVerifier};

use crate::{Call, Error, Params, State};

/// Read-only inputs of an operation.
#[derive_where(Clone, Copy)]
pub struct Context<'a, R> {
    /// Address of the guarantee itself
    pub address: Address,
    pub params: &'a Params,
    pub verifier: &'a ProofVerifier<R>,
    pub call: &'a Call,
}

impl<R> Context<'_, R> {
    pub fn sender(&self) -> Address {
        self.call.sender
    }

    pub fn now(&self) -> u64 {
        self.call.timestamp
    }

    pub fn when_resumed(&self, state: &State) -> Result<(), Error> {
        state.pause.check_resumed(self.now())?;
        Ok(())
    }

    pub fn non_payable(&self) -> Result<(), Error> {
        if !self.call.value.is_zero() {
            return Err(Error::UnexpectedValue(self.call.value));
        }

        Ok(())
    }

    /// The sender must be allowed to deposit on behalf of `operator`.
    pub fn check_depositor(&self, state: &State, operator: &Address) -> Result<(), Error> {
        let sender = self.sender();

        if sender != state.ledger.depositor_of(operator) {
            return Err(Error::NotDepositor {
                operator: *operator,
                sender,
            });
        }

        Ok(())
    }
}

/// Snapshot of the vault fields an operation needs, so that the vault can
/// be borrowed mutably for the deposit at the end.
#[derive(Copy, Clone, Debug)]
pub struct VaultInfo {
    pub address: Address,
    pub owner: Address,
    pub operator: Address,
    pub depositor: Address,
    pub withdrawal_credentials: WithdrawalCredentials,
}

impl VaultInfo {
    pub fn load<H: Host>(host: &H, address: &Address) -> Result<Self, Error> {
        let vault = host
            .vault(address)
            .ok_or(Error::VaultNotFound(*address))?;

        Ok(Self {
            address: vault.address(),
            owner: vault.owner(),
            operator: vault.node_operator(),
            depositor: vault.depositor(),
            withdrawal_credentials: vault.withdrawal_credentials(),
        })
    }

    pub fn check_owner(&self, sender: &Address) -> Result<(), Error> {
        if *sender != self.owner {
            return Err(Error::NotStakingVaultOwner {
                vault: self.address,
                sender: *sender,
            });
        }

        Ok(())
    }

    /// The vault must accept deposits routed through the guarantee.
    pub fn check_depositor_is(&self, guarantee: &Address) -> Result<(), Error> {
        if self.depositor != *guarantee {
            return Err(Error::GuaranteeNotDepositor {
                vault: self.address,
                depositor: self.depositor,
            });
        }

        Ok(())
    }
}

pub fn parse_pubkey(bytes: &[u8]) -> Result<BlsPublicKey, Error> {
    BlsPublicKey::try_from(bytes).map_err(|e| Error::InvalidPubkeyLength(e.0))
}

pub fn parse_witness_pubkey(bytes: &[u8]) -> Result<BlsPublicKey, Error> {
    BlsPublicKey::try_from(bytes).map_err(|e| ProofError::InvalidPubkeyLength(e.0).into())
}

/// Amount of a deposit in gwei; zero and fractional amounts are rejected.
pub fn deposit_gwei(pubkey: &BlsPublicKey, amount: Amount) -> Result<u64, Error> {
    match amount.to_gwei() {
        Some(gwei) if gwei > 0 => Ok(gwei),
        _ => Err(Error::InvalidDepositAmount {
            pubkey: *pubkey,
            amount,
        }),
    }
}

/// The supplied deposit data root must commit to the deposit for `wc`.
pub fn check_deposit_data_root(
    pubkey: &BlsPublicKey,
    wc: &WithdrawalCredentials,
    deposit: &Deposit,
) -> Result<(), Error> {
    let gwei = deposit_gwei(pubkey, deposit.amount)?;
    let root = ssz::deposit_data_root(pubkey, wc, gwei, &deposit.signature);

    if root != deposit.deposit_data_root {
        return Err(Error::DepositDataRootMismatch(*pubkey));
    }

    Ok(())
}

/// A deposit to an already registered validator, which needs no signature.
pub fn unsigned_deposit(
    pubkey: &BlsPublicKey,
    wc: &WithdrawalCredentials,
    amount: Amount,
) -> Result<Deposit, Error> {
    let gwei = deposit_gwei(pubkey, amount)?;
    let signature = [0; SIGNATURE_LENGTH];
    let root = ssz::deposit_data_root(pubkey, wc, gwei, &signature);

    Ok(Deposit::new(pubkey.as_bytes().to_vec(), signature, amount, root))
}

pub fn deposit_to_beacon_chain<H: Host>(
    host: &mut H,
    vault: &Address,
    deposits: &[Deposit],
) -> Result<(), Error> {
    let vault = host
        .vault_mut(vault)
        .ok_or(Error::VaultNotFound(*vault))?;

    vault.deposit_to_beacon_chain(deposits)?;

    Ok(())
}

pub fn send_value<H: Host>(host: &mut H, recipient: &Address, amount: Amount) -> Result<(), Error> {
    host.send_value(recipient, amount).map_err(|e| {
        warn!(%recipient, %amount, "Failed to deliver payment");
        Error::from(e)
    })
}
