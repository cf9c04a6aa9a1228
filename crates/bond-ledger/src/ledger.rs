use std::collections::BTreeMap;

use tracing::debug;

use pdg_core_types::{Address, Amount};

use crate::BondError;

/// Bond of a single node operator.
///
/// # Invariant
/// - `locked <= total`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OperatorBond {
    pub total: Amount,
    pub locked: Amount,
}

impl OperatorBond {
    pub fn unlocked(&self) -> Amount {
        self.total.saturating_sub(self.locked)
    }
}

/// Outcome of a guarantor change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GuarantorChange {
    pub previous: Address,
    /// Bond moved into the previous guarantor's claimable refund.
    pub refund: Amount,
}

/// Keeps track of node operator bonds, delegations and pending refunds.
///
/// Bond moves in whole multiples of `unit`, the predeposit amount.
/// Ether itself is held by the caller; the ledger only does the accounting.
#[derive(Clone, Debug)]
pub struct BondLedger {
    unit: Amount,
    bonds: BTreeMap<Address, OperatorBond>,
    guarantors: BTreeMap<Address, Address>,
    depositors: BTreeMap<Address, Address>,
    refunds: BTreeMap<Address, Amount>,
}

impl BondLedger {
    /// Create a new ledger moving bond in multiples of `unit`.
    pub fn new(unit: Amount) -> Self {
        Self {
            unit,
            bonds: BTreeMap::new(),
            guarantors: BTreeMap::new(),
            depositors: BTreeMap::new(),
            refunds: BTreeMap::new(),
        }
    }

    pub fn unit(&self) -> Amount {
        self.unit
    }

    pub fn bond(&self, operator: &Address) -> OperatorBond {
        self.bonds.get(operator).copied().unwrap_or_default()
    }

    pub fn unlocked(&self, operator: &Address) -> Amount {
        self.bond(operator).unlocked()
    }

    /// The guarantor of `operator`, which is the operator itself unless delegated.
    pub fn guarantor_of(&self, operator: &Address) -> Address {
        self.guarantors.get(operator).copied().unwrap_or(*operator)
    }

    /// Whether someone other than the operator guarantees its bond.
    pub fn has_delegated_guarantor(&self, operator: &Address) -> bool {
        self.guarantors.contains_key(operator)
    }

    /// The depositor of `operator`, which is the operator itself unless delegated.
    pub fn depositor_of(&self, operator: &Address) -> Address {
        self.depositors.get(operator).copied().unwrap_or(*operator)
    }

    pub fn claimable_refund(&self, guarantor: &Address) -> Amount {
        self.refunds.get(guarantor).copied().unwrap_or_default()
    }

    /// Iterate over all operators that ever held a bond.
    pub fn bonds(&self) -> impl Iterator<Item = (&Address, &OperatorBond)> {
        self.bonds.iter()
    }

    fn check_guarantor(&self, sender: &Address, operator: &Address) -> Result<(), BondError> {
        if *sender != self.guarantor_of(operator) {
            return Err(BondError::NotGuarantor {
                operator: *operator,
                sender: *sender,
            });
        }

        Ok(())
    }

    fn check_amount(&self, amount: Amount) -> Result<(), BondError> {
        if amount.is_zero() {
            return Err(BondError::ZeroArgument("amount"));
        }

        if !amount.is_multiple_of(self.unit) {
            return Err(BondError::NotMultipleOfPredepositAmount {
                amount,
                unit: self.unit,
            });
        }

        Ok(())
    }

    /// Credit `amount` sent by `sender` to the bond of `operator`.
    pub fn top_up(
        &mut self,
        sender: &Address,
        operator: &Address,
        amount: Amount,
    ) -> Result<OperatorBond, BondError> {
        self.check_guarantor(sender, operator)?;
        self.check_amount(amount)?;

        let bond = self.bonds.entry(*operator).or_default();
        bond.total = bond.total.checked_add(amount).ok_or(BondError::Overflow)?;

        debug!(%operator, %amount, total = %bond.total, "Bond topped up");

        Ok(*bond)
    }

    /// Debit `amount` of unlocked bond of `operator`, on behalf of its guarantor.
    ///
    /// The caller is responsible for delivering the ether.
    pub fn withdraw(
        &mut self,
        sender: &Address,
        operator: &Address,
        amount: Amount,
    ) -> Result<OperatorBond, BondError> {
        self.check_guarantor(sender, operator)?;
        self.check_amount(amount)?;

        let unlocked = self.unlocked(operator);
        if unlocked < amount {
            return Err(BondError::NotEnoughUnlocked {
                unlocked,
                required: amount,
            });
        }

        let bond = self.bonds.entry(*operator).or_default();
        bond.total = bond.total.checked_sub(amount).ok_or(BondError::Overflow)?;

        debug!(%operator, %amount, total = %bond.total, "Bond withdrawn");

        Ok(*bond)
    }

    /// Hand the bond of `operator` over to `new_guarantor`.
    ///
    /// Only possible with no locked bond. Whatever bond remains becomes
    /// claimable by the previous guarantor and the operator's balance is reset.
    pub fn set_guarantor(
        &mut self,
        operator: &Address,
        new_guarantor: &Address,
    ) -> Result<GuarantorChange, BondError> {
        if new_guarantor.is_zero() {
            return Err(BondError::ZeroArgument("guarantor"));
        }

        let previous = self.guarantor_of(operator);
        if *new_guarantor == previous {
            return Err(BondError::SameGuarantor(previous));
        }

        let bond = self.bond(operator);
        if !bond.locked.is_zero() {
            return Err(BondError::LockedIsNotZero(bond.locked));
        }

        let refund = bond.total;
        if !refund.is_zero() {
            let claimable = self.refunds.entry(previous).or_default();
            *claimable = claimable.checked_add(refund).ok_or(BondError::Overflow)?;

            self.bonds.insert(*operator, OperatorBond::default());
        }

        if new_guarantor == operator {
            self.guarantors.remove(operator);
        } else {
            self.guarantors.insert(*operator, *new_guarantor);
        }

        debug!(%operator, %previous, guarantor = %new_guarantor, %refund, "Guarantor changed");

        Ok(GuarantorChange { previous, refund })
    }

    /// Let `depositor` trigger deposits on behalf of `operator`.
    pub fn set_depositor(
        &mut self,
        operator: &Address,
        depositor: &Address,
    ) -> Result<Address, BondError> {
        if depositor.is_zero() {
            return Err(BondError::ZeroArgument("depositor"));
        }

        let previous = self.depositor_of(operator);
        if *depositor == previous {
            return Err(BondError::SameDepositor(previous));
        }

        if depositor == operator {
            self.depositors.remove(operator);
        } else {
            self.depositors.insert(*operator, *depositor);
        }

        Ok(previous)
    }

    /// Remove and return the refund owed to `guarantor`.
    pub fn take_refund(&mut self, guarantor: &Address) -> Result<Amount, BondError> {
        match self.refunds.remove(guarantor) {
            Some(amount) if !amount.is_zero() => Ok(amount),
            _ => Err(BondError::NothingToRefund(*guarantor)),
        }
    }

    /// Lock `amount` of the unlocked bond of `operator`.
    pub fn lock(&mut self, operator: &Address, amount: Amount) -> Result<OperatorBond, BondError> {
        let unlocked = self.unlocked(operator);
        if unlocked < amount {
            return Err(BondError::NotEnoughUnlocked {
                unlocked,
                required: amount,
            });
        }

        let bond = self.bonds.entry(*operator).or_default();
        bond.locked = bond.locked.checked_add(amount).ok_or(BondError::Overflow)?;

        Ok(*bond)
    }

    /// Release `amount` of the locked bond of `operator`.
    pub fn unlock(&mut self, operator: &Address, amount: Amount) -> Result<OperatorBond, BondError> {
        let bond = self.bonds.entry(*operator).or_default();

        bond.locked = bond
            .locked
            .checked_sub(amount)
            .ok_or(BondError::NotEnoughLocked {
                locked: bond.locked,
                required: amount,
            })?;

        Ok(*bond)
    }

    /// Forfeit `amount` of the locked bond of `operator`: it leaves both
    /// `locked` and `total`.
    pub fn slash(&mut self, operator: &Address, amount: Amount) -> Result<OperatorBond, BondError> {
        let bond = self.bonds.entry(*operator).or_default();

        let locked = bond.locked.checked_sub(amount);
        let total = bond.total.checked_sub(amount);

        match (locked, total) {
            (Some(locked), Some(total)) => {
                bond.locked = locked;
                bond.total = total;
                Ok(*bond)
            }
            _ => Err(BondError::NotEnoughLocked {
                locked: bond.locked,
                required: amount,
            }),
        }
    }
}
