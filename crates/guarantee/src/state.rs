use pdg_bond_ledger::BondLedger;
use pdg_core_types::{Address, Amount};

use crate::pause::PauseController;
use crate::registry::ValidatorRegistry;
use crate::Event;

/// Everything the guarantee persists.
///
/// Operations run against a staged clone which replaces the state only
/// once the whole operation has succeeded.
#[derive(Clone, Debug)]
pub struct State {
    pub ledger: BondLedger,
    pub registry: ValidatorRegistry,
    pub pause: PauseController,

    /// Bond forfeited by disproven predeposits, awaiting compensation.
    pub pending_compensation: Amount,

    /// Events of the operation in progress, moved out on commit.
    pub events: Vec<Event>,
}

impl State {
    pub fn new(predeposit_amount: Amount, admin: Address) -> Self {
        Self {
            ledger: BondLedger::new(predeposit_amount),
            registry: ValidatorRegistry::new(),
            pause: PauseController::new(admin),
            pending_compensation: Amount::ZERO,
            events: Vec::new(),
        }
    }

    /// Total bond locked across all operators.
    pub fn total_locked(&self) -> Amount {
        self.ledger.bonds().map(|(_, bond)| bond.locked).sum()
    }
}
