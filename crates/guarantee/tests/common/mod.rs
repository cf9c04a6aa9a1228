#![allow(dead_code)]

use std::collections::BTreeMap;

use pdg_core_types::{
    Address, Amount, BlsPublicKey, Deposit, Host, ValidatorWitness, WithdrawalCredentials,
};
use pdg_guarantee::{Call, Error, Event, Params, PredepositGuarantee, Role, ValidatorStage};
use pdg_proof::{BeaconRootsHistory, ELECTRA_FORK_SLOT};
use pdg_test::{address, auth, deposit, BeaconState, MockHost, MockVault};

pub const START: u64 = 1_750_000_000;

pub fn guarantee_address() -> Address {
    address(0xee)
}

pub fn admin() -> Address {
    address(0xa0)
}

pub fn owner() -> Address {
    address(1)
}

pub fn operator() -> Address {
    address(2)
}

pub fn vault() -> Address {
    address(10)
}

pub fn stranger() -> Address {
    address(0x55)
}

pub fn unit() -> Amount {
    Params::default().predeposit_amount
}

/// A guarantee with one vault, and the beacon chain it observes.
pub struct Env {
    pub guarantee: PredepositGuarantee<BeaconRootsHistory>,
    pub host: MockHost,
    pub beacon: BeaconState,
    pub indices: BTreeMap<BlsPublicKey, u64>,
    pub now: u64,
    pub slot: u64,
}

impl Env {
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    pub fn with_params(params: Params) -> Self {
        pdg_test::init_logging();

        let mut host = MockHost::new();
        host.add_vault(MockVault::new(
            vault(),
            owner(),
            operator(),
            guarantee_address(),
        ));

        let guarantee = PredepositGuarantee::new(
            guarantee_address(),
            params,
            BeaconRootsHistory::new(),
            admin(),
        );

        Self {
            guarantee,
            host,
            beacon: BeaconState::new(),
            indices: BTreeMap::new(),
            now: START,
            slot: ELECTRA_FORK_SLOT + 1_000,
        }
    }

    pub fn call(&self, sender: Address) -> Call {
        Call::new(sender, self.now)
    }

    pub fn vault(&self, address: &Address) -> &MockVault {
        self.host.vault(address).expect("unknown vault")
    }

    pub fn vault_mut(&mut self, address: &Address) -> &mut MockVault {
        self.host.vault_mut(address).expect("unknown vault")
    }

    pub fn vault_wc(&self) -> WithdrawalCredentials {
        self.vault(&vault()).withdrawal_credentials
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.guarantee.take_events()
    }

    pub fn stage(&self, pubkey: &BlsPublicKey) -> ValidatorStage {
        self.guarantee.validator_status(pubkey).stage
    }

    pub fn top_up(&mut self, units: u64) -> Result<(), Error> {
        let call = self
            .call(operator())
            .with_value(unit().checked_mul(units).unwrap());

        self.guarantee.top_up(&call, &operator())
    }

    pub fn predeposit_deposits(&self, pubkeys: &[BlsPublicKey]) -> Vec<Deposit> {
        let wc = self.vault_wc();
        pubkeys.iter().map(|pk| deposit(pk, &wc, unit())).collect()
    }

    pub fn predeposit(&mut self, pubkeys: &[BlsPublicKey]) -> Result<(), Error> {
        let deposits = self.predeposit_deposits(pubkeys);
        self.predeposit_with(operator(), &deposits)
    }

    pub fn predeposit_with(&mut self, sender: Address, deposits: &[Deposit]) -> Result<(), Error> {
        let call = self.call(sender);
        let auth = vec![auth(); deposits.len()];

        self.guarantee
            .predeposit(&mut self.host, &call, &vault(), deposits, &auth)
    }

    /// The validator shows up in the beacon state with credentials `wc`.
    pub fn appear(&mut self, pubkey: BlsPublicKey, wc: WithdrawalCredentials) -> u64 {
        let index = self.beacon.add_validator(pubkey, wc);
        self.indices.insert(pubkey, index);
        index
    }

    /// Seal the beacon state in a new block, make its root available to the
    /// guarantee, and return a witness for `pubkey` against it.
    pub fn witness(&mut self, pubkey: &BlsPublicKey) -> ValidatorWitness {
        let index = self.indices[pubkey];
        let block = self.beacon.block(self.slot, 7, &self.guarantee.params().proof);

        self.now += 12;
        self.slot += 1;
        self.guarantee.roots_mut().record(self.now, block.root());

        block.witness(index, self.now)
    }

    pub fn prove(&mut self, pubkey: &BlsPublicKey) -> Result<(), Error> {
        let witness = self.witness(pubkey);
        let call = self.call(stranger());

        self.guarantee
            .prove_validator_wc(&self.host, &call, &witness)
            .map(|_| ())
    }

    pub fn pause(&mut self) {
        let call = self.call(admin());
        self.guarantee
            .grant_role(&call, Role::Pause, &admin())
            .unwrap();
        self.guarantee
            .grant_role(&call, Role::Resume, &admin())
            .unwrap();
        self.guarantee
            .pause_for(&call, pdg_guarantee::PAUSE_INFINITELY)
            .unwrap();
    }

    pub fn resume(&mut self) {
        let call = self.call(admin());
        self.guarantee.resume(&call).unwrap();
    }

    /// `locked == P × #PREDEPOSITED` and `locked <= total`, for `operator`.
    pub fn assert_bond_invariant(&self, operator: &Address) {
        let bond = self.guarantee.bond(operator);
        let predeposited = self
            .guarantee
            .state()
            .registry
            .count(operator, ValidatorStage::Predeposited);

        assert!(bond.locked <= bond.total, "{bond:?}");
        assert_eq!(
            bond.locked,
            unit().checked_mul(predeposited as u64).unwrap(),
            "locked bond does not match {predeposited} predeposited validators"
        );
    }
}
