use tracing::debug;

use pdg_bond_ledger::OperatorBond;
use pdg_core_types::{
    Address, Amount, BlsPublicKey, Deposit, DepositAuth, Host, ValidatorTopUp, ValidatorWitness,
    WithdrawalCredentials,
};
use pdg_metrics::Metrics;
use pdg_proof::{BeaconRoots, ProofVerifier};

use crate::handle::{self, Context};
use crate::pause::Role;
use crate::{Call, Error, Event, Params, State, ValidatorStatus};

/// The predeposit guarantee.
///
/// Owns the bond ledger, the validator registry and the pause switch, and
/// verifies witnesses against the beacon block roots exposed by `R`.
/// Vaults and ether transfers are reached through the [`Host`] passed to
/// each operation.
///
/// Every operation is atomic: it either commits all of its state changes
/// and events, or fails without any.
pub struct PredepositGuarantee<R> {
    address: Address,
    params: Params,
    verifier: ProofVerifier<R>,
    state: State,
    events: Vec<Event>,
    metrics: Metrics,
}

impl<R> PredepositGuarantee<R>
where
    R: BeaconRoots,
{
    /// Create a guarantee living at `address`, whose pause roles are
    /// managed by `admin`.
    pub fn new(address: Address, params: Params, roots: R, admin: Address) -> Self {
        Self {
            address,
            verifier: ProofVerifier::new(roots, params.proof),
            state: State::new(params.predeposit_amount, admin),
            events: Vec::new(),
            params,
            metrics: Metrics::new(),
        }
    }

    /// Report to `metrics`, typically obtained from [`Metrics::register`].
    pub fn with_metrics(self, metrics: Metrics) -> Self {
        Self { metrics, ..self }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn roots(&self) -> &R {
        self.verifier.roots()
    }

    pub fn roots_mut(&mut self) -> &mut R {
        self.verifier.roots_mut()
    }

    /// Drain the events of the operations committed so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Run `f` against a staged copy of the state, committing it on success.
    fn transact<T>(
        &mut self,
        call: &Call,
        operation: &'static str,
        f: impl FnOnce(Context<'_, R>, &mut State) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut staged = self.state.clone();

        let ctx = Context {
            address: self.address,
            params: &self.params,
            verifier: &self.verifier,
            call,
        };

        match f(ctx, &mut staged) {
            Ok(value) => {
                self.record(&staged.events);
                self.events.append(&mut staged.events);
                self.state = staged;
                self.record_locked();

                Ok(value)
            }
            Err(e) => {
                debug!(
                    %operation, sender = %call.sender, kind = %e.kind(), error = %e,
                    "Rejected operation"
                );

                self.metrics.record_rejection(e.kind().as_str());

                Err(e)
            }
        }
    }

    fn record(&self, events: &[Event]) {
        for event in events {
            let counter = match event {
                Event::ValidatorPredeposited { .. } => &self.metrics.predeposits,
                Event::ValidatorProven { .. } => &self.metrics.proven,
                Event::UnknownValidatorProven { .. } => &self.metrics.proven_unknown,
                Event::ValidatorDisproven { .. } => &self.metrics.disproven,
                Event::ValidatorCompensated { .. } => &self.metrics.compensated,
                Event::ValidatorActivated { .. } => &self.metrics.activated,
                _ => continue,
            };

            counter.inc();
        }
    }

    fn record_locked(&self) {
        let gwei = self.state.total_locked().as_wei() / Amount::WEI_PER_GWEI;
        self.metrics
            .set_locked_bond_gwei(u64::try_from(gwei).unwrap_or(u64::MAX));
    }
}

/// Bond ledger
impl<R> PredepositGuarantee<R>
where
    R: BeaconRoots,
{
    /// Top up the bond of `operator` with the ether sent along the call.
    pub fn top_up(&mut self, call: &Call, operator: &Address) -> Result<(), Error> {
        self.transact(call, "top_up", |ctx, state| {
            handle::bond::top_up(ctx, state, operator)
        })
    }

    pub fn withdraw<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        operator: &Address,
        amount: Amount,
        recipient: &Address,
    ) -> Result<(), Error> {
        self.transact(call, "withdraw", |ctx, state| {
            handle::bond::withdraw(ctx, state, host, operator, amount, recipient)
        })
    }

    /// Set the guarantor of the calling node operator.
    pub fn set_guarantor(&mut self, call: &Call, guarantor: &Address) -> Result<(), Error> {
        self.transact(call, "set_guarantor", |ctx, state| {
            handle::bond::set_guarantor(ctx, state, guarantor)
        })
    }

    /// Set the depositor of the calling node operator.
    pub fn set_depositor(&mut self, call: &Call, depositor: &Address) -> Result<(), Error> {
        self.transact(call, "set_depositor", |ctx, state| {
            handle::bond::set_depositor(ctx, state, depositor)
        })
    }

    pub fn claim_refund<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        recipient: &Address,
    ) -> Result<Amount, Error> {
        self.transact(call, "claim_refund", |ctx, state| {
            handle::bond::claim_refund(ctx, state, host, recipient)
        })
    }
}

/// Validators
impl<R> PredepositGuarantee<R>
where
    R: BeaconRoots,
{
    pub fn predeposit<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        vault: &Address,
        deposits: &[Deposit],
        auth: &[DepositAuth],
    ) -> Result<(), Error> {
        self.transact(call, "predeposit", |ctx, state| {
            handle::predeposit::predeposit(ctx, state, host, vault, deposits, auth)
        })
    }

    pub fn prove_validator_wc<H: Host>(
        &mut self,
        host: &H,
        call: &Call,
        witness: &ValidatorWitness,
    ) -> Result<ValidatorStatus, Error> {
        self.transact(call, "prove_validator_wc", |ctx, state| {
            handle::prove::prove_validator_wc(ctx, state, host, witness)
        })
    }

    pub fn prove_and_deposit<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        witnesses: &[ValidatorWitness],
        deposits: &[Deposit],
        vault: &Address,
    ) -> Result<(), Error> {
        self.transact(call, "prove_and_deposit", |ctx, state| {
            handle::deposit::prove_and_deposit(ctx, state, host, witnesses, deposits, vault)
        })
    }

    pub fn deposit_to_beacon_chain<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        vault: &Address,
        deposits: &[Deposit],
    ) -> Result<(), Error> {
        self.transact(call, "deposit_to_beacon_chain", |ctx, state| {
            handle::deposit::deposit_to_beacon_chain(ctx, state, host, vault, deposits)
        })
    }

    pub fn top_up_existing_validators<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        top_ups: &[ValidatorTopUp],
    ) -> Result<(), Error> {
        self.transact(call, "top_up_existing_validators", |ctx, state| {
            handle::deposit::top_up_existing_validators(ctx, state, host, top_ups)
        })
    }

    pub fn activate_validator<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        pubkey: &BlsPublicKey,
    ) -> Result<(), Error> {
        self.transact(call, "activate_validator", |ctx, state| {
            handle::deposit::activate_validator(ctx, state, host, pubkey)
        })
    }

    pub fn prove_unknown_validator<H: Host>(
        &mut self,
        host: &H,
        call: &Call,
        witness: &ValidatorWitness,
        vault: &Address,
    ) -> Result<ValidatorStatus, Error> {
        self.transact(call, "prove_unknown_validator", |ctx, state| {
            handle::prove::prove_unknown_validator(ctx, state, host, witness, vault)
        })
    }

    pub fn prove_invalid_validator_wc<H: Host>(
        &mut self,
        host: &H,
        call: &Call,
        witness: &ValidatorWitness,
        invalid_wc: &WithdrawalCredentials,
    ) -> Result<ValidatorStatus, Error> {
        self.transact(call, "prove_invalid_validator_wc", |ctx, state| {
            handle::disprove::prove_invalid_validator_wc(ctx, state, host, witness, invalid_wc)
        })
    }

    pub fn compensate_disproven_predeposit<H: Host>(
        &mut self,
        host: &mut H,
        call: &Call,
        pubkey: &BlsPublicKey,
        recipient: &Address,
    ) -> Result<Amount, Error> {
        self.transact(call, "compensate_disproven_predeposit", |ctx, state| {
            handle::disprove::compensate_disproven_predeposit(ctx, state, host, pubkey, recipient)
        })
    }
}

/// Pause
impl<R> PredepositGuarantee<R>
where
    R: BeaconRoots,
{
    pub fn pause_for(&mut self, call: &Call, duration: u64) -> Result<u64, Error> {
        self.transact(call, "pause_for", |ctx, state| {
            handle::pause::pause_for(ctx, state, duration)
        })
    }

    pub fn pause_until(&mut self, call: &Call, until: u64) -> Result<u64, Error> {
        self.transact(call, "pause_until", |ctx, state| {
            handle::pause::pause_until(ctx, state, until)
        })
    }

    pub fn resume(&mut self, call: &Call) -> Result<(), Error> {
        self.transact(call, "resume", |ctx, state| handle::pause::resume(ctx, state))
    }

    pub fn grant_role(&mut self, call: &Call, role: Role, account: &Address) -> Result<(), Error> {
        self.transact(call, "grant_role", |ctx, state| {
            handle::pause::grant_role(ctx, state, role, account)
        })
    }

    pub fn revoke_role(&mut self, call: &Call, role: Role, account: &Address) -> Result<(), Error> {
        self.transact(call, "revoke_role", |ctx, state| {
            handle::pause::revoke_role(ctx, state, role, account)
        })
    }
}

/// Queries, available while paused
impl<R> PredepositGuarantee<R> {
    pub fn bond(&self, operator: &Address) -> OperatorBond {
        self.state.ledger.bond(operator)
    }

    pub fn unlocked_balance(&self, operator: &Address) -> Amount {
        self.state.ledger.unlocked(operator)
    }

    pub fn guarantor_of(&self, operator: &Address) -> Address {
        self.state.ledger.guarantor_of(operator)
    }

    pub fn depositor_of(&self, operator: &Address) -> Address {
        self.state.ledger.depositor_of(operator)
    }

    pub fn claimable_refund(&self, guarantor: &Address) -> Amount {
        self.state.ledger.claimable_refund(guarantor)
    }

    pub fn validator_status(&self, pubkey: &BlsPublicKey) -> ValidatorStatus {
        self.state.registry.status(pubkey)
    }

    pub fn predeposit_amount(&self) -> Amount {
        self.params.predeposit_amount
    }

    pub fn min_supported_wc_version(&self) -> u8 {
        self.params.wc_versions.min
    }

    pub fn max_supported_wc_version(&self) -> u8 {
        self.params.wc_versions.max
    }

    pub fn is_paused(&self, now: u64) -> bool {
        self.state.pause.is_paused(now)
    }

    pub fn resume_since(&self) -> u64 {
        self.state.pause.resume_since()
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.pause.has_role(role, account)
    }

    pub fn pending_compensation(&self) -> Amount {
        self.state.pending_compensation
    }
}
