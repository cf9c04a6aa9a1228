use pdg_config::Config;
use pdg_core_types::Amount;
use pdg_proof::{GIndex, ProofParams, WcVersions};

/// Guarantee parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Amount of every predeposit, and the unit in which bond is moved
    pub predeposit_amount: Amount,

    /// Amount deposited when activating a proven validator
    pub activation_deposit_amount: Amount,

    /// Accepted withdrawal credentials versions
    pub wc_versions: WcVersions,

    /// Location of the validator list in beacon block headers
    pub proof: ProofParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            predeposit_amount: Amount::ether(1),
            activation_deposit_amount: Amount::ether(31),
            wc_versions: WcVersions::default(),
            proof: ProofParams::MAINNET,
        }
    }
}

impl From<&Config> for Params {
    /// The configuration is expected to have passed [`Config::validate`];
    /// zero generalized indices fall back to mainnet values.
    fn from(config: &Config) -> Self {
        let guarantee = &config.guarantee;
        let proof = &config.proof;

        Self {
            predeposit_amount: Amount::from_wei(guarantee.predeposit_amount),
            activation_deposit_amount: Amount::from_wei(guarantee.activation_deposit_amount),
            wc_versions: WcVersions::new(
                guarantee.min_supported_wc_version,
                guarantee.max_supported_wc_version,
            ),
            proof: ProofParams {
                gi_first_validator_prev: GIndex::try_new(proof.gi_first_validator_prev)
                    .unwrap_or(ProofParams::MAINNET.gi_first_validator_prev),
                gi_first_validator_curr: GIndex::try_new(proof.gi_first_validator_curr)
                    .unwrap_or(ProofParams::MAINNET.gi_first_validator_curr),
                pivot_slot: proof.pivot_slot,
            },
        }
    }
}
