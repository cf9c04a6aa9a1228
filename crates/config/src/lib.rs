//! Configuration of the predeposit guarantee, read from a TOML file with
//! `PDG__SECTION__KEY` environment overrides.

#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

use core::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

mod utils;

/// Prefix of the environment variables overriding the configuration file.
pub const ENV_PREFIX: &str = "PDG";

const WEI_PER_GWEI: u128 = 1_000_000_000;
const WEI_PER_ETHER: u128 = 1_000_000_000 * WEI_PER_GWEI;

/// Predeposit guarantee configuration options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Guarantee configuration options
    #[serde(default)]
    pub guarantee: GuaranteeConfig,

    /// Proof verifier configuration options
    #[serde(default)]
    pub proof: ProofConfig,

    /// Log configuration options
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Check the configuration for values the guarantee cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let guarantee = &self.guarantee;

        if guarantee.predeposit_amount == 0 {
            return Err(ConfigError::ZeroPredepositAmount);
        }

        if guarantee.predeposit_amount % WEI_PER_GWEI != 0 {
            return Err(ConfigError::NotWholeGwei {
                field: "predeposit_amount",
                amount: guarantee.predeposit_amount,
            });
        }

        if guarantee.activation_deposit_amount == 0
            || guarantee.activation_deposit_amount % WEI_PER_GWEI != 0
        {
            return Err(ConfigError::NotWholeGwei {
                field: "activation_deposit_amount",
                amount: guarantee.activation_deposit_amount,
            });
        }

        if guarantee.min_supported_wc_version > guarantee.max_supported_wc_version {
            return Err(ConfigError::WcVersionRange {
                min: guarantee.min_supported_wc_version,
                max: guarantee.max_supported_wc_version,
            });
        }

        for (field, gindex) in [
            ("gi_first_validator_prev", self.proof.gi_first_validator_prev),
            ("gi_first_validator_curr", self.proof.gi_first_validator_curr),
        ] {
            if gindex == 0 {
                return Err(ConfigError::ZeroGIndex(field));
            }
        }

        Ok(())
    }
}

/// Guarantee configuration options
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuaranteeConfig {
    /// Predeposit amount in wei, also the unit of node operator bond
    #[serde(with = "utils::wei")]
    pub predeposit_amount: u128,

    /// Amount in wei deposited when activating a proven validator
    #[serde(with = "utils::wei")]
    pub activation_deposit_amount: u128,

    /// Lowest accepted withdrawal credentials version
    #[serde(deserialize_with = "utils::u8_from_anything")]
    pub min_supported_wc_version: u8,

    /// Highest accepted withdrawal credentials version
    #[serde(deserialize_with = "utils::u8_from_anything")]
    pub max_supported_wc_version: u8,
}

impl Default for GuaranteeConfig {
    fn default() -> Self {
        Self {
            predeposit_amount: WEI_PER_ETHER,
            activation_deposit_amount: 31 * WEI_PER_ETHER,
            min_supported_wc_version: 1,
            max_supported_wc_version: 2,
        }
    }
}

/// Proof verifier configuration options
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofConfig {
    /// Generalized index of `validators[0]` before `pivot_slot`
    #[serde(with = "utils::gindex")]
    pub gi_first_validator_prev: u64,

    /// Generalized index of `validators[0]` at or after `pivot_slot`
    #[serde(with = "utils::gindex")]
    pub gi_first_validator_curr: u64,

    /// Slot at which the beacon state layout changes
    #[serde(deserialize_with = "utils::u64_from_anything")]
    pub pivot_slot: u64,
}

impl Default for ProofConfig {
    fn default() -> Self {
        // Mainnet: Deneb before the Electra fork, Electra after
        Self {
            gi_first_validator_prev: 726 << 40,
            gi_first_validator_curr: 1430 << 40,
            pivot_slot: 364_032 * 32,
        }
    }
}

/// Logging configuration options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plaintext,
    Json,
}

/// Reasons a configuration is rejected by [`Config::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Predeposit amount must not be zero")]
    ZeroPredepositAmount,

    #[error("`{field}` must be a positive whole number of gwei, got {amount} wei")]
    NotWholeGwei { field: &'static str, amount: u128 },

    #[error("Invalid withdrawal credentials version range: {min} > {max}")]
    WcVersionRange { min: u8, max: u8 },

    #[error("`{0}` must not be zero")]
    ZeroGIndex(&'static str),
}

/// load_config parses the environment variables and loads the provided config file path
/// to create a Config struct.
pub fn load_config(path: impl AsRef<Path>, prefix: Option<&str>) -> eyre::Result<Config> {
    let config: Config = ::config::Config::builder()
        .add_source(::config::File::from(path.as_ref()))
        .add_source(::config::Environment::with_prefix(prefix.unwrap_or(ENV_PREFIX)).separator("__"))
        .build()?
        .try_deserialize()?;

    config.validate()?;

    Ok(config)
}
