//! Fixtures for testing the predeposit guarantee: mock vaults and host,
//! deposits, and a beacon chain model producing verifiable witnesses.

mod beacon;
mod host;

pub use beacon::{BeaconBlock, BeaconState};
pub use host::{MockHost, MockVault};

use pdg_config::{LogFormat, LoggingConfig};
use pdg_core_types::{
    Address, Amount, BlsPublicKey, Deposit, DepositAuth, WithdrawalCredentials, SIGNATURE_LENGTH,
};
use pdg_proof::ssz::deposit_data_root;
use tracing::Subscriber;

/// Placeholder signature carried by test deposits.
pub const SIGNATURE: [u8; SIGNATURE_LENGTH] = [0x5a; SIGNATURE_LENGTH];

pub fn address(n: u8) -> Address {
    let mut bytes = [0; Address::LENGTH];
    bytes[0] = 0xad;
    bytes[Address::LENGTH - 1] = n;
    Address::new(bytes)
}

pub fn pubkey(n: u8) -> BlsPublicKey {
    let mut bytes = [0x80; BlsPublicKey::LENGTH];
    bytes[BlsPublicKey::LENGTH - 1] = n;
    BlsPublicKey::new(bytes)
}

/// A deposit with a valid data root for `wc`.
pub fn deposit(pubkey: &BlsPublicKey, wc: &WithdrawalCredentials, amount: Amount) -> Deposit {
    let gwei = amount.to_gwei().expect("deposit amount must be whole gwei");
    let root = deposit_data_root(pubkey, wc, gwei, &SIGNATURE);

    Deposit::new(pubkey.as_bytes().to_vec(), SIGNATURE, amount, root)
}

pub fn auth() -> DepositAuth {
    DepositAuth {
        pubkey_y: [0x11; 48],
        signature_y: [0x22; 96],
    }
}

pub fn init_logging() {
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pdg=debug"));

    let builder = FmtSubscriber::builder()
        .with_target(false)
        .with_env_filter(filter)
        .with_test_writer()
        .with_thread_ids(false);

    let _ = builder.finish().try_init();
}

/// Install the subscriber described by the `[logging]` section.
pub fn init_logging_with(config: &LoggingConfig) {
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = logging_subscriber(config).try_init();
}

/// A fmt subscriber logging the `pdg` crates at `log_level`, in `log_format`.
pub fn logging_subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let filter = EnvFilter::new(format!("pdg={}", config.log_level));

    let builder = FmtSubscriber::builder()
        .with_target(false)
        .with_env_filter(filter)
        .with_test_writer();

    match config.log_format {
        LogFormat::Plaintext => Box::new(builder.finish()),
        LogFormat::Json => Box::new(builder.json().finish()),
    }
}

#[cfg(test)]
mod tests {
    use pdg_config::LogLevel;
    use tracing::Level;

    use super::*;

    #[test]
    fn logging_follows_the_configured_level() {
        for log_format in [LogFormat::Plaintext, LogFormat::Json] {
            let config = LoggingConfig {
                log_level: LogLevel::Warn,
                log_format,
            };

            tracing::subscriber::with_default(logging_subscriber(&config), || {
                assert!(tracing::enabled!(target: "pdg_guarantee", Level::WARN));
                assert!(!tracing::enabled!(target: "pdg_guarantee", Level::INFO));
                assert!(!tracing::enabled!(target: "hyper", Level::ERROR));
            });
        }
    }

    #[test]
    fn default_logging_is_info() {
        let config = LoggingConfig::default();

        tracing::subscriber::with_default(logging_subscriber(&config), || {
            assert!(tracing::enabled!(target: "pdg_proof", Level::INFO));
            assert!(!tracing::enabled!(target: "pdg_proof", Level::DEBUG));
        });
    }
}
