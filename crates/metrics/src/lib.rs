#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

use prometheus_client::encoding::EncodeLabelSet;

pub use prometheus_client::metrics::counter::Counter;
pub use prometheus_client::metrics::family::Family;
pub use prometheus_client::metrics::gauge::Gauge;

mod registry;
pub use registry::{Registry, SharedRegistry};

/// Prefix of every metric registered by [`Metrics::register`].
pub const PREFIX: &str = "pdg";

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RejectionLabels {
    pub kind: String,
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    /// Number of validators predeposited
    pub predeposits: Counter,

    /// Number of predeposited validators proven to have the vault's withdrawal credentials
    pub proven: Counter,

    /// Number of validators deposited outside of the guarantee and proven afterwards
    pub proven_unknown: Counter,

    /// Number of predeposited validators proven to have foreign withdrawal credentials
    pub disproven: Counter,

    /// Number of disproven predeposits paid out to vault owners
    pub compensated: Counter,

    /// Number of proven validators activated
    pub activated: Counter,

    /// Number of rejected operations, by error kind
    pub rejected_operations: Family<RejectionLabels, Counter>,

    /// Total bond locked behind in-flight predeposits, in gwei
    pub locked_bond_gwei: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(registry: &SharedRegistry) -> Self {
        let metrics = Self::new();

        registry.with_prefix(PREFIX, |registry| {
            registry.register(
                "predeposits",
                "Number of validators predeposited",
                metrics.predeposits.clone(),
            );

            registry.register(
                "proven",
                "Number of predeposited validators proven to have the vault's withdrawal credentials",
                metrics.proven.clone(),
            );

            registry.register(
                "proven_unknown",
                "Number of validators deposited outside of the guarantee and proven afterwards",
                metrics.proven_unknown.clone(),
            );

            registry.register(
                "disproven",
                "Number of predeposited validators proven to have foreign withdrawal credentials",
                metrics.disproven.clone(),
            );

            registry.register(
                "compensated",
                "Number of disproven predeposits paid out to vault owners",
                metrics.compensated.clone(),
            );

            registry.register(
                "activated",
                "Number of proven validators activated",
                metrics.activated.clone(),
            );

            registry.register(
                "rejected_operations",
                "Number of rejected operations, by error kind",
                metrics.rejected_operations.clone(),
            );

            registry.register(
                "locked_bond_gwei",
                "Total bond locked behind in-flight predeposits, in gwei",
                metrics.locked_bond_gwei.clone(),
            );
        });

        metrics
    }

    pub fn record_rejection(&self, kind: impl Into<String>) {
        self.rejected_operations
            .get_or_create(&RejectionLabels { kind: kind.into() })
            .inc();
    }

    pub fn set_locked_bond_gwei(&self, gwei: u64) {
        self.locked_bond_gwei.set(i64::try_from(gwei).unwrap_or(i64::MAX));
    }
}
