use std::sync::{Arc, PoisonError, RwLock};

use prometheus_client::encoding::text::encode;
pub use prometheus_client::registry::Registry;

/// A registry shared between the guarantee's metrics and whoever scrapes them.
///
/// Each guarantee registers into the registry it is handed; there is no
/// process-wide instance.
#[derive(Clone, Default)]
pub struct SharedRegistry(Arc<RwLock<Registry>>);

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }

    /// Register under `prefix`, e.g. `pdg_` for [`crate::PREFIX`].
    pub fn with_prefix<A>(&self, prefix: impl AsRef<str>, f: impl FnOnce(&mut Registry) -> A) -> A {
        let mut registry = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(registry.sub_registry_with_prefix(prefix))
    }

    /// Encode the registry in the Prometheus text format.
    pub fn export<W: core::fmt::Write>(&self, writer: &mut W) -> core::fmt::Result {
        let registry = self.0.read().unwrap_or_else(PoisonError::into_inner);
        encode(writer, &registry)
    }
}
