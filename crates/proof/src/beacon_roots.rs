//! Historical beacon block roots, looked up by execution block timestamp.

use pdg_core_types::Hash;

/// Length of the EIP-4788 ring buffer.
pub const HISTORY_BUFFER_LENGTH: u64 = 8191;

/// Source of consensus-layer block roots.
///
/// For the execution block with timestamp `child_block_timestamp`, returns
/// the root of its parent beacon block, or `None` if it is unknown or has
/// rotated out of the history.
pub trait BeaconRoots {
    fn parent_block_root(&self, child_block_timestamp: u64) -> Option<Hash>;
}

impl<T: BeaconRoots + ?Sized> BeaconRoots for &T {
    fn parent_block_root(&self, child_block_timestamp: u64) -> Option<Hash> {
        (**self).parent_block_root(child_block_timestamp)
    }
}

/// In-memory beacon roots history with EIP-4788 ring buffer semantics.
///
/// Slot `timestamp % HISTORY_BUFFER_LENGTH` stores both the timestamp and the
/// root; a lookup only succeeds if the stored timestamp matches exactly.
#[derive(Clone, Debug)]
pub struct BeaconRootsHistory {
    buffer: Vec<Option<(u64, Hash)>>,
}

impl BeaconRootsHistory {
    pub fn new() -> Self {
        Self {
            buffer: vec![None; HISTORY_BUFFER_LENGTH as usize],
        }
    }

    fn slot(timestamp: u64) -> usize {
        (timestamp % HISTORY_BUFFER_LENGTH) as usize
    }

    /// Record the parent beacon block root of the block at `timestamp`,
    /// evicting whatever shared its ring buffer slot.
    pub fn record(&mut self, timestamp: u64, root: Hash) {
        let slot = Self::slot(timestamp);

        if let Some((evicted, _)) = self.buffer[slot] {
            tracing::trace!(%evicted, %timestamp, "Evicting beacon root");
        }

        self.buffer[slot] = Some((timestamp, root));
    }
}

impl Default for BeaconRootsHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl BeaconRoots for BeaconRootsHistory {
    fn parent_block_root(&self, child_block_timestamp: u64) -> Option<Hash> {
        if child_block_timestamp == 0 {
            return None;
        }

        match self.buffer[Self::slot(child_block_timestamp)] {
            Some((timestamp, root)) if timestamp == child_block_timestamp => Some(root),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_requires_exact_timestamp() {
        let mut history = BeaconRootsHistory::new();
        let root = Hash::new([7; 32]);

        history.record(1_700_000_000, root);

        assert_eq!(history.parent_block_root(1_700_000_000), Some(root));
        assert_eq!(history.parent_block_root(1_700_000_012), None);
        assert_eq!(
            history.parent_block_root(1_700_000_000 + HISTORY_BUFFER_LENGTH),
            None
        );
    }

    #[test]
    fn rotated_roots_are_gone() {
        let mut history = BeaconRootsHistory::new();

        history.record(100, Hash::new([1; 32]));
        history.record(100 + HISTORY_BUFFER_LENGTH, Hash::new([2; 32]));

        assert_eq!(history.parent_block_root(100), None);
        assert_eq!(
            history.parent_block_root(100 + HISTORY_BUFFER_LENGTH),
            Some(Hash::new([2; 32]))
        );
    }

    #[test]
    fn zero_timestamp_is_never_found() {
        let mut history = BeaconRootsHistory::new();
        history.record(0, Hash::new([1; 32]));
        assert_eq!(history.parent_block_root(0), None);
    }
}
