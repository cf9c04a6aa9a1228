use core::fmt;

/// A generalized index: the position of a node in a binary Merkle tree,
/// where the root is `1` and the children of `n` are `2n` and `2n + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GIndex(u64);

impl GIndex {
    pub const ROOT: Self = Self(1);

    /// # Panics
    /// If `value` is zero, which is not a node of any tree.
    pub const fn new(value: u64) -> Self {
        assert!(value != 0, "generalized index must be non-zero");
        Self(value)
    }

    pub const fn try_new(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Distance from the root, which is also the length of a proof for this node.
    pub const fn depth(&self) -> u32 {
        self.0.ilog2()
    }

    /// Position of the node among the nodes of the same depth.
    pub const fn index(&self) -> u64 {
        self.0 - (1 << self.depth())
    }

    /// The node `n` positions to the right at the same depth.
    pub fn offset(self, n: u64) -> Option<Self> {
        let value = self.0.checked_add(n)?;

        if value.ilog2() != self.depth() {
            return None;
        }

        Some(Self(value))
    }

    /// The index of node `other`, given relative to the subtree rooted at `self`,
    /// in the tree `self` belongs to.
    pub fn concat(self, other: Self) -> Option<Self> {
        let depth = other.depth();
        let shifted = self.0.checked_mul(1u64.checked_shl(depth)?)?;

        shifted.checked_add(other.index()).map(Self)
    }
}

impl fmt::Display for GIndex {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
