use pdg_core_types::{Address, Amount};

/// Context of a call into the guarantee: who sends it, how much ether
/// comes with it, and the timestamp of the block executing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub sender: Address,
    pub value: Amount,
    pub timestamp: u64,
}

impl Call {
    pub fn new(sender: Address, timestamp: u64) -> Self {
        Self {
            sender,
            value: Amount::ZERO,
            timestamp,
        }
    }

    pub fn with_value(self, value: Amount) -> Self {
        Self { value, ..self }
    }
}
