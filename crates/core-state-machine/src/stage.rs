/// Lifecycle stage of a validator record.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, displaydoc::Display)]
pub enum ValidatorStage {
    /// NONE
    #[default]
    None,
    /// PREDEPOSITED
    Predeposited,
    /// PROVEN
    Proven,
    /// DISPROVEN
    Disproven,
    /// ACTIVATED
    Activated,
    /// COMPENSATED
    Compensated,
}

impl ValidatorStage {
    /// No transition leaves a terminal stage.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Activated | Self::Compensated)
    }

    /// Whether the validator's withdrawal credentials have been proven to
    /// point at its vault.
    pub const fn is_proven(&self) -> bool {
        matches!(self, Self::Proven | Self::Activated)
    }
}
