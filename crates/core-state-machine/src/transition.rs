use crate::{Input, ValidatorStage};

/// Input `{input}` is not accepted in stage {stage}
#[derive(Copy, Clone, Debug, PartialEq, Eq, displaydoc::Display)]
pub struct InvalidTransition {
    pub stage: ValidatorStage,
    pub input: Input,
}

impl core::error::Error for InvalidTransition {}

/// Apply an input to a validator stage, returning the next stage.
///
/// Every accepted pair is listed explicitly; anything else is rejected.
pub fn apply(stage: ValidatorStage, input: Input) -> Result<ValidatorStage, InvalidTransition> {
    use Input::*;
    use ValidatorStage::*;

    match (stage, input) {
        (None, Predeposit) => Ok(Predeposited),
        (None, ProveUnknown) => Ok(Proven),

        (Predeposited, ProveValid) => Ok(Proven),
        (Predeposited, ProveInvalid) => Ok(Disproven),

        (Proven, Activate) => Ok(Activated),

        (Disproven, Compensate) => Ok(Compensated),

        // Top-ups route more ether without moving the record
        (Proven, TopUp) => Ok(Proven),
        (Activated, TopUp) => Ok(Activated),

        (stage, input) => Err(InvalidTransition { stage, input }),
    }
}
