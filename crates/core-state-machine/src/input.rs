/// Inputs that drive a validator record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, displaydoc::Display)]
pub enum Input {
    /// predeposit
    Predeposit,
    /// prove valid withdrawal credentials
    ProveValid,
    /// prove unknown validator
    ProveUnknown,
    /// prove invalid withdrawal credentials
    ProveInvalid,
    /// compensate disproven predeposit
    Compensate,
    /// activate
    Activate,
    /// top up
    TopUp,
}

impl Input {
    pub const ALL: [Input; 7] = [
        Input::Predeposit,
        Input::ProveValid,
        Input::ProveUnknown,
        Input::ProveInvalid,
        Input::Compensate,
        Input::Activate,
        Input::TopUp,
    ];
}
