/// Outcome of a command, as reported by the remote worker or the runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandStatusCode {
    Success,
    /// No response arrived within the session's command timeout
    Timeout,
    /// Target entity or component was not found
    NotFound,
    /// The worker lost authority over the target component while handling it
    AuthorityLost,
    PermissionDenied,
    /// The receiving worker answered with a failure
    ApplicationError,
    InternalError,
}

impl CommandStatusCode {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandStatusCode::Success)
    }
}
