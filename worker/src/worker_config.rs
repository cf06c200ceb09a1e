use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by a WorkerSession
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// How long a sent command may wait for its response before it completes
    /// with a `Timeout` status. `None` disables timeouts.
    pub command_timeout: Option<Duration>,
    /// Whether a response carrying an unknown wire request id is reported as
    /// an error. When false, such responses are logged and dropped.
    pub strict_response_matching: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command_timeout: Some(Duration::from_secs(5)),
            strict_response_matching: false,
        }
    }
}
