use thiserror::Error;

use skein_shared::{CommandMetaDataError, WireRequestId};

/// Errors reported by a CommandTransport implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport refused to send
    #[error("Transport rejected the command: {reason}")]
    Rejected {
        reason: String,
    },

    /// The connection to the runtime is gone
    #[error("Transport is disconnected")]
    Disconnected,
}

/// Errors that can occur during WorkerSession operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    /// Command metadata error
    #[error("Command metadata error: {0}")]
    CommandMetaData(#[from] CommandMetaDataError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived for a wire request id with no request in flight
    #[error("Received a response for {wire_request_id}, which does not match any command in flight. It may have been cancelled or timed out")]
    UnknownWireRequestId {
        wire_request_id: WireRequestId,
    },

    /// The transport handed out a wire request id that is still in use
    #[error("Transport assigned {wire_request_id}, which is already in use by another command in flight")]
    DuplicateWireRequestId {
        wire_request_id: WireRequestId,
    },
}
