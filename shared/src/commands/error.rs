use thiserror::Error;

use crate::{
    commands::request_id::{InternalRequestId, WireRequestId},
    types::{CommandId, ComponentId},
};

/// Errors that can occur while tracking in-flight command requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandMetaDataError {
    /// (component, command) pair is not in the catalog
    #[error("Can not find command metadata. Unknown command ID {command_id} on component {component_id}. The running schema does not match the data being processed")]
    UnknownCommand {
        component_id: ComponentId,
        command_id: CommandId,
    },

    /// Request id is not registered, or was already removed
    #[error("Request {request_id} is not in flight. It was never registered or has already been completed or cancelled")]
    NotFound {
        request_id: InternalRequestId,
    },

    /// The same internal request id was registered twice
    #[error("Request {request_id} is already registered. Internal request ids must never be reused while live")]
    DuplicateRegistration {
        request_id: InternalRequestId,
    },

    /// A wire request id was already linked to this request
    #[error("Request {request_id} is already linked to {wire_request_id}. A request can only be sent once")]
    WireRequestIdAlreadySet {
        request_id: InternalRequestId,
        wire_request_id: WireRequestId,
    },

    /// The payload type used at the call site differs from the catalog's
    #[error("Command {command_id} on component {component_id} stores payloads of type '{expected}', but was accessed as '{actual}'")]
    PayloadTypeMismatch {
        component_id: ComponentId,
        command_id: CommandId,
        expected: &'static str,
        actual: &'static str,
    },
}
