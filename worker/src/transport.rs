use std::any::Any;

use skein_shared::{CommandId, ComponentId, EntityId, WireRequestId};

use crate::error::TransportError;

/// The connection layer that actually puts commands on the wire.
///
/// Payloads are passed type-erased; the transport knows how to serialize each
/// (component, command) pair.
pub trait CommandTransport {
    /// Sends a request and returns the wire request id the runtime assigned
    fn send_command_request(
        &mut self,
        target_entity: EntityId,
        component_id: ComponentId,
        command_id: CommandId,
        request: &dyn Any,
    ) -> Result<WireRequestId, TransportError>;

    fn send_command_response(
        &mut self,
        request_id: WireRequestId,
        component_id: ComponentId,
        command_id: CommandId,
        response: &dyn Any,
    ) -> Result<(), TransportError>;

    fn send_command_failure(
        &mut self,
        request_id: WireRequestId,
        component_id: ComponentId,
        command_id: CommandId,
        message: &str,
    ) -> Result<(), TransportError>;
}
