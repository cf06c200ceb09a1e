use crate::{
    commands::{
        command::Command,
        command_context::CallerContext,
        request_id::{InternalRequestId, WireRequestId},
        status_code::CommandStatusCode,
    },
    types::EntityId,
};

/// A request the local worker wants to send
pub struct OutgoingCommandRequest<C: Command> {
    pub target_entity: EntityId,
    pub sender_entity: EntityId,
    pub request: C::Request,
}

impl<C: Command> OutgoingCommandRequest<C> {
    pub fn new(target_entity: EntityId, sender_entity: EntityId, request: C::Request) -> Self {
        Self {
            target_entity,
            sender_entity,
            request,
        }
    }
}

/// A request another worker sent to a component this worker is
/// authoritative over
pub struct IncomingCommandRequest<C: Command> {
    pub request_id: WireRequestId,
    pub target_entity: EntityId,
    pub caller_worker_id: String,
    pub caller_attribute_set: Vec<String>,
    pub request: C::Request,
}

impl<C: Command> IncomingCommandRequest<C> {
    pub fn new(
        request_id: WireRequestId,
        target_entity: EntityId,
        caller_worker_id: String,
        caller_attribute_set: Vec<String>,
        request: C::Request,
    ) -> Self {
        Self {
            request_id,
            target_entity,
            caller_worker_id,
            caller_attribute_set,
            request,
        }
    }
}

/// Result of a request this worker sent, joined with the context captured
/// when it was sent
pub struct CommandResponse<C: Command> {
    pub request_id: InternalRequestId,
    pub entity_id: EntityId,
    pub message: String,
    pub status_code: CommandStatusCode,
    /// Only present when `status_code` is `Success`
    pub response: Option<C::Response>,
    pub request: C::Request,
    pub sending_entity: EntityId,
    pub caller_context: Option<CallerContext>,
}

impl<C: Command> CommandResponse<C> {
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    pub fn caller_context<U: 'static>(&self) -> Option<&U> {
        self.caller_context.as_ref()?.downcast_ref::<U>()
    }
}

/// A response queued for the transport, answering an incoming request
pub struct OutgoingCommandResponse<C: Command> {
    pub request_id: WireRequestId,
    pub response: C::Response,
}

/// A failure queued for the transport, answering an incoming request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandFailure {
    pub request_id: WireRequestId,
    pub message: String,
}
