use std::{
    any::{type_name, Any},
    collections::HashMap,
};

use log::trace;

use crate::{
    commands::{
        command_context::CommandContext,
        error::CommandMetaDataError,
        request_id::{InternalRequestId, WireRequestId},
    },
    types::CommandId,
};

/// Where a request is in its lifetime, derived from which maps hold it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    /// Context stored, not yet accepted by the transport
    Registered,
    /// Context stored and linked to a wire request id
    Sent(WireRequestId),
    /// Completed, cancelled, or never registered
    Removed,
}

/// The payload-independent half of a CommandPayloadStore, used by
/// CommandMetaData for bookkeeping that does not need the payload type
pub trait CommandMetaDataStorage: Any + Send {
    fn command_id(&self) -> CommandId;
    fn payload_type_name(&self) -> &'static str;
    fn contains(&self, request_id: &InternalRequestId) -> bool;
    fn set_wire_request_id(
        &mut self,
        request_id: InternalRequestId,
        wire_request_id: WireRequestId,
    ) -> Result<(), CommandMetaDataError>;
    fn wire_request_id(&self, request_id: &InternalRequestId) -> Option<WireRequestId>;
    fn request_state(&self, request_id: &InternalRequestId) -> RequestState;
    /// Removes the context and any wire request id. Returns false if there
    /// was nothing to remove.
    fn remove_meta_data(&mut self, request_id: &InternalRequestId) -> bool;
    fn request_ids(&self) -> Vec<InternalRequestId>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Send-time contexts of every in-flight request of one command, keyed by
/// internal request id
pub struct CommandPayloadStore<T: Send + 'static> {
    command_id: CommandId,
    contexts: HashMap<InternalRequestId, CommandContext<T>>,
    wire_request_ids: HashMap<InternalRequestId, WireRequestId>,
}

impl<T: Send + 'static> CommandPayloadStore<T> {
    pub fn new(command_id: CommandId) -> Self {
        Self {
            command_id,
            contexts: HashMap::new(),
            wire_request_ids: HashMap::new(),
        }
    }

    pub fn add_request(&mut self, context: CommandContext<T>) -> Result<(), CommandMetaDataError> {
        let request_id = context.request_id;
        if self.contexts.contains_key(&request_id) {
            return Err(CommandMetaDataError::DuplicateRegistration { request_id });
        }
        trace!("command {}: registered {}", self.command_id, request_id);
        self.contexts.insert(request_id, context);
        Ok(())
    }

    pub fn get_context(
        &self,
        request_id: &InternalRequestId,
    ) -> Result<&CommandContext<T>, CommandMetaDataError> {
        self.contexts
            .get(request_id)
            .ok_or(CommandMetaDataError::NotFound {
                request_id: *request_id,
            })
    }

    /// Removes the request and hands its context back
    pub fn take_context(
        &mut self,
        request_id: &InternalRequestId,
    ) -> Result<CommandContext<T>, CommandMetaDataError> {
        let Some(context) = self.contexts.remove(request_id) else {
            return Err(CommandMetaDataError::NotFound {
                request_id: *request_id,
            });
        };
        self.wire_request_ids.remove(request_id);
        trace!("command {}: completed {}", self.command_id, request_id);
        Ok(context)
    }
}

impl<T: Send + 'static> CommandMetaDataStorage for CommandPayloadStore<T> {
    fn command_id(&self) -> CommandId {
        self.command_id
    }

    fn payload_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn contains(&self, request_id: &InternalRequestId) -> bool {
        self.contexts.contains_key(request_id)
    }

    fn set_wire_request_id(
        &mut self,
        request_id: InternalRequestId,
        wire_request_id: WireRequestId,
    ) -> Result<(), CommandMetaDataError> {
        if !self.contexts.contains_key(&request_id) {
            return Err(CommandMetaDataError::NotFound { request_id });
        }
        if let Some(existing) = self.wire_request_ids.get(&request_id) {
            return Err(CommandMetaDataError::WireRequestIdAlreadySet {
                request_id,
                wire_request_id: *existing,
            });
        }
        trace!(
            "command {}: linked {} to {}",
            self.command_id,
            request_id,
            wire_request_id
        );
        self.wire_request_ids.insert(request_id, wire_request_id);
        Ok(())
    }

    fn wire_request_id(&self, request_id: &InternalRequestId) -> Option<WireRequestId> {
        self.wire_request_ids.get(request_id).copied()
    }

    fn request_state(&self, request_id: &InternalRequestId) -> RequestState {
        if !self.contexts.contains_key(request_id) {
            return RequestState::Removed;
        }
        match self.wire_request_ids.get(request_id) {
            Some(wire_request_id) => RequestState::Sent(*wire_request_id),
            None => RequestState::Registered,
        }
    }

    fn remove_meta_data(&mut self, request_id: &InternalRequestId) -> bool {
        self.wire_request_ids.remove(request_id);
        self.contexts.remove(request_id).is_some()
    }

    fn request_ids(&self) -> Vec<InternalRequestId> {
        self.contexts.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.contexts.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
