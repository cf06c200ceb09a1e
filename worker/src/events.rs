use std::{any::Any, collections::HashMap, mem};

use skein_shared::{CommandId, CommandStatusCode, ComponentId, EntityId, InternalRequestId};

/// A response (or locally generated timeout) that has been matched to its
/// internal request id but not yet joined with the stored context
pub(crate) struct ReceivedResponse {
    pub request_id: InternalRequestId,
    pub entity_id: EntityId,
    pub status_code: CommandStatusCode,
    pub message: String,
    pub payload: Option<Box<dyn Any + Send>>,
}

/// Per-command buffers of everything received since the last drain
pub(crate) struct CommandEvents {
    responses: HashMap<(ComponentId, CommandId), Vec<ReceivedResponse>>,
    requests: HashMap<(ComponentId, CommandId), Vec<Box<dyn Any + Send>>>,
}

impl CommandEvents {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.responses.values().all(Vec::is_empty) && self.requests.values().all(Vec::is_empty)
    }

    pub fn push_response(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        response: ReceivedResponse,
    ) {
        self.responses
            .entry((component_id, command_id))
            .or_default()
            .push(response);
    }

    pub fn take_responses(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
    ) -> Vec<ReceivedResponse> {
        self.responses
            .get_mut(&(component_id, command_id))
            .map(mem::take)
            .unwrap_or_default()
    }

    pub fn has_responses(&self, component_id: ComponentId, command_id: CommandId) -> bool {
        self.responses
            .get(&(component_id, command_id))
            .is_some_and(|responses| !responses.is_empty())
    }

    /// Drops a buffered response for a request that was cancelled before it
    /// was drained
    pub fn discard_response(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        request_id: &InternalRequestId,
    ) -> bool {
        let Some(responses) = self.responses.get_mut(&(component_id, command_id)) else {
            return false;
        };
        let before = responses.len();
        responses.retain(|response| response.request_id != *request_id);
        responses.len() != before
    }

    pub fn push_request(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        request: Box<dyn Any + Send>,
    ) {
        self.requests
            .entry((component_id, command_id))
            .or_default()
            .push(request);
    }

    pub fn take_requests(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
    ) -> Vec<Box<dyn Any + Send>> {
        self.requests
            .get_mut(&(component_id, command_id))
            .map(mem::take)
            .unwrap_or_default()
    }
}
