use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use skein_shared::{CommandId, ComponentId, EntityId, InternalRequestId, WireRequestId};

use crate::error::WorkerError;

/// A request the transport has accepted and that is awaiting its response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentRequest {
    pub request_id: InternalRequestId,
    pub component_id: ComponentId,
    pub command_id: CommandId,
    pub target_entity: EntityId,
    pub sent_at: Instant,
}

/// Transport-side table resolving wire request ids back to internal ids
pub struct WireRequestTable {
    sent: HashMap<WireRequestId, SentRequest>,
    wire_ids: HashMap<InternalRequestId, WireRequestId>,
}

impl Default for WireRequestTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WireRequestTable {
    pub fn new() -> Self {
        Self {
            sent: HashMap::new(),
            wire_ids: HashMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        wire_request_id: WireRequestId,
        request: SentRequest,
    ) -> Result<(), WorkerError> {
        if self.sent.contains_key(&wire_request_id) {
            return Err(WorkerError::DuplicateWireRequestId { wire_request_id });
        }
        self.wire_ids.insert(request.request_id, wire_request_id);
        self.sent.insert(wire_request_id, request);
        Ok(())
    }

    pub fn contains(&self, wire_request_id: &WireRequestId) -> bool {
        self.sent.contains_key(wire_request_id)
    }

    pub fn get(&self, wire_request_id: &WireRequestId) -> Option<&SentRequest> {
        self.sent.get(wire_request_id)
    }

    pub fn remove(&mut self, wire_request_id: &WireRequestId) -> Option<SentRequest> {
        let request = self.sent.remove(wire_request_id)?;
        self.wire_ids.remove(&request.request_id);
        Some(request)
    }

    pub fn remove_by_request_id(&mut self, request_id: &InternalRequestId) -> Option<SentRequest> {
        let wire_request_id = self.wire_ids.remove(request_id)?;
        self.sent.remove(&wire_request_id)
    }

    /// Wire ids of every request sent at least `timeout` before `now`, oldest first
    pub fn expired(&self, now: Instant, timeout: Duration) -> Vec<WireRequestId> {
        let mut expired: Vec<(&WireRequestId, &SentRequest)> = self
            .sent
            .iter()
            .filter(|(_, request)| now.saturating_duration_since(request.sent_at) >= timeout)
            .collect();
        expired.sort_by_key(|(wire_request_id, request)| (request.sent_at, **wire_request_id));
        expired
            .into_iter()
            .map(|(wire_request_id, _)| *wire_request_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}
