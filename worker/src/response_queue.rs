use std::{any::Any, collections::VecDeque};

use skein_shared::{
    Command, CommandFailure, CommandId, ComponentId, OutgoingCommandResponse, WireRequestId,
};

use crate::{error::TransportError, transport::CommandTransport};

enum QueuedReply {
    Response(Box<dyn Any + Send>),
    Failure(String),
}

struct QueuedItem {
    component_id: ComponentId,
    command_id: CommandId,
    request_id: WireRequestId,
    reply: QueuedReply,
}

/// Replies to incoming requests, waiting for the transport to pick them up
/// at the end of the tick
pub struct OutgoingResponseQueue {
    queue: VecDeque<QueuedItem>,
}

impl Default for OutgoingResponseQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl OutgoingResponseQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push_response<C: Command>(&mut self, response: OutgoingCommandResponse<C>) {
        self.queue.push_back(QueuedItem {
            component_id: C::component_id(),
            command_id: C::COMMAND_ID,
            request_id: response.request_id,
            reply: QueuedReply::Response(Box::new(response.response)),
        });
    }

    pub fn push_failure<C: Command>(&mut self, failure: CommandFailure) {
        self.queue.push_back(QueuedItem {
            component_id: C::component_id(),
            command_id: C::COMMAND_ID,
            request_id: failure.request_id,
            reply: QueuedReply::Failure(failure.message),
        });
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hands every queued reply to the transport, in the order they were
    /// queued. On a transport error the failed reply and everything after it
    /// stay queued.
    pub fn flush(&mut self, transport: &mut dyn CommandTransport) -> Result<usize, TransportError> {
        let mut sent = 0;
        while let Some(item) = self.queue.front() {
            match &item.reply {
                QueuedReply::Response(response) => transport.send_command_response(
                    item.request_id,
                    item.component_id,
                    item.command_id,
                    &**response,
                )?,
                QueuedReply::Failure(message) => transport.send_command_failure(
                    item.request_id,
                    item.component_id,
                    item.command_id,
                    message,
                )?,
            }
            self.queue.pop_front();
            sent += 1;
        }
        Ok(sent)
    }
}
