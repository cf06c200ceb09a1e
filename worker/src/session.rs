use std::{any::Any, time::Instant};

use log::{debug, warn};

use skein_shared::{
    CallerContext, Command, CommandCatalog, CommandFailure, CommandMetaData, CommandMetaDataError,
    CommandResponse, CommandStatusCode, IncomingCommandRequest, InternalRequestId,
    OutgoingCommandRequest, OutgoingCommandResponse, WireRequestId,
};

use crate::{
    error::WorkerError,
    events::{CommandEvents, ReceivedResponse},
    response_queue::OutgoingResponseQueue,
    transport::CommandTransport,
    wire_request_table::{SentRequest, WireRequestTable},
    worker_config::WorkerConfig,
};

/// One worker's connection to the simulation runtime, as far as commands are
/// concerned.
///
/// Owns the CommandMetaData for the connection, the table that resolves wire
/// request ids, and the queues of received responses, received requests and
/// replies waiting to be sent. Everything is driven synchronously from the
/// worker's tick; a session must not be shared between threads.
pub struct WorkerSession {
    worker_id: String,
    config: WorkerConfig,
    meta_data: CommandMetaData,
    wire_requests: WireRequestTable,
    events: CommandEvents,
    outgoing_responses: OutgoingResponseQueue,
}

impl WorkerSession {
    pub fn new(worker_id: &str, catalog: &CommandCatalog, config: WorkerConfig) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            config,
            meta_data: CommandMetaData::new(catalog),
            wire_requests: WireRequestTable::new(),
            events: CommandEvents::new(),
            outgoing_responses: OutgoingResponseQueue::new(),
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &CommandMetaData {
        &self.meta_data
    }

    /// Number of commands registered with the dispatcher. This includes
    /// commands whose response or timeout has arrived but has not been
    /// drained by `take_responses` yet.
    pub fn in_flight_count(&self) -> usize {
        self.meta_data.in_flight_count()
    }

    // Outgoing commands

    /// Registers a command, hands it to the transport, and links the wire
    /// request id the transport assigned. If the transport refuses the
    /// command, nothing stays registered.
    pub fn send_command<C: Command>(
        &mut self,
        transport: &mut dyn CommandTransport,
        outgoing: OutgoingCommandRequest<C>,
        caller_context: Option<CallerContext>,
    ) -> Result<InternalRequestId, WorkerError> {
        let component_id = C::component_id();
        let command_id = C::COMMAND_ID;
        let OutgoingCommandRequest {
            target_entity,
            sender_entity,
            request,
        } = outgoing;

        let request_id = self.meta_data.register_request(
            component_id,
            command_id,
            sender_entity,
            request,
            caller_context,
        )?;

        let send_result = {
            let context =
                self.meta_data
                    .get_context::<C::Request>(component_id, command_id, request_id)?;
            transport.send_command_request(target_entity, component_id, command_id, &context.request)
        };

        let wire_request_id = match send_result {
            Ok(wire_request_id) => wire_request_id,
            Err(error) => {
                warn!(
                    "Transport refused {} for command {}: {}",
                    request_id,
                    C::name(),
                    error
                );
                self.meta_data
                    .remove_request(component_id, command_id, request_id)?;
                return Err(error.into());
            }
        };

        if self.wire_requests.contains(&wire_request_id) {
            self.meta_data
                .remove_request(component_id, command_id, request_id)?;
            return Err(WorkerError::DuplicateWireRequestId { wire_request_id });
        }

        self.meta_data
            .add_internal_request_id(component_id, command_id, wire_request_id, request_id)?;
        self.wire_requests.insert(
            wire_request_id,
            SentRequest {
                request_id,
                component_id,
                command_id,
                target_entity,
                sent_at: Instant::now(),
            },
        )?;

        Ok(request_id)
    }

    /// Abandons a command. Any response that arrives for it later is treated
    /// as unknown. Returns false if the command was not in flight.
    pub fn cancel_command(&mut self, request_id: InternalRequestId) -> Result<bool, WorkerError> {
        let Some((component_id, command_id)) = self.meta_data.command_for(&request_id) else {
            return Ok(false);
        };
        self.meta_data
            .remove_request(component_id, command_id, request_id)?;
        self.wire_requests.remove_by_request_id(&request_id);
        self.events
            .discard_response(component_id, command_id, &request_id);
        debug!("Cancelled {}", request_id);
        Ok(true)
    }

    /// Called by the transport when a response or failure arrives for a
    /// command this worker sent. `response` is only present on success.
    pub fn receive_command_response(
        &mut self,
        wire_request_id: WireRequestId,
        status_code: CommandStatusCode,
        message: &str,
        response: Option<Box<dyn Any + Send>>,
    ) -> Result<(), WorkerError> {
        let Some(sent) = self.wire_requests.remove(&wire_request_id) else {
            if self.config.strict_response_matching {
                return Err(WorkerError::UnknownWireRequestId { wire_request_id });
            }
            warn!(
                "Dropping response for {}: no command in flight with that id",
                wire_request_id
            );
            return Ok(());
        };

        self.events.push_response(
            sent.component_id,
            sent.command_id,
            ReceivedResponse {
                request_id: sent.request_id,
                entity_id: sent.target_entity,
                status_code,
                message: message.to_string(),
                payload: response,
            },
        );
        Ok(())
    }

    /// Completes every command that has waited longer than the configured
    /// timeout with a `Timeout` status. Returns how many were expired.
    pub fn expire_commands(&mut self, now: Instant) -> usize {
        let Some(timeout) = self.config.command_timeout else {
            return 0;
        };

        let expired = self.wire_requests.expired(now, timeout);
        for wire_request_id in &expired {
            let Some(sent) = self.wire_requests.remove(wire_request_id) else {
                continue;
            };
            warn!(
                "Command {} on component {} timed out ({})",
                sent.command_id, sent.component_id, sent.request_id
            );
            self.events.push_response(
                sent.component_id,
                sent.command_id,
                ReceivedResponse {
                    request_id: sent.request_id,
                    entity_id: sent.target_entity,
                    status_code: CommandStatusCode::Timeout,
                    message: format!("Command timed out after {:?}", timeout),
                    payload: None,
                },
            );
        }
        expired.len()
    }

    pub fn has_responses<C: Command>(&self) -> bool {
        self.events.has_responses(C::component_id(), C::COMMAND_ID)
    }

    /// Drains the completed commands of type `C`, joining each with the
    /// context captured when it was sent. Each drained command is removed
    /// from the dispatcher.
    pub fn take_responses<C: Command>(&mut self) -> Result<Vec<CommandResponse<C>>, WorkerError> {
        let component_id = C::component_id();
        let command_id = C::COMMAND_ID;
        self.meta_data
            .verify_payload_type::<C::Request>(component_id, command_id)?;

        let received = self.events.take_responses(component_id, command_id);
        let mut responses = Vec::with_capacity(received.len());

        for received in received {
            let context = match self.meta_data.take_context::<C::Request>(
                component_id,
                command_id,
                received.request_id,
            ) {
                Ok(context) => context,
                Err(CommandMetaDataError::NotFound { request_id }) => {
                    warn!("Dropping response for {}: context already removed", request_id);
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            let mut status_code = received.status_code;
            let mut message = received.message;
            let response = match received.payload.map(|payload| payload.downcast::<C::Response>()) {
                None => None,
                Some(Ok(response)) => Some(*response),
                Some(Err(_)) => {
                    warn!(
                        "Response payload for {} is not a {}",
                        received.request_id,
                        C::name()
                    );
                    status_code = CommandStatusCode::InternalError;
                    message = format!("Response payload did not match command {}", C::name());
                    None
                }
            };

            responses.push(CommandResponse {
                request_id: received.request_id,
                entity_id: received.entity_id,
                message,
                status_code,
                response,
                request: context.request,
                sending_entity: context.sending_entity,
                caller_context: context.caller_context,
            });
        }

        Ok(responses)
    }

    // Incoming commands

    /// Called by the transport when another worker sends a command to a
    /// component this worker is authoritative over. Commands missing from
    /// the catalog are rejected with `UnknownCommand`.
    pub fn receive_command_request<C: Command>(
        &mut self,
        request: IncomingCommandRequest<C>,
    ) -> Result<(), WorkerError> {
        let component_id = C::component_id();
        let command_id = C::COMMAND_ID;
        if !self.meta_data.has_command(component_id, command_id) {
            return Err(CommandMetaDataError::UnknownCommand {
                component_id,
                command_id,
            }
            .into());
        }
        self.events
            .push_request(component_id, command_id, Box::new(request));
        Ok(())
    }

    pub fn take_requests<C: Command>(&mut self) -> Vec<IncomingCommandRequest<C>> {
        self.events
            .take_requests(C::component_id(), C::COMMAND_ID)
            .into_iter()
            .filter_map(|request| match request.downcast::<IncomingCommandRequest<C>>() {
                Ok(request) => Some(*request),
                Err(_) => {
                    warn!("Dropping incoming request that is not a {}", C::name());
                    None
                }
            })
            .collect()
    }

    /// Queues a successful reply, sent on the next `flush`
    pub fn send_response<C: Command>(
        &mut self,
        request: &IncomingCommandRequest<C>,
        response: C::Response,
    ) {
        self.outgoing_responses
            .push_response::<C>(OutgoingCommandResponse {
                request_id: request.request_id,
                response,
            });
    }

    /// Queues a failure reply, sent on the next `flush`
    pub fn send_failure<C: Command>(&mut self, request: &IncomingCommandRequest<C>, message: &str) {
        self.outgoing_responses.push_failure::<C>(CommandFailure {
            request_id: request.request_id,
            message: message.to_string(),
        });
    }

    pub fn pending_reply_count(&self) -> usize {
        self.outgoing_responses.len()
    }

    /// Hands queued replies to the transport. Returns how many were sent.
    pub fn flush(&mut self, transport: &mut dyn CommandTransport) -> Result<usize, WorkerError> {
        Ok(self.outgoing_responses.flush(transport)?)
    }

    /// True when nothing received is waiting to be drained
    pub fn is_idle(&self) -> bool {
        self.events.is_empty() && self.outgoing_responses.is_empty()
    }
}

impl Drop for WorkerSession {
    fn drop(&mut self) {
        if !self.wire_requests.is_empty() {
            debug!(
                "Worker {} disconnecting with {} commands awaiting responses",
                self.worker_id,
                self.wire_requests.len()
            );
        }
    }
}
