/// Integration tests for commands other workers send to this worker
/// These tests verify that incoming requests are queued per command and that
/// replies are held until flushed, surviving a transport that refuses them

use skein_shared::{
    Command, CommandId, CommandMetaDataError, Component, ComponentCommands, ComponentId, EntityId,
    IncomingCommandRequest, WireRequestId,
};
use skein_test::{
    init_logger, Increment, IncrementRequest, IncrementResponse, LocalTransport, Open,
    OpenRequest, TestProtocol,
};
use skein_worker::{TransportError, WorkerConfig, WorkerError, WorkerSession};

// never added to the test catalog
struct Lamp;

impl Component for Lamp {
    const COMPONENT_ID: ComponentId = 99;

    fn commands(commands: &mut ComponentCommands) {
        commands.add::<Toggle>();
    }
}

struct Toggle;

impl Command for Toggle {
    type Component = Lamp;
    type Request = ();
    type Response = bool;

    const COMMAND_ID: CommandId = 1;
}

fn session() -> WorkerSession {
    init_logger();
    WorkerSession::new("worker-auth", &TestProtocol::catalog(), WorkerConfig::default())
}

fn incoming_increment(wire_request_id: u32, value: i32) -> IncomingCommandRequest<Increment> {
    IncomingCommandRequest::new(
        WireRequestId::new(wire_request_id),
        EntityId::new(11),
        "worker-caller".to_string(),
        vec!["physics".to_string()],
        IncrementRequest { value },
    )
}

/// Incoming requests are handed out once, in arrival order
#[test]
fn incoming_requests_are_drained_in_order() {
    let mut session = session();

    session.receive_command_request(incoming_increment(1, 10)).unwrap();
    session.receive_command_request(incoming_increment(2, 20)).unwrap();

    assert!(!session.is_idle());
    assert!(session.take_requests::<Open>().is_empty());

    let requests = session.take_requests::<Increment>();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].request_id, WireRequestId::new(1));
    assert_eq!(requests[0].request, IncrementRequest { value: 10 });
    assert_eq!(requests[0].caller_worker_id, "worker-caller");
    assert_eq!(requests[0].caller_attribute_set, vec!["physics".to_string()]);
    assert_eq!(requests[1].request_id, WireRequestId::new(2));

    assert!(session.take_requests::<Increment>().is_empty());
    assert!(session.is_idle());
}

/// Replies go out on flush, tagged with the wire id of the request
#[test]
fn replies_are_sent_on_flush() {
    let mut session = session();
    let mut transport = LocalTransport::new();

    session.receive_command_request(incoming_increment(5, 1)).unwrap();
    session.receive_command_request(IncomingCommandRequest::<Open>::new(
        WireRequestId::new(6),
        EntityId::new(12),
        "worker-caller".to_string(),
        Vec::new(),
        OpenRequest { force: false },
    ))
    .unwrap();

    for request in session.take_requests::<Increment>() {
        session.send_response(
            &request,
            IncrementResponse {
                total: request.request.value + 1,
            },
        );
    }
    for request in session.take_requests::<Open>() {
        session.send_failure(&request, "door is locked");
    }

    assert_eq!(session.pending_reply_count(), 2);
    assert!(transport.sent_responses.is_empty());

    assert_eq!(session.flush(&mut transport).unwrap(), 2);
    assert_eq!(session.pending_reply_count(), 0);

    let response = &transport.sent_responses[0];
    assert_eq!(response.request_id, WireRequestId::new(5));
    assert_eq!(response.payload::<IncrementResponse>(), Some(&IncrementResponse { total: 2 }));

    let failure = &transport.sent_responses[1];
    assert_eq!(failure.request_id, WireRequestId::new(6));
    assert_eq!(failure.failure_message(), Some("door is locked"));
}

/// Replies the transport refuses stay queued for the next flush
#[test]
fn refused_replies_stay_queued() {
    let mut session = session();
    let mut transport = LocalTransport::new();

    session.receive_command_request(incoming_increment(1, 1)).unwrap();
    session.receive_command_request(incoming_increment(2, 2)).unwrap();
    for request in session.take_requests::<Increment>() {
        session.send_response(&request, IncrementResponse { total: 0 });
    }

    transport.disconnect();
    match session.flush(&mut transport) {
        Err(WorkerError::Transport(TransportError::Disconnected)) => {}
        _ => panic!("Expected Transport(Disconnected) error"),
    }
    assert_eq!(session.pending_reply_count(), 2);

    transport.reconnect();
    assert_eq!(session.flush(&mut transport).unwrap(), 2);
    assert_eq!(transport.sent_responses.len(), 2);
    assert_eq!(transport.sent_responses[0].request_id, WireRequestId::new(1));
    assert_eq!(transport.sent_responses[1].request_id, WireRequestId::new(2));
}

/// Requests for commands outside the catalog are rejected, not queued
#[test]
fn incoming_request_for_unknown_command_is_rejected() {
    let mut session = session();

    let result = session.receive_command_request(IncomingCommandRequest::<Toggle>::new(
        WireRequestId::new(3),
        EntityId::new(11),
        "worker-caller".to_string(),
        Vec::new(),
        (),
    ));

    match result {
        Err(WorkerError::CommandMetaData(CommandMetaDataError::UnknownCommand {
            component_id: 99,
            command_id: 1,
        })) => {}
        _ => panic!("Expected UnknownCommand error"),
    }
    assert!(session.is_idle());
    assert!(session.take_requests::<Toggle>().is_empty());
}
