/// Integration tests for world commands
/// World commands are not attached to any component; they live under the
/// reserved component id 0 next to user-declared world commands

use skein_shared::{
    Command, CommandStatusCode, EntityId, OutgoingCommandRequest, WorldCommand,
    WorldCommandRequest, WorldCommandResponse, WORLD_COMPONENT_ID,
};
use skein_test::{init_logger, LocalTransport, Teleport, TeleportRequest, TestProtocol};
use skein_worker::{WorkerConfig, WorkerSession};

fn session() -> WorkerSession {
    init_logger();
    WorkerSession::new("worker-world", &TestProtocol::catalog(), WorkerConfig::default())
}

/// The built-in world command and user world commands have separate stores
#[test]
fn world_commands_have_their_own_stores() {
    let session = session();
    let dispatcher = session.dispatcher();

    assert!(dispatcher.has_command(WORLD_COMPONENT_ID, WorldCommand::COMMAND_ID));
    assert!(dispatcher.has_command(WORLD_COMPONENT_ID, Teleport::COMMAND_ID));
    assert_eq!(Teleport::component_id(), WORLD_COMPONENT_ID);
    // world(0,0), world(0,1), counter(10,1), counter(10,2), door(20,1)
    assert_eq!(dispatcher.store_count(), 5);
}

/// Entity id reservations round trip through the session
#[test]
fn reserve_entity_ids_round_trip() {
    let mut session = session();
    let mut transport = LocalTransport::new();

    let request_id = session
        .send_command(
            &mut transport,
            OutgoingCommandRequest::<WorldCommand>::new(
                EntityId::new(0),
                EntityId::new(5),
                WorldCommandRequest::ReserveEntityIds { count: 3 },
            ),
            None,
        )
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.component_id, WORLD_COMPONENT_ID);
    assert_eq!(
        sent.payload::<WorldCommandRequest>(),
        Some(&WorldCommandRequest::ReserveEntityIds { count: 3 })
    );
    let wire_request_id = sent.wire_request_id;

    session
        .receive_command_response(
            wire_request_id,
            CommandStatusCode::Success,
            "",
            Some(Box::new(WorldCommandResponse::ReservedEntityIds {
                first: EntityId::new(1000),
                count: 3,
            })),
        )
        .unwrap();

    let responses = session.take_responses::<WorldCommand>().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].request_id, request_id);
    assert_eq!(
        responses[0].response,
        Some(WorldCommandResponse::ReservedEntityIds {
            first: EntityId::new(1000),
            count: 3,
        })
    );
    assert_eq!(
        responses[0].request,
        WorldCommandRequest::ReserveEntityIds { count: 3 }
    );
}

/// A user world command does not see responses of the built-in one
#[test]
fn user_world_command_is_routed_separately() {
    let mut session = session();
    let mut transport = LocalTransport::new();

    session
        .send_command(
            &mut transport,
            OutgoingCommandRequest::<WorldCommand>::new(
                EntityId::new(0),
                EntityId::new(5),
                WorldCommandRequest::DeleteEntity {
                    entity_id: EntityId::new(44),
                },
            ),
            None,
        )
        .unwrap();
    let delete_wire = transport.last_request().unwrap().wire_request_id;

    let teleport_id = session
        .send_command(
            &mut transport,
            OutgoingCommandRequest::<Teleport>::new(
                EntityId::new(0),
                EntityId::new(5),
                TeleportRequest {
                    entity_id: EntityId::new(44),
                    x: 1.0,
                    y: 2.0,
                },
            ),
            None,
        )
        .unwrap();
    let teleport_wire = transport.last_request().unwrap().wire_request_id;

    session
        .receive_command_response(teleport_wire, CommandStatusCode::Success, "", Some(Box::new(())))
        .unwrap();

    assert!(session.take_responses::<WorldCommand>().unwrap().is_empty());
    let teleports = session.take_responses::<Teleport>().unwrap();
    assert_eq!(teleports.len(), 1);
    assert_eq!(teleports[0].request_id, teleport_id);

    session
        .receive_command_response(
            delete_wire,
            CommandStatusCode::NotFound,
            "entity 44 does not exist",
            None,
        )
        .unwrap();
    let deletes = session.take_responses::<WorldCommand>().unwrap();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].status_code, CommandStatusCode::NotFound);
    assert_eq!(session.in_flight_count(), 0);
}
