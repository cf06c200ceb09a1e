/// Property tests for WorkerSession bookkeeping
/// Random interleavings of sends, responses, cancellations and drains must
/// keep the dispatcher, the wire table and the caller's view in agreement

use std::collections::BTreeMap;

use proptest::prelude::*;

use skein_shared::{CommandStatusCode, EntityId, InternalRequestId, OutgoingCommandRequest, WireRequestId};
use skein_test::{Increment, IncrementRequest, IncrementResponse, LocalTransport, TestProtocol};
use skein_worker::{WorkerConfig, WorkerSession};

#[derive(Clone, Debug)]
enum Op {
    Send(i32),
    Respond(usize),
    Cancel(usize),
    Drain,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::Send),
        2 => any::<usize>().prop_map(Op::Respond),
        1 => any::<usize>().prop_map(Op::Cancel),
        1 => Just(Op::Drain),
    ]
}

fn pick<K: Copy, V>(map: &BTreeMap<K, V>, index: usize) -> Option<K> {
    if map.is_empty() {
        return None;
    }
    map.keys().nth(index % map.len()).copied()
}

proptest! {
    #[test]
    fn session_tracks_every_command_exactly_once(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let config = WorkerConfig {
            command_timeout: None,
            ..WorkerConfig::default()
        };
        let mut session = WorkerSession::new("worker-prop", &TestProtocol::catalog(), config);
        let mut transport = LocalTransport::new();

        // waiting for a response
        let mut awaiting: BTreeMap<InternalRequestId, (WireRequestId, i32)> = BTreeMap::new();
        // responded, not yet drained
        let mut answered: BTreeMap<InternalRequestId, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Send(value) => {
                    let request_id = session
                        .send_command(
                            &mut transport,
                            OutgoingCommandRequest::<Increment>::new(
                                EntityId::new(1),
                                EntityId::new(2),
                                IncrementRequest { value },
                            ),
                            None,
                        )
                        .unwrap();
                    prop_assert!(!awaiting.contains_key(&request_id));
                    prop_assert!(!answered.contains_key(&request_id));
                    let wire_request_id = transport.last_request().unwrap().wire_request_id;
                    awaiting.insert(request_id, (wire_request_id, value));
                }
                Op::Respond(index) => {
                    if let Some(request_id) = pick(&awaiting, index) {
                        let (wire_request_id, value) = awaiting.remove(&request_id).unwrap();
                        session
                            .receive_command_response(
                                wire_request_id,
                                CommandStatusCode::Success,
                                "",
                                Some(Box::new(IncrementResponse { total: value })),
                            )
                            .unwrap();
                        answered.insert(request_id, value);
                    }
                }
                Op::Cancel(index) => {
                    if let Some(request_id) = pick(&awaiting, index) {
                        awaiting.remove(&request_id);
                        prop_assert!(session.cancel_command(request_id).unwrap());
                    }
                }
                Op::Drain => {
                    let responses = session.take_responses::<Increment>().unwrap();
                    prop_assert_eq!(responses.len(), answered.len());
                    for response in responses {
                        let value = answered.remove(&response.request_id);
                        prop_assert_eq!(value, Some(response.request.value));
                        prop_assert_eq!(response.response, Some(IncrementResponse { total: response.request.value }));
                    }
                }
            }

            prop_assert_eq!(session.in_flight_count(), awaiting.len() + answered.len());
        }
    }
}
