//! # Skein Worker
//! The per-connection session layer: sends commands through a transport,
//! resolves wire request ids back to the requests that produced them, applies
//! the command timeout, and queues replies to incoming commands.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use skein_shared::{
        CallerContext, Command, CommandCatalog, CommandId, CommandResponse, CommandStatusCode,
        Component, ComponentCommands, ComponentId, EntityId, IncomingCommandRequest,
        InternalRequestId, OutgoingCommandRequest, WireRequestId,
    };
}

mod error;
mod events;
mod response_queue;
mod session;
mod transport;
mod wire_request_table;
mod worker_config;

pub use error::{TransportError, WorkerError};
pub use response_queue::OutgoingResponseQueue;
pub use session::WorkerSession;
pub use transport::CommandTransport;
pub use wire_request_table::{SentRequest, WireRequestTable};
pub use worker_config::WorkerConfig;
