//! # Skein Shared
//! Command catalog, per-command payload stores and the request-id
//! correlation used by skein workers to track in-flight commands.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod catalog;
mod commands;
mod metadata;
mod types;

pub use catalog::{
    command_catalog::{CatalogBuilder, CommandCatalog},
    command_descriptor::{CommandDescriptor, ComponentDescriptor, StoreFactory},
    error::CatalogError,
    global::{global_catalog, try_global_catalog},
};
pub use commands::{
    command::{Command, Component, ComponentCommands, World},
    command_context::{CallerContext, CommandContext},
    error::CommandMetaDataError,
    payloads::{
        CommandFailure, CommandResponse, IncomingCommandRequest, OutgoingCommandRequest,
        OutgoingCommandResponse,
    },
    request_id::{InternalRequestId, InternalRequestIdGenerator, WireRequestId},
    status_code::CommandStatusCode,
    world_commands::{WorldCommand, WorldCommandRequest, WorldCommandResponse},
};
pub use metadata::{
    command_meta_data::CommandMetaData,
    payload_store::{CommandMetaDataStorage, CommandPayloadStore, RequestState},
};
pub use types::{CommandId, ComponentId, EntityId, WORLD_COMMAND_ID, WORLD_COMPONENT_ID};
