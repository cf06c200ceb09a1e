use crate::{
    commands::command::{Command, World},
    types::{CommandId, ComponentId, EntityId, WORLD_COMMAND_ID},
};

/// Entity-level operations that are not directed at any component
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldCommandRequest {
    ReserveEntityIds { count: u32 },
    CreateEntity { entity_id: Option<EntityId> },
    DeleteEntity { entity_id: EntityId },
    EntityQuery { component_ids: Vec<ComponentId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldCommandResponse {
    ReservedEntityIds { first: EntityId, count: u32 },
    CreatedEntity { entity_id: EntityId },
    DeletedEntity { entity_id: EntityId },
    QueryResult { entity_ids: Vec<EntityId> },
}

/// The built-in world command, always present in every catalog
pub struct WorldCommand;

impl Command for WorldCommand {
    type Component = World;
    type Request = WorldCommandRequest;
    type Response = WorldCommandResponse;

    const COMMAND_ID: CommandId = WORLD_COMMAND_ID;

    fn name() -> &'static str {
        "WorldCommand"
    }
}
