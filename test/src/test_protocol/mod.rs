/// Minimal command protocol for integration testing

use skein_shared::{
    CatalogError, Command, CommandCatalog, CommandId, Component, ComponentCommands, ComponentId,
    EntityId, World,
};

pub const COUNTER_COMPONENT_ID: ComponentId = 10;
pub const DOOR_COMPONENT_ID: ComponentId = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncrementRequest {
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncrementResponse {
    pub total: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenRequest {
    pub force: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TeleportRequest {
    pub entity_id: EntityId,
    pub x: f32,
    pub y: f32,
}

pub struct Counter;

impl Component for Counter {
    const COMPONENT_ID: ComponentId = COUNTER_COMPONENT_ID;

    fn name() -> &'static str {
        "Counter"
    }

    fn commands(commands: &mut ComponentCommands) {
        commands.add::<Increment>().add::<Reset>();
    }
}

pub struct Increment;

impl Command for Increment {
    type Component = Counter;
    type Request = IncrementRequest;
    type Response = IncrementResponse;

    const COMMAND_ID: CommandId = 1;

    fn name() -> &'static str {
        "Increment"
    }
}

pub struct Reset;

impl Command for Reset {
    type Component = Counter;
    type Request = ();
    type Response = ();

    const COMMAND_ID: CommandId = 2;

    fn name() -> &'static str {
        "Reset"
    }
}

pub struct Door;

impl Component for Door {
    const COMPONENT_ID: ComponentId = DOOR_COMPONENT_ID;

    fn name() -> &'static str {
        "Door"
    }

    fn commands(commands: &mut ComponentCommands) {
        commands.add::<Open>();
    }
}

pub struct Open;

impl Command for Open {
    type Component = Door;
    type Request = OpenRequest;
    type Response = bool;

    const COMMAND_ID: CommandId = 1;

    fn name() -> &'static str {
        "Open"
    }
}

/// Extra world command, stored next to the built-in one
pub struct Teleport;

impl Command for Teleport {
    type Component = World;
    type Request = TeleportRequest;
    type Response = ();

    const COMMAND_ID: CommandId = 1;

    fn name() -> &'static str {
        "Teleport"
    }
}

pub struct TestProtocol;

impl TestProtocol {
    /// Catalog with the Counter and Door components and the Teleport world command
    pub fn catalog() -> CommandCatalog {
        Self::try_catalog().expect("test protocol must build")
    }

    pub fn try_catalog() -> Result<CommandCatalog, CatalogError> {
        CommandCatalog::builder()
            .add_component::<Counter>()
            .add_component::<Door>()
            .add_world_command::<Teleport>()
            .build()
    }
}
