use std::any::type_name;

use crate::{
    commands::command::Command,
    metadata::payload_store::{CommandMetaDataStorage, CommandPayloadStore},
    types::{CommandId, ComponentId},
};

/// Produces a fresh, empty payload store for one command
pub type StoreFactory = fn() -> Box<dyn CommandMetaDataStorage>;

fn new_store<C: Command>() -> Box<dyn CommandMetaDataStorage> {
    Box::new(CommandPayloadStore::<C::Request>::new(C::COMMAND_ID))
}

#[derive(Clone)]
pub struct CommandDescriptor {
    component_id: ComponentId,
    command_id: CommandId,
    name: &'static str,
    payload_type_name: &'static str,
    factory: StoreFactory,
}

impl CommandDescriptor {
    pub fn new<C: Command>() -> Self {
        Self {
            component_id: C::component_id(),
            command_id: C::COMMAND_ID,
            name: C::name(),
            payload_type_name: type_name::<C::Request>(),
            factory: new_store::<C>,
        }
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    pub fn command_id(&self) -> CommandId {
        self.command_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn payload_type_name(&self) -> &'static str {
        self.payload_type_name
    }

    pub fn create_store(&self) -> Box<dyn CommandMetaDataStorage> {
        (self.factory)()
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("component_id", &self.component_id)
            .field("command_id", &self.command_id)
            .field("name", &self.name)
            .field("payload_type_name", &self.payload_type_name)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ComponentDescriptor {
    component_id: ComponentId,
    name: &'static str,
    commands: Vec<CommandDescriptor>,
}

impl ComponentDescriptor {
    pub(crate) fn new(
        component_id: ComponentId,
        name: &'static str,
        commands: Vec<CommandDescriptor>,
    ) -> Self {
        Self {
            component_id,
            name,
            commands,
        }
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }
}
