use std::any::type_name;

use crate::{
    catalog::command_descriptor::CommandDescriptor,
    types::{CommandId, ComponentId, WORLD_COMPONENT_ID},
};

/// A remote-procedure-call style command declared by a Component
pub trait Command: 'static {
    /// The Component this command is declared on
    type Component: Component;
    /// Payload sent with the request
    type Request: Send + 'static;
    /// Payload returned on success
    type Response: Send + 'static;

    /// Unique within the declaring Component
    const COMMAND_ID: CommandId;

    fn name() -> &'static str {
        type_name::<Self>()
    }

    fn component_id() -> ComponentId {
        <Self::Component as Component>::COMPONENT_ID
    }
}

/// A networked component type that may declare commands
pub trait Component: 'static {
    const COMPONENT_ID: ComponentId;

    fn name() -> &'static str {
        type_name::<Self>()
    }

    fn commands(commands: &mut ComponentCommands);
}

/// Collects the commands a single Component declares, in declaration order
pub struct ComponentCommands {
    component_id: ComponentId,
    descriptors: Vec<CommandDescriptor>,
    foreign_commands: Vec<&'static str>,
}

impl ComponentCommands {
    pub(crate) fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            descriptors: Vec::new(),
            foreign_commands: Vec::new(),
        }
    }

    pub fn add<C: Command>(&mut self) -> &mut Self {
        if C::component_id() != self.component_id {
            self.foreign_commands.push(C::name());
            return self;
        }
        self.descriptors.push(CommandDescriptor::new::<C>());
        self
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    pub(crate) fn into_parts(self) -> (Vec<CommandDescriptor>, Vec<&'static str>) {
        (self.descriptors, self.foreign_commands)
    }
}

/// The pseudo-component that world-scoped commands are declared on
pub struct World;

impl Component for World {
    const COMPONENT_ID: ComponentId = WORLD_COMPONENT_ID;

    fn name() -> &'static str {
        "World"
    }

    fn commands(commands: &mut ComponentCommands) {
        commands.add::<crate::WorldCommand>();
    }
}
