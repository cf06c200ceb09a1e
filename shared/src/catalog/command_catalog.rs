use std::collections::HashMap;

use log::debug;

use crate::{
    catalog::{
        command_descriptor::{CommandDescriptor, ComponentDescriptor},
        error::CatalogError,
    },
    commands::command::{Command, Component, ComponentCommands, World},
    types::{CommandId, ComponentId, WORLD_COMMAND_ID, WORLD_COMPONENT_ID},
};

/// Read-only table of every command the running schema declares. Built once,
/// then shared by reference with every CommandMetaData.
pub struct CommandCatalog {
    components: Vec<ComponentDescriptor>,
    index: HashMap<(ComponentId, CommandId), (usize, usize)>,
}

impl CommandCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Every command in declaration order. The built-in world command comes
    /// first, followed by components in the order they were added.
    pub fn entries(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.components
            .iter()
            .flat_map(|component| component.commands().iter())
    }

    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    pub fn component(&self, component_id: ComponentId) -> Option<&ComponentDescriptor> {
        self.components
            .iter()
            .find(|component| component.component_id() == component_id)
    }

    pub fn get(&self, component_id: ComponentId, command_id: CommandId) -> Option<&CommandDescriptor> {
        let (component_index, command_index) = self.index.get(&(component_id, command_id))?;
        self.components[*component_index]
            .commands()
            .get(*command_index)
    }

    pub fn contains(&self, component_id: ComponentId, command_id: CommandId) -> bool {
        self.index.contains_key(&(component_id, command_id))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl std::fmt::Debug for CommandCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}

pub struct CatalogBuilder {
    components: Vec<ComponentDescriptor>,
    world_commands: Vec<CommandDescriptor>,
    error: Option<CatalogError>,
    built: bool,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            world_commands: Vec::new(),
            error: None,
            built: false,
        }
    }

    /// Adds a component and its declared commands. Any error is reported by
    /// `build()`.
    pub fn add_component<C: Component>(&mut self) -> &mut Self {
        if let Err(error) = self.try_add_component::<C>() {
            self.record_error(error);
        }
        self
    }

    /// Adds an additional world command, stored under the world component id.
    /// Any error is reported by `build()`.
    pub fn add_world_command<W: Command>(&mut self) -> &mut Self {
        if let Err(error) = self.try_add_world_command::<W>() {
            self.record_error(error);
        }
        self
    }

    // Non-deferring builder methods

    pub fn try_add_component<C: Component>(&mut self) -> Result<&mut Self, CatalogError> {
        self.check_built()?;
        if C::COMPONENT_ID == WORLD_COMPONENT_ID {
            return Err(CatalogError::ReservedComponentId { name: C::name() });
        }
        if self
            .components
            .iter()
            .any(|component| component.component_id() == C::COMPONENT_ID)
        {
            return Err(CatalogError::DuplicateComponent {
                component_id: C::COMPONENT_ID,
            });
        }

        let mut commands = ComponentCommands::new(C::COMPONENT_ID);
        C::commands(&mut commands);
        let (descriptors, foreign_commands) = commands.into_parts();

        if let Some(command_name) = foreign_commands.first().copied() {
            return Err(CatalogError::ForeignCommand {
                component_id: C::COMPONENT_ID,
                command_name,
            });
        }
        check_unique_command_ids(C::COMPONENT_ID, &descriptors)?;

        self.components
            .push(ComponentDescriptor::new(C::COMPONENT_ID, C::name(), descriptors));
        Ok(self)
    }

    pub fn try_add_world_command<W: Command>(&mut self) -> Result<&mut Self, CatalogError> {
        self.check_built()?;
        if W::component_id() != WORLD_COMPONENT_ID {
            return Err(CatalogError::ForeignCommand {
                component_id: WORLD_COMPONENT_ID,
                command_name: W::name(),
            });
        }
        if W::COMMAND_ID == WORLD_COMMAND_ID {
            return Err(CatalogError::ReservedWorldCommandId { name: W::name() });
        }
        if self
            .world_commands
            .iter()
            .any(|descriptor| descriptor.command_id() == W::COMMAND_ID)
        {
            return Err(CatalogError::DuplicateCommand {
                component_id: WORLD_COMPONENT_ID,
                command_id: W::COMMAND_ID,
            });
        }

        self.world_commands.push(CommandDescriptor::new::<W>());
        Ok(self)
    }

    /// Builds the catalog. A builder builds at most once: after the first
    /// call, successful or not, every further call returns `AlreadyBuilt`.
    pub fn build(&mut self) -> Result<CommandCatalog, CatalogError> {
        self.check_built()?;
        self.built = true;

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let mut world_commands = ComponentCommands::new(WORLD_COMPONENT_ID);
        World::commands(&mut world_commands);
        let (mut world_descriptors, _) = world_commands.into_parts();
        world_descriptors.append(&mut self.world_commands);

        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.push(ComponentDescriptor::new(
            WORLD_COMPONENT_ID,
            <World as Component>::name(),
            world_descriptors,
        ));
        components.append(&mut self.components);

        let mut index = HashMap::new();
        for (component_index, component) in components.iter().enumerate() {
            for (command_index, command) in component.commands().iter().enumerate() {
                let key = (command.component_id(), command.command_id());
                if index.insert(key, (component_index, command_index)).is_some() {
                    return Err(CatalogError::DuplicateCommand {
                        component_id: key.0,
                        command_id: key.1,
                    });
                }
            }
        }

        debug!(
            "Built command catalog: {} components, {} commands",
            components.len(),
            index.len()
        );

        Ok(CommandCatalog { components, index })
    }

    /// Checks if the builder has been built without panicking
    pub fn check_built(&self) -> Result<(), CatalogError> {
        if self.built {
            Err(CatalogError::AlreadyBuilt)
        } else {
            Ok(())
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    fn record_error(&mut self, error: CatalogError) {
        // keep the first error, later ones are usually a consequence of it
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

fn check_unique_command_ids(
    component_id: ComponentId,
    descriptors: &[CommandDescriptor],
) -> Result<(), CatalogError> {
    for (index, descriptor) in descriptors.iter().enumerate() {
        if descriptors[..index]
            .iter()
            .any(|other| other.command_id() == descriptor.command_id())
        {
            return Err(CatalogError::DuplicateCommand {
                component_id,
                command_id: descriptor.command_id(),
            });
        }
    }
    Ok(())
}
