use thiserror::Error;

use crate::types::{CommandId, ComponentId};

/// Errors that can occur while building the command catalog. All of them are
/// fatal: the worker cannot run with an ambiguous command table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two declared commands share the same (component, command) pair
    #[error("Command ID {command_id} is declared more than once on component {component_id}. Each command must have a unique ID within its component")]
    DuplicateCommand {
        component_id: ComponentId,
        command_id: CommandId,
    },

    /// The same component id was added twice
    #[error("Component ID {component_id} was added to the catalog more than once")]
    DuplicateComponent {
        component_id: ComponentId,
    },

    /// A regular component tried to use the world component id
    #[error("Component '{name}' uses component ID 0, which is reserved for world commands")]
    ReservedComponentId {
        name: &'static str,
    },

    /// An additional world command tried to use the built-in world command id
    #[error("World command '{name}' uses command ID 0, which is reserved for the built-in world command")]
    ReservedWorldCommandId {
        name: &'static str,
    },

    /// A command was declared on a component other than its own
    #[error("Command '{command_name}' was declared on component {component_id}, but belongs to a different component")]
    ForeignCommand {
        component_id: ComponentId,
        command_name: &'static str,
    },

    /// The builder has already produced a catalog, or failed to
    #[error("This catalog builder has already been built and cannot be modified or built again. Start a new builder with CommandCatalog::builder()")]
    AlreadyBuilt,

    /// The process-wide catalog was requested while it was being built
    #[error("The process-wide command catalog was requested while it was still being built")]
    ReentrantBuild,
}
