pub type ComponentId = u32;
pub type CommandId = u32;

/// Component id reserved for commands that are not attached to any component
pub const WORLD_COMPONENT_ID: ComponentId = 0;
/// Command id of the built-in world command
pub const WORLD_COMMAND_ID: CommandId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(i64);

impl EntityId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "EntityId({})", self.0)
    }
}
