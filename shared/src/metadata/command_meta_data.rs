use std::{any::type_name, collections::HashMap};

use log::{debug, trace};

use crate::{
    catalog::command_catalog::CommandCatalog,
    commands::{
        command_context::{CallerContext, CommandContext},
        error::CommandMetaDataError,
        request_id::{InternalRequestId, InternalRequestIdGenerator, WireRequestId},
    },
    metadata::payload_store::{CommandMetaDataStorage, CommandPayloadStore, RequestState},
    types::{CommandId, ComponentId, EntityId},
};

type StorageMap = HashMap<(ComponentId, CommandId), Box<dyn CommandMetaDataStorage>>;

/// Tracks every in-flight outgoing command request of one worker session.
///
/// Holds one payload store per (component, command) pair in the catalog,
/// including the world commands under component id 0. Not internally
/// synchronized: a CommandMetaData belongs to exactly one session.
pub struct CommandMetaData {
    component_command_to_storage: StorageMap,
    internal_request_ids: HashMap<InternalRequestId, (ComponentId, CommandId)>,
    request_id_generator: InternalRequestIdGenerator,
}

impl CommandMetaData {
    pub fn new(catalog: &CommandCatalog) -> Self {
        let mut component_command_to_storage = StorageMap::new();
        for descriptor in catalog.entries() {
            component_command_to_storage.insert(
                (descriptor.component_id(), descriptor.command_id()),
                descriptor.create_store(),
            );
        }

        Self {
            component_command_to_storage,
            internal_request_ids: HashMap::new(),
            request_id_generator: InternalRequestIdGenerator::new(),
        }
    }

    /// Mints an InternalRequestId that is not currently live
    pub fn next_request_id(&mut self) -> InternalRequestId {
        let live_ids = &self.internal_request_ids;
        self.request_id_generator
            .generate(|request_id| live_ids.contains_key(request_id))
    }

    /// Mints a fresh id and registers the request under it
    pub fn register_request<T: Send + 'static>(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        sending_entity: EntityId,
        request: T,
        caller_context: Option<CallerContext>,
    ) -> Result<InternalRequestId, CommandMetaDataError> {
        // fail before minting if the pair or payload type is wrong
        self.verify_payload_type::<T>(component_id, command_id)?;

        let request_id = self.next_request_id();
        let context = CommandContext::new(sending_entity, request, caller_context, request_id);
        self.add_request(component_id, command_id, context)?;
        Ok(request_id)
    }

    pub fn add_request<T: Send + 'static>(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        context: CommandContext<T>,
    ) -> Result<(), CommandMetaDataError> {
        let request_id = context.request_id;
        let store = downcast_store_mut::<T>(
            &mut self.component_command_to_storage,
            component_id,
            command_id,
        )?;
        if self.internal_request_ids.contains_key(&request_id) {
            return Err(CommandMetaDataError::DuplicateRegistration { request_id });
        }

        store.add_request(context)?;
        self.internal_request_ids
            .insert(request_id, (component_id, command_id));
        debug!(
            "Registered {} for command {} on component {}",
            request_id, command_id, component_id
        );
        Ok(())
    }

    /// Links a registered request to the id the transport assigned when it
    /// accepted the send. Must only be called after `add_request`.
    pub fn add_internal_request_id(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        wire_request_id: WireRequestId,
        request_id: InternalRequestId,
    ) -> Result<(), CommandMetaDataError> {
        let storage = storage_mut(&mut self.component_command_to_storage, component_id, command_id)?;
        storage.set_wire_request_id(request_id, wire_request_id)?;
        debug!("Linked {} to {}", request_id, wire_request_id);
        Ok(())
    }

    /// The stored context of a request that is still in flight
    pub fn get_context<T: Send + 'static>(
        &self,
        component_id: ComponentId,
        command_id: CommandId,
        request_id: InternalRequestId,
    ) -> Result<&CommandContext<T>, CommandMetaDataError> {
        downcast_store::<T>(&self.component_command_to_storage, component_id, command_id)?
            .get_context(&request_id)
    }

    /// Removes a request and hands back its context
    pub fn take_context<T: Send + 'static>(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        request_id: InternalRequestId,
    ) -> Result<CommandContext<T>, CommandMetaDataError> {
        let store = downcast_store_mut::<T>(
            &mut self.component_command_to_storage,
            component_id,
            command_id,
        )?;
        let context = store.take_context(&request_id)?;
        self.internal_request_ids.remove(&request_id);
        Ok(context)
    }

    /// Forgets a request, whether or not it was ever sent. Removing a request
    /// that is not in flight is a no-op.
    pub fn remove_request(
        &mut self,
        component_id: ComponentId,
        command_id: CommandId,
        request_id: InternalRequestId,
    ) -> Result<(), CommandMetaDataError> {
        let storage = storage_mut(&mut self.component_command_to_storage, component_id, command_id)?;
        if storage.remove_meta_data(&request_id) {
            trace!("Removed {}", request_id);
        }
        if self.internal_request_ids.get(&request_id) == Some(&(component_id, command_id)) {
            self.internal_request_ids.remove(&request_id);
        }
        Ok(())
    }

    pub fn request_state(
        &self,
        component_id: ComponentId,
        command_id: CommandId,
        request_id: InternalRequestId,
    ) -> Result<RequestState, CommandMetaDataError> {
        let storage = storage(&self.component_command_to_storage, component_id, command_id)?;
        Ok(storage.request_state(&request_id))
    }

    pub fn wire_request_id(
        &self,
        component_id: ComponentId,
        command_id: CommandId,
        request_id: InternalRequestId,
    ) -> Result<Option<WireRequestId>, CommandMetaDataError> {
        let storage = storage(&self.component_command_to_storage, component_id, command_id)?;
        Ok(storage.wire_request_id(&request_id))
    }

    /// The (component, command) pair a live request was registered under
    pub fn command_for(&self, request_id: &InternalRequestId) -> Option<(ComponentId, CommandId)> {
        self.internal_request_ids.get(request_id).copied()
    }

    pub fn is_in_flight(&self, request_id: &InternalRequestId) -> bool {
        self.internal_request_ids.contains_key(request_id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.internal_request_ids.len()
    }

    pub fn in_flight_count_for(
        &self,
        component_id: ComponentId,
        command_id: CommandId,
    ) -> Result<usize, CommandMetaDataError> {
        Ok(storage(&self.component_command_to_storage, component_id, command_id)?.len())
    }

    /// Checks that `T` is the payload type stored for the pair
    pub fn verify_payload_type<T: Send + 'static>(
        &self,
        component_id: ComponentId,
        command_id: CommandId,
    ) -> Result<(), CommandMetaDataError> {
        downcast_store::<T>(&self.component_command_to_storage, component_id, command_id)?;
        Ok(())
    }

    pub fn has_command(&self, component_id: ComponentId, command_id: CommandId) -> bool {
        self.component_command_to_storage
            .contains_key(&(component_id, command_id))
    }

    pub fn store_count(&self) -> usize {
        self.component_command_to_storage.len()
    }
}

impl Drop for CommandMetaData {
    fn drop(&mut self) {
        if !self.internal_request_ids.is_empty() {
            debug!(
                "Abandoning {} in-flight command requests",
                self.internal_request_ids.len()
            );
        }
    }
}

fn storage(
    storages: &StorageMap,
    component_id: ComponentId,
    command_id: CommandId,
) -> Result<&(dyn CommandMetaDataStorage + 'static), CommandMetaDataError> {
    match storages.get(&(component_id, command_id)) {
        Some(storage) => Ok(&**storage),
        None => Err(CommandMetaDataError::UnknownCommand {
            component_id,
            command_id,
        }),
    }
}

fn storage_mut(
    storages: &mut StorageMap,
    component_id: ComponentId,
    command_id: CommandId,
) -> Result<&mut (dyn CommandMetaDataStorage + 'static), CommandMetaDataError> {
    match storages.get_mut(&(component_id, command_id)) {
        Some(storage) => Ok(&mut **storage),
        None => Err(CommandMetaDataError::UnknownCommand {
            component_id,
            command_id,
        }),
    }
}

fn downcast_store<T: Send + 'static>(
    storages: &StorageMap,
    component_id: ComponentId,
    command_id: CommandId,
) -> Result<&CommandPayloadStore<T>, CommandMetaDataError> {
    let storage = storage(storages, component_id, command_id)?;
    let expected = storage.payload_type_name();
    storage
        .as_any()
        .downcast_ref::<CommandPayloadStore<T>>()
        .ok_or(CommandMetaDataError::PayloadTypeMismatch {
            component_id,
            command_id,
            expected,
            actual: type_name::<T>(),
        })
}

fn downcast_store_mut<T: Send + 'static>(
    storages: &mut StorageMap,
    component_id: ComponentId,
    command_id: CommandId,
) -> Result<&mut CommandPayloadStore<T>, CommandMetaDataError> {
    let storage = storage_mut(storages, component_id, command_id)?;
    let expected = storage.payload_type_name();
    storage
        .as_any_mut()
        .downcast_mut::<CommandPayloadStore<T>>()
        .ok_or(CommandMetaDataError::PayloadTypeMismatch {
            component_id,
            command_id,
            expected,
            actual: type_name::<T>(),
        })
}
