use std::{any::Any, fmt};

use crate::{commands::request_id::InternalRequestId, types::EntityId};

/// Caller-supplied bookkeeping carried alongside a request, handed back
/// untouched when the request completes
pub struct CallerContext {
    inner: Box<dyn Any + Send>,
}

impl CallerContext {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
        }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl fmt::Debug for CallerContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CallerContext(..)")
    }
}

/// Everything known about an outgoing request at the moment it was sent
#[derive(Debug)]
pub struct CommandContext<T> {
    pub sending_entity: EntityId,
    pub request: T,
    pub caller_context: Option<CallerContext>,
    pub request_id: InternalRequestId,
}

impl<T> CommandContext<T> {
    pub fn new(
        sending_entity: EntityId,
        request: T,
        caller_context: Option<CallerContext>,
        request_id: InternalRequestId,
    ) -> Self {
        Self {
            sending_entity,
            request,
            caller_context,
            request_id,
        }
    }

    pub fn caller_context<U: 'static>(&self) -> Option<&U> {
        self.caller_context.as_ref()?.downcast_ref::<U>()
    }
}
