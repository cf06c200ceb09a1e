use std::fmt;

/// Locally-minted id of an outgoing command request. Valid from the moment
/// the request is registered until it is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternalRequestId(u64);

impl InternalRequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for InternalRequestId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for InternalRequestId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InternalRequestId({})", self.0)
    }
}

/// Id assigned by the transport once a request has actually been sent.
/// Only meaningful for matching incoming responses to outgoing requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireRequestId(u32);

impl WireRequestId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for WireRequestId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for WireRequestId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WireRequestId({})", self.0)
    }
}

/// Hands out monotonically increasing InternalRequestIds, skipping any id
/// the caller reports as still live.
pub struct InternalRequestIdGenerator {
    next_id: u64,
}

impl Default for InternalRequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InternalRequestIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn generate<F: Fn(&InternalRequestId) -> bool>(&mut self, is_live: F) -> InternalRequestId {
        loop {
            let id = InternalRequestId(self.next_id);
            // 0 is never handed out
            self.next_id = self.next_id.wrapping_add(1).max(1);
            if !is_live(&id) {
                return id;
            }
        }
    }

    pub fn peek(&self) -> InternalRequestId {
        InternalRequestId(self.next_id)
    }
}
