use std::fmt;

use uuid::Uuid;

/// Per-invocation logging context. Every log line written while handling
/// one request is prefixed with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    id: Uuid,
}

impl Invocation {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Flushes buffered log output at the end of the invocation.
    pub fn finish(self) {
        log::debug!("[{}] Invocation finished", self);
        log::Log::flush(log::logger());
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
