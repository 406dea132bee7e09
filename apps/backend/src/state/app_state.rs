use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::domain::host::HostSeat;
use crate::domain::round::Round;
use crate::ws::hub::WsRegistry;

/// Everything a round operation may touch: the round itself and the
/// facilitator seat. Held behind one mutex so every operation observes and
/// mutates both atomically.
#[derive(Debug, Default)]
pub struct SessionState {
    pub round: Round,
    pub host: HostSeat,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<SessionState>>,
    registry: Arc<WsRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(SessionState::new())),
            registry: Arc::new(WsRegistry::new()),
        }
    }

    /// Lock the session state. Operations run to completion under this lock,
    /// which is what serializes `start`/`close`/`reveal`/`clear`/`submit`.
    pub fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock()
    }

    pub fn registry(&self) -> &Arc<WsRegistry> {
        &self.registry
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
