use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time;
use tracing::{debug, warn};

use crate::core::error::Result;
use crate::core::index::CardIndex;
use crate::session::{FlipBack, GameSession, Selection, Snapshot};

/// A `GameSession` behind a mutex, with flip-backs driven by tokio timers.
///
/// Cloning the handle shares the session. A mismatch spawns a task that
/// sleeps for the configured delay and then resolves the ticket under the
/// same lock as every other mutation; tickets from a previous round are
/// ignored by the session, so `reset` needs no cancellation.
///
/// Timers run on the runtime captured at construction, so `select_card` may
/// be called from any thread. Build with `with_handle` when the constructing
/// thread is not inside a runtime (a GUI thread, say).
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
    runtime: Option<Handle>,
}

impl SharedSession {
    /// Wrap `session`, timing flip-backs on the current tokio runtime if
    /// there is one.
    #[must_use]
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            runtime: Handle::try_current().ok(),
        }
    }

    /// Wrap `session`, timing flip-backs on `runtime`.
    #[must_use]
    pub fn with_handle(session: GameSession, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            runtime: Some(runtime),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameSession> {
        // Session methods leave state consistent even if a caller panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See `GameSession::configure`.
    pub fn configure(&self, count: usize) -> Result<()> {
        self.lock().configure(count)
    }

    /// See `GameSession::reset`.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Select a card, scheduling the flip-back on a mismatch.
    pub fn select_card(&self, index: CardIndex) -> Selection {
        let (selection, delay) = {
            let mut session = self.lock();
            let selection = session.select_card(index);
            (selection, session.config().flip_back_delay)
        };

        if let Some(ticket) = selection.flip_back() {
            self.spawn_flip_back(ticket, delay);
        }

        selection
    }

    fn spawn_flip_back(&self, ticket: FlipBack, delay: Duration) {
        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(
                round = ticket.round,
                "no tokio runtime for the flip-back timer; waiting on advance"
            );
            return;
        };
        let inner = Arc::clone(&self.inner);

        runtime.spawn(async move {
            time::sleep(delay).await;

            let applied = inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .resolve_flip_back(ticket);
            if !applied {
                debug!(round = ticket.round, "flip-back timer fired for a stale ticket");
            }
        });
    }

    /// See `GameSession::advance`. Only needed when no runtime is available
    /// for timers.
    pub fn advance(&self, elapsed: Duration) -> Option<FlipBack> {
        self.lock().advance(elapsed)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lock().is_complete()
    }

    /// Run `f` against the session under the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        f(&self.lock())
    }
}

impl From<GameSession> for SharedSession {
    fn from(session: GameSession) -> Self {
        Self::new(session)
    }
}
