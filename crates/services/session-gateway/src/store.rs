//! Observable holder of the current session.
//!
//! The store starts `Unresolved`: nothing is known until the gateway has
//! loaded (and possibly refreshed) the persisted session. Every change
//! after that is pushed to the registered listeners together with the new
//! session value. Listeners are dropped through their [`Subscription`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use domain::{AuthChangeEvent, Session};
use tracing::debug;

/// Listener callback; receives the event and the session after the change.
pub type SessionHandler = Box<dyn Fn(AuthChangeEvent, Option<Session>) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
enum State {
    Unresolved,
    Resolved(Option<Session>),
}

struct Inner {
    state: State,
    listeners: HashMap<u64, Arc<SessionHandler>>,
    next_id: u64,
}

/// Shared session state with change notification.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: State::Unresolved,
                listeners: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// `None` until the session has been resolved once
    pub fn snapshot(&self) -> Option<Option<Session>> {
        match &self.lock().state {
            State::Unresolved => None,
            State::Resolved(session) => Some(session.clone()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.lock().state, State::Resolved(_))
    }

    /// Record the resolved session without notifying anyone
    pub fn resolve(&self, session: Option<Session>) {
        self.lock().state = State::Resolved(session);
    }

    /// Replace the session and notify every listener with `event`
    pub fn set(&self, event: AuthChangeEvent, session: Option<Session>) {
        let handlers: Vec<Arc<SessionHandler>> = {
            let mut inner = self.lock();
            inner.state = State::Resolved(session.clone());
            inner.listeners.values().cloned().collect()
        };

        debug!(%event, listeners = handlers.len(), "Session changed");
        // Called outside the lock so handlers may read the store
        for handler in handlers {
            handler(event, session.clone());
        }
    }

    /// Register `handler`; it stays active until the returned guard is dropped
    pub fn subscribe(&self, handler: SessionHandler) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Arc::new(handler));

        Subscription {
            store: Arc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// Handle to a registered listener.
///
/// Dropping it (or calling [`unsubscribe`](Self::unsubscribe)) removes the
/// listener. Removing twice is a no-op.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<Mutex<Inner>>,
    id: Option<u64>,
}

impl Subscription {
    /// A subscription bound to no store
    pub fn detached() -> Self {
        Self {
            store: Weak::new(),
            id: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.store.strong_count() > 0
    }

    pub fn unsubscribe(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.store.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.listeners.remove(&id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
