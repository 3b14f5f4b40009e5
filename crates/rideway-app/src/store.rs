//! Explicit session object with change subscriptions.
//!
//! The auth collaborator owns a [`SessionStore`] and publishes every new
//! snapshot through it. Readers either borrow the current snapshot or hold a
//! [`SessionSubscription`], which yields snapshots strictly in publish order.

use rideway_core::Session;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Current session plus its subscribers.
#[derive(Debug)]
pub struct SessionStore {
    current: Session,
    subscribers: Vec<mpsc::UnboundedSender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a store whose session is still resolving.
    pub fn new() -> Self {
        Self::with_session(Session::resolving())
    }

    /// Create a store starting from the given session.
    pub fn with_session(session: Session) -> Self {
        Self { current: session, subscribers: Vec::new() }
    }

    /// Current snapshot.
    pub fn current(&self) -> &Session {
        &self.current
    }

    /// Subscribe to changes.
    ///
    /// The current snapshot is delivered first, so a subscriber never has to
    /// read the store separately to learn the initial state.
    pub fn subscribe(&mut self) -> SessionSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        if tx.send(self.current.clone()).is_ok() {
            self.subscribers.push(tx);
        }
        SessionSubscription { rx }
    }

    /// Publish a new snapshot.
    ///
    /// Returns `false` and notifies nobody if `session` equals the current
    /// snapshot. Subscribers whose receiver was dropped are pruned.
    pub fn publish(&mut self, session: Session) -> bool {
        if session == self.current {
            return false;
        }

        self.current = session;
        let current = &self.current;
        self.subscribers.retain(|tx| tx.send(current.clone()).is_ok());
        true
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Ordered stream of session snapshots from a [`SessionStore`].
#[derive(Debug)]
pub struct SessionSubscription {
    rx: mpsc::UnboundedReceiver<Session>,
}

impl SessionSubscription {
    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the store is dropped and every published snapshot
    /// was received.
    pub async fn recv(&mut self) -> Option<Session> {
        self.rx.recv().await
    }

    /// Take the next snapshot if one was already delivered.
    pub fn try_recv(&mut self) -> Result<Session, TryRecvError> {
        self.rx.try_recv()
    }
}
