//! Generic runtime for routing orchestration.
//!
//! The Runtime drives the routing event loop, coordinating between:
//! - [`SessionSubscription`]: session changes from the auth collaborator
//! - [`SessionRouter`]: the routing state machine
//! - [`Navigator`]: platform-specific navigation

use rideway_core::Role;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::{Navigator, RouterAction, RouterConfig, RouterEvent, SessionRouter, SessionSubscription};

/// Generic runtime that orchestrates the router and a navigator.
///
/// Events are processed one at a time, in delivery order. Each replace into
/// a role flow is followed by that tree's entry guard, exactly like a layout
/// checking the session before rendering its children.
pub struct Runtime<N>
where
    N: Navigator,
{
    navigator: N,
    router: SessionRouter,
    sessions: SessionSubscription,
}

impl<N> Runtime<N>
where
    N: Navigator,
{
    /// Create a runtime reading session changes from `sessions`.
    pub fn new(navigator: N, sessions: SessionSubscription, config: RouterConfig) -> Self {
        Self { navigator, router: SessionRouter::new(config), sessions }
    }

    /// Run until the session store is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigator rejects a command.
    pub async fn run(mut self) -> Result<(), N::Error> {
        while let Some(session) = self.sessions.recv().await {
            self.process(RouterEvent::SessionChanged(session)).await?;
        }

        tracing::debug!("session store closed, stopping router");
        Ok(())
    }

    /// Run until the session store is dropped, also serving deep links into
    /// guarded trees.
    ///
    /// Session changes take priority over deep links that arrive at the same
    /// time, so a link is always checked against the freshest session.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigator rejects a command.
    pub async fn run_with_deep_links(
        mut self,
        mut deep_links: mpsc::UnboundedReceiver<Role>,
    ) -> Result<(), N::Error> {
        let mut links_open = true;

        loop {
            let event = tokio::select! {
                biased;

                maybe_session = self.sessions.recv() => match maybe_session {
                    Some(session) => RouterEvent::SessionChanged(session),
                    None => break,
                },

                maybe_role = deep_links.recv(), if links_open => match maybe_role {
                    Some(role) => RouterEvent::TreeEntered { role },
                    None => {
                        links_open = false;
                        continue;
                    },
                },
            };

            self.process(event).await?;
        }

        tracing::debug!("session store closed, stopping router");
        Ok(())
    }

    /// Process every session change already delivered, without waiting.
    ///
    /// Returns `false` if the session store was dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigator rejects a command.
    pub async fn pump(&mut self) -> Result<bool, N::Error> {
        loop {
            match self.sessions.try_recv() {
                Ok(session) => self.process(RouterEvent::SessionChanged(session)).await?,
                Err(TryRecvError::Empty) => return Ok(true),
                Err(TryRecvError::Disconnected) => return Ok(false),
            }
        }
    }

    /// Navigate directly into the guarded tree for `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigator rejects a command.
    pub async fn enter_tree(&mut self, role: Role) -> Result<(), N::Error> {
        self.process(RouterEvent::TreeEntered { role }).await
    }

    /// Feed one event through the router and execute the resulting actions.
    ///
    /// A rejected command was never issued, so the router forgets its root.
    async fn process(&mut self, event: RouterEvent) -> Result<(), N::Error> {
        let result = self.execute(event).await;
        if result.is_err() {
            self.router.forget_root();
        }
        result
    }

    async fn execute(&mut self, event: RouterEvent) -> Result<(), N::Error> {
        let mut pending_actions = self.router.handle(event);

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    RouterAction::Replace { target } => {
                        self.navigator.replace(target).await?;

                        // Entering the new root runs its layout guard
                        if let Some(role) = target.role() {
                            pending_actions
                                .extend(self.router.handle(RouterEvent::TreeEntered { role }));
                        }
                    },
                    RouterAction::Mount { role } => self.navigator.mount(role).await?,
                }
            }
        }
        Ok(())
    }

    /// Get a reference to the router
    pub fn router(&self) -> &SessionRouter {
        &self.router
    }

    /// Get a reference to the navigator
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Get a mutable reference to the navigator
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Consume the runtime, returning the navigator
    pub fn into_navigator(self) -> N {
        self.navigator
    }
}
