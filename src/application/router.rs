//! Fragment-driven router.
//!
//! [`HashRouter`] owns the current location fragment and publishes changes to
//! every live [`StateSubscription`]. Views receive the router by reference
//! instead of reading a global location.

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::domain::navigation::NavigationState;

fn normalize(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// Owner of the location fragment.
#[derive(Debug)]
pub struct HashRouter {
    fragment: watch::Sender<String>,
}

impl HashRouter {
    /// Creates a router positioned at `initial` (leading `#` optional).
    #[must_use]
    pub fn new(initial: &str) -> Self {
        let (fragment, _) = watch::channel(normalize(initial).to_string());
        Self { fragment }
    }

    /// Returns the current fragment without its leading `#`.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    /// Parses the current fragment.
    #[must_use]
    pub fn parse_state(&self) -> NavigationState {
        NavigationState::parse(&self.fragment.borrow())
    }

    /// Replaces the fragment. Subscribers are notified only when it changes.
    ///
    /// Returns whether the fragment changed.
    pub fn set_fragment(&self, fragment: &str) -> bool {
        let next = normalize(fragment);
        let changed = self.fragment.send_if_modified(|current| {
            if current.as_str() == next {
                false
            } else {
                next.clone_into(current);
                true
            }
        });
        if changed {
            debug!(fragment = %next, "Location changed");
        } else {
            trace!(fragment = %next, "Location unchanged");
        }
        changed
    }

    /// Serializes `state` into the fragment.
    ///
    /// Returns whether the fragment changed.
    pub fn navigate(&self, state: &NavigationState) -> bool {
        self.set_fragment(&state.serialize())
    }

    /// Registers a listener holding the current state.
    ///
    /// Dropping the returned handle unregisters it.
    #[must_use]
    pub fn subscribe(&self) -> StateSubscription {
        let mut receiver = self.fragment.subscribe();
        let current = NavigationState::parse(&receiver.borrow_and_update());
        StateSubscription { receiver, current }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.fragment.receiver_count()
    }
}

impl Default for HashRouter {
    fn default() -> Self {
        Self::new("")
    }
}

/// Live view of the router's state.
#[derive(Debug)]
pub struct StateSubscription {
    receiver: watch::Receiver<String>,
    current: NavigationState,
}

impl StateSubscription {
    /// State as of the last observed change.
    #[must_use]
    pub fn current(&self) -> &NavigationState {
        &self.current
    }

    /// Waits for the next fragment change and returns the re-parsed state.
    ///
    /// Several changes made before the listener wakes are observed once, as
    /// the most recent fragment. Returns `None` once the router is gone.
    pub async fn changed(&mut self) -> Option<NavigationState> {
        self.receiver.changed().await.ok()?;
        Some(self.refresh())
    }

    /// Returns the new state if the fragment changed since last observed.
    pub fn try_changed(&mut self) -> Option<NavigationState> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.refresh()),
            _ => None,
        }
    }

    fn refresh(&mut self) -> NavigationState {
        self.current = NavigationState::parse(&self.receiver.borrow_and_update());
        self.current.clone()
    }
}
