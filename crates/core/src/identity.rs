//! Identity resolution.
//!
//! The auth collaborator owns sign-in; this crate only observes who the
//! current shopper is. [`Identity::Loading`] means auth has not settled yet
//! and nothing may be read or written on its behalf.

use core::fmt;

use crate::signal::{Listeners, SubscriptionId};
use crate::types::UserId;

/// Who the collections currently belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    /// Auth has not resolved yet.
    #[default]
    Loading,
    /// Resolved, nobody signed in.
    Guest,
    /// Resolved to a signed-in user.
    User(UserId),
}

impl Identity {
    /// Whether auth has resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// Shorthand for `Identity::User(UserId::new(id))`.
    #[must_use]
    pub fn user(id: impl Into<UserId>) -> Self {
        Self::User(id.into())
    }
}

impl From<Option<UserId>> for Identity {
    /// A resolved session: `Some` is a signed-in user, `None` a guest.
    fn from(user: Option<UserId>) -> Self {
        user.map_or(Self::Guest, Self::User)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::Guest => f.write_str("guest"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// Source of the current identity. Reads have no side effects.
pub trait IdentityResolver {
    fn identity(&self) -> Identity;
}

impl IdentityResolver for Identity {
    fn identity(&self) -> Identity {
        self.clone()
    }
}

/// Observable identity cell fed by the auth collaborator.
///
/// [`AuthState::set`] notifies subscribers only when the identity actually
/// changes, so hosts can wire it straight to
/// [`CollectionStore::sync_identity`](crate::collection::CollectionStore::sync_identity).
#[derive(Debug, Default)]
pub struct AuthState {
    current: Identity,
    listeners: Listeners<Identity>,
}

impl AuthState {
    /// A cell that starts in [`Identity::Loading`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new identity. Returns `true` if it differed from the old one.
    pub fn set(&mut self, identity: Identity) -> bool {
        if self.current == identity {
            return false;
        }
        tracing::debug!(from = %self.current, to = %identity, "identity changed");
        self.current = identity;
        self.listeners.emit(&self.current);
        true
    }

    /// Subscribe to identity changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&Identity) + 'static) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    /// Drop an identity subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl IdentityResolver for AuthState {
    fn identity(&self) -> Identity {
        self.current.clone()
    }
}
