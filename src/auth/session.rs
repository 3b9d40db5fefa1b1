//! Session state container, owned by the app and updated by the SDK.
//!
//! Holds the signed-in user and loading flag. Observers subscribe to
//! [`SessionEvent`]s; a [`SessionEvent::Expired`] is the signal to send the
//! user back to the login screen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::{User, UserUpdate};

/// A change to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(User),
    LoggedOut,
    /// Token refresh failed; credentials were cleared.
    Expired,
    UserUpdated(User),
    LoadingChanged(bool),
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Debug, Clone)]
struct SessionState {
    user: Option<User>,
    is_loading: bool,
}

/// Current user + loading state with change subscriptions.
pub struct SessionStore {
    state: RwLock<SessionState>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            state: RwLock::new(SessionState {
                user: None,
                is_loading: true,
            }),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("SessionStore")
            .field("user", &state.user)
            .field("is_loading", &state.is_loading)
            .finish()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user.as_ref().map(|u| u.id.clone())
    }

    pub fn email(&self) -> Option<String> {
        self.read().user.as_ref().map(|u| u.email.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    /// Replace the current user without emitting a login/logout event.
    pub fn set_user(&self, user: Option<User>) {
        self.write().user = user;
    }

    pub fn set_loading(&self, loading: bool) {
        self.write().is_loading = loading;
        self.emit(&SessionEvent::LoadingChanged(loading));
    }

    pub fn login(&self, user: User) {
        {
            let mut state = self.write();
            state.user = Some(user.clone());
            state.is_loading = false;
        }
        self.emit(&SessionEvent::LoggedIn(user));
    }

    pub fn logout(&self) {
        self.reset();
        self.emit(&SessionEvent::LoggedOut);
    }

    /// Drop the session after an irrecoverable auth failure.
    pub fn expire(&self) {
        self.reset();
        self.emit(&SessionEvent::Expired);
    }

    /// Merge a partial update into the current user. No-op when signed out.
    pub fn update_user(&self, update: UserUpdate) {
        let updated = {
            let mut state = self.write();
            match state.user.as_mut() {
                Some(user) => {
                    update.apply_to(user);
                    user.clone()
                }
                None => return,
            }
        };
        self.emit(&SessionEvent::UserUpdated(updated));
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn reset(&self) {
        let mut state = self.write();
        state.user = None;
        state.is_loading = false;
    }

    fn emit(&self, event: &SessionEvent) {
        // Listeners run outside the lock so they may call back into the store.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
