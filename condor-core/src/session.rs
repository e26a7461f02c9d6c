//! Session context.
//!
//! One shared [`SessionContext`] is handed to every part of the UI that needs the
//! signed-in identity. Changes are pushed to subscribers synchronously; changes made by
//! another tab arrive through [`SessionContext::handle_external_change`].

use crate::role::{self, RoleFlags};
use crate::storage::{KeyValueStore, keys, read_json, write_json};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Derived view of the persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub active: bool,
    pub email: Option<String>,
    pub flags: RoleFlags,
}

type Listener = Rc<dyn Fn(&SessionSnapshot)>;

struct Inner {
    store: Rc<dyn KeyValueStore>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_id: Cell<usize>,
}

#[derive(Clone)]
pub struct SessionContext {
    inner: Rc<Inner>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    inner: Weak<Inner>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Persist the signed-in identity and raise the active flag.
    pub fn start_session(&self, email: &str) {
        let store = self.store();
        store.set(keys::CURRENT_EMAIL, email.trim());
        store.set(keys::SESSION_ACTIVE, "true");
        log::info!("session started for {}", email.trim());
        self.notify();
    }

    /// Forget the identity, cached profile and token, then tell every subscriber.
    pub fn end_session(&self) {
        let store = self.store();
        store.remove(keys::CURRENT_EMAIL);
        store.set(keys::SESSION_ACTIVE, "false");
        store.remove(keys::CACHED_PROFILE);
        store.remove(keys::TOKEN);
        log::info!("session ended");
        self.notify();
    }

    #[must_use]
    pub fn is_session_active(&self) -> bool {
        self.store()
            .get(keys::SESSION_ACTIVE)
            .is_some_and(|flag| flag.trim() == "true")
    }

    #[must_use]
    pub fn current_email(&self) -> Option<String> {
        self.store()
            .get(keys::CURRENT_EMAIL)
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
    }

    #[must_use]
    pub fn cached_profile(&self) -> Option<Value> {
        read_json::<Value>(self.store(), keys::CACHED_PROFILE).filter(Value::is_object)
    }

    pub fn cache_profile(&self, profile: &Value) {
        write_json(self.store(), keys::CACHED_PROFILE, profile);
        self.notify();
    }

    pub fn store_token(&self, token: &str) {
        self.store().set(keys::TOKEN, token);
    }

    /// Keep the stored email and the cached profile in step after a profile edit.
    pub fn update_identity(&self, email: Option<&str>, name: Option<&str>) {
        if let Some(email) = email {
            self.store().set(keys::CURRENT_EMAIL, email.trim());
        }
        if let Some(mut profile) = self.cached_profile() {
            if let Some(email) = email {
                profile["correo"] = Value::String(email.trim().to_string());
            }
            if let Some(name) = name {
                profile["nombre"] = Value::String(name.trim().to_string());
            }
            write_json(self.store(), keys::CACHED_PROFILE, &profile);
        }
        self.notify();
    }

    pub fn update_email(&self, email: &str) {
        self.update_identity(Some(email), None);
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.cached_profile().as_ref().and_then(role::user_id)
    }

    #[must_use]
    pub fn role_header(&self) -> Option<String> {
        self.cached_profile().as_ref().and_then(role::role_header)
    }

    #[must_use]
    pub fn role_flags(&self) -> RoleFlags {
        RoleFlags::derive(
            self.is_session_active(),
            self.store().get(keys::CACHED_PROFILE).as_deref(),
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let active = self.is_session_active();
        SessionSnapshot {
            active,
            email: if active { self.current_email() } else { None },
            flags: self.role_flags(),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionSnapshot) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// React to a storage mutation made elsewhere. `None` means the store was cleared.
    ///
    /// Returns whether subscribers were notified.
    pub fn handle_external_change(&self, key: Option<&str>) -> bool {
        let relevant = key.is_none_or(|key| keys::SESSION_KEYS.contains(&key));
        if relevant {
            log::debug!("session keys changed in another tab: {key:?}");
            self.notify();
        }
        relevant
    }

    pub fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
