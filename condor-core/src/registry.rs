//! Locally remembered accounts, used to reject an already-registered email before the
//! backend is asked.

use crate::storage::{KeyValueStore, keys, read_json, write_json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnownUser {
    #[serde(alias = "nombre")]
    pub username: String,
    #[serde(alias = "correo")]
    pub email: String,
}

/// View over the `usuarios` key.
pub struct KnownUsers<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> KnownUsers<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Every decodable entry; malformed entries are skipped.
    #[must_use]
    pub fn all(&self) -> Vec<KnownUser> {
        read_json::<Vec<serde_json::Value>>(self.store, keys::KNOWN_USERS)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }

    #[must_use]
    pub fn contains_email(&self, email: &str) -> bool {
        let wanted = email.trim();
        !wanted.is_empty()
            && self
                .all()
                .iter()
                .any(|user| user.email.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn add(&self, user: KnownUser) {
        let mut users = self.all();
        users.push(user);
        write_json(self.store, keys::KNOWN_USERS, &users);
    }

    /// Forget `email`. Returns whether an entry was removed.
    pub fn remove_email(&self, email: &str) -> bool {
        let wanted = email.trim();
        let mut users = self.all();
        let before = users.len();
        users.retain(|user| !user.email.trim().eq_ignore_ascii_case(wanted));
        let removed = users.len() != before;
        if removed {
            write_json(self.store, keys::KNOWN_USERS, &users);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn tolerant_decode_accepts_both_spellings() {
        let store = MemoryStore::with_entries([(
            keys::KNOWN_USERS,
            r#"[{"nombre":"Ana","correo":"Ana@Mail.com"},{"username":"Leo","email":"leo@mail.com"},42]"#,
        )]);
        let users = KnownUsers::new(&store);
        assert_eq!(users.all().len(), 2);
        assert!(users.contains_email("ana@mail.com"));
        assert!(users.contains_email(" LEO@mail.com "));
        assert!(!users.contains_email("otro@mail.com"));
    }

    #[test]
    fn add_appends_and_persists() {
        let store = MemoryStore::new();
        let users = KnownUsers::new(&store);
        users.add(KnownUser {
            username: "Nuevo".into(),
            email: "nuevo@a.com".into(),
        });
        assert!(users.contains_email("nuevo@a.com"));
        assert!(store.get(keys::KNOWN_USERS).is_some_and(|raw| raw.contains("nuevo@a.com")));
    }

    #[test]
    fn garbage_reads_as_empty() {
        let store = MemoryStore::with_entries([(keys::KNOWN_USERS, "not json")]);
        assert!(KnownUsers::new(&store).all().is_empty());
    }
}
