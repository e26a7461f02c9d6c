use std::rc::Rc;

use condor_core::mock::MockBackend;
use condor_core::{ApiConfig, MemoryStore, Services};
use serde_json::Value;

pub const BACKEND: &str = "http://backend.test";

/// Services wired to a scripted backend and an in-memory store.
pub struct Fixture {
    pub mock: Rc<MockBackend>,
    pub store: Rc<MemoryStore>,
    pub services: Services,
}

impl Fixture {
    pub fn new() -> Self {
        let mock = Rc::new(MockBackend::new());
        let store = Rc::new(MemoryStore::new());
        let services = Services::new(ApiConfig::uniform(BACKEND), mock.clone(), store.clone());
        Self {
            mock,
            store,
            services,
        }
    }

    /// Open a session for `profile` without going through the login flow.
    pub fn sign_in(&self, profile: &Value) {
        let session = &self.services.session;
        session.cache_profile(profile);
        session.start_session(profile["correo"].as_str().unwrap_or_default());
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
