//! Shared handle every page reads through [`use_app_context`].

use crate::storage::BrowserStore;
use crate::transport::FetchTransport;
use condor_core::{ApiConfig, ApiError, Notice, Services, SessionSnapshot};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub services: Services,
    /// Session as last published by the session context.
    pub session: SessionSnapshot,
    pub notify: Callback<Notice>,
}

impl AppContext {
    #[must_use]
    pub fn new(services: Services, notify: Callback<Notice>) -> Self {
        let session = services.session.snapshot();
        Self {
            services,
            session,
            notify,
        }
    }

    /// Services over `fetch` and `localStorage`, as used by the running app.
    #[must_use]
    pub fn browser_services() -> Services {
        Services::new(
            ApiConfig::from_env(),
            Rc::new(FetchTransport::new()),
            Rc::new(BrowserStore::new()),
        )
    }

    /// Context for a page rendered outside the shell; notices only reach the log.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(
            Self::browser_services(),
            Callback::from(|notice: Notice| log::info!("notice: {}", notice.text)),
        )
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify.emit(Notice::success(text));
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify.emit(Notice::info(text));
    }

    pub fn danger(&self, text: impl Into<String>) {
        self.notify.emit(Notice::danger(text));
    }

    /// Banner for a failed primary request.
    pub fn report(&self, err: &ApiError) {
        self.notify.emit(Notice::from_error(err));
    }
}

#[hook]
pub fn use_app_context() -> AppContext {
    let provided = use_context::<AppContext>();
    let detached = use_memo((), |()| AppContext::detached());
    provided.unwrap_or_else(|| (*detached).clone())
}
