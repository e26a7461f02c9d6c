use crate::app::context::AppContext;
use condor_core::{Notice, Services, SessionSnapshot};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub services: Rc<Services>,
    pub session: UseStateHandle<SessionSnapshot>,
    pub notice: UseStateHandle<Option<Notice>>,
    pub current_language: UseStateHandle<String>,
}

/// Shell state. `services` replaces the browser-backed services when given.
#[hook]
pub fn use_app_state(services: Option<Services>) -> AppState {
    let services = use_memo((), move |()| services.unwrap_or_else(AppContext::browser_services));
    let session = {
        let services = Rc::clone(&services);
        use_state(move || services.session.snapshot())
    };
    AppState {
        services,
        session,
        notice: use_state(|| None::<Notice>),
        current_language: use_state(crate::i18n::current_lang),
    }
}

impl AppState {
    #[must_use]
    pub fn notify(&self) -> Callback<Notice> {
        let notice = self.notice.clone();
        Callback::from(move |next: Notice| {
            log::debug!("notice ({:?}): {}", next.kind, next.text);
            notice.set(Some(next));
        })
    }

    #[must_use]
    pub fn dismiss(&self) -> Callback<()> {
        let notice = self.notice.clone();
        Callback::from(move |()| notice.set(None))
    }

    #[must_use]
    pub fn lang_change(&self) -> Callback<String> {
        let current = self.current_language.clone();
        Callback::from(move |lang: String| {
            crate::i18n::set_lang(&lang);
            current.set(crate::i18n::current_lang());
        })
    }

    #[must_use]
    pub fn context(&self) -> AppContext {
        AppContext {
            services: (*self.services).clone(),
            session: (*self.session).clone(),
            notify: self.notify(),
        }
    }
}
