//! Shared harness for the server-side render tests.
#![allow(dead_code)]

use condor_core::mock::MockBackend;
use condor_core::{ApiConfig, MemoryStore, Services};
use condor_web::app::AppContext;
use futures::executor::block_on;
use serde_json::{Value, json};
use std::rc::Rc;
use yew::prelude::*;
use yew::LocalServerRenderer;
use yew_router::history::{AnyHistory, MemoryHistory};
use yew_router::Router;

pub struct Harness {
    pub mock: Rc<MockBackend>,
    pub store: Rc<MemoryStore>,
    pub services: Services,
}

impl Harness {
    pub fn new() -> Self {
        let mock = Rc::new(MockBackend::new());
        let store = Rc::new(MemoryStore::new());
        let services = Services::new(
            ApiConfig::uniform("http://backend.test"),
            mock.clone(),
            store.clone(),
        );
        Self {
            mock,
            store,
            services,
        }
    }

    /// Cache `profile` and open a session for its `correo`.
    pub fn sign_in(&self, profile: &Value) {
        self.services.session.cache_profile(profile);
        self.services
            .session
            .start_session(profile["correo"].as_str().unwrap_or("ana@condor.cl"));
    }

    pub fn context(&self) -> AppContext {
        AppContext::new(self.services.clone(), Callback::noop())
    }

    /// Render `page` inside a memory router at `path` with this harness as context.
    pub fn render_at(&self, path: &str, page: Html) -> String {
        let props = HostProps {
            path: AttrValue::from(path.to_string()),
            context: self.context(),
            children: page,
        };
        block_on(LocalServerRenderer::<Host>::with_props(props).render())
    }

    pub fn render(&self, page: Html) -> String {
        self.render_at("/", page)
    }
}

/// Opening tag of the first `<button>` whose text contains `label`.
pub fn button_tag<'a>(html: &'a str, label: &str) -> Option<&'a str> {
    html.match_indices("<button").find_map(|(start, _)| {
        let rest = &html[start..];
        let open_end = rest.find('>')?;
        let close = rest.find("</button>")?;
        rest[open_end..close]
            .contains(label)
            .then(|| &rest[..=open_end])
    })
}

pub fn is_disabled(html: &str, label: &str) -> bool {
    button_tag(html, label).is_some_and(|tag| tag.contains("disabled"))
}

pub fn member(id: i64, role: i64) -> Value {
    json!({
        "id": id,
        "nombre": "Ana",
        "correo": "ana@condor.cl",
        "idRol": role,
        "rutasRecorridas": 4
    })
}

#[derive(Properties, PartialEq)]
pub struct HostProps {
    pub path: AttrValue,
    pub context: AppContext,
    pub children: Html,
}

#[function_component(Host)]
pub fn host(props: &HostProps) -> Html {
    let history = use_memo(props.path.clone(), |path| {
        AnyHistory::from(MemoryHistory::with_entries(vec![path.to_string()]))
    });
    html! {
        <Router history={(*history).clone()}>
            <ContextProvider<AppContext> context={props.context.clone()}>
                { props.children.clone() }
            </ContextProvider<AppContext>>
        </Router>
    }
}
