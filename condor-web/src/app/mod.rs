use crate::router::Route;
use condor_core::Services;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod context;
pub mod routing;
pub mod session;
pub mod state;
pub mod view;

pub use context::{AppContext, use_app_context};

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[derive(Properties, PartialEq, Clone, Default)]
pub struct AppInnerProps {
    /// Replaces the browser-backed services (tests, embedding).
    #[prop_or_default]
    pub services: Option<Services>,
}

#[function_component(AppInner)]
pub fn app_inner(props: &AppInnerProps) -> Html {
    let app_state = state::use_app_state(props.services.clone());
    session::use_session_flags(&app_state.services, app_state.session.clone());

    let route = use_route::<Route>();
    #[cfg(target_arch = "wasm32")]
    routing::use_scroll_to_top(route.clone());
    routing::use_clear_notice_on_navigation(route.clone(), app_state.notice.clone());

    view::render_app(&app_state, route.as_ref())
}
