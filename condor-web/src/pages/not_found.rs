use crate::i18n::t;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Shown for any path the router does not know.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="main-content not-found" aria-live="assertive">
            <h1>{ t("not_found.title") }</h1>
            <p>{ t("not_found.message") }</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">{ t("not_found.back") }</Link<Route>>
        </section>
    }
}
