use crate::i18n::t;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Link;

fn topic(title_key: &str, body_key: &str) -> Html {
    html! {
        <section class="help-topic mt-3">
            <h2 class="h5"><strong>{ t(title_key) }</strong></h2>
            <p>{ t(body_key) }</p>
        </section>
    }
}

#[function_component(HelpPage)]
pub fn help_page() -> Html {
    html! {
        <div class="main-content help">
            <div class="card help-card">
                <div class="card-body">
                    <h1 class="h2">{ t("help.title") }</h1>
                    { topic("help.what_title", "help.what") }
                    { topic("help.explore_title", "help.explore") }
                    { topic("help.participate_title", "help.participate") }
                    <p class="mt-3 mb-2">{ t("help.more") }</p>
                    <div class="d-flex gap-2">
                        <Link<Route> to={Route::Home} classes="btn-condor-links">{ t("ui.back_home") }</Link<Route>>
                        <Link<Route> to={Route::Contact} classes="btn-condor-links">{ t("nav.contact") }</Link<Route>>
                    </div>
                </div>
            </div>
        </div>
    }
}
