use crate::app::routing::profile_entry;
use crate::i18n::{locales, t};
use crate::paths::{LOGO, asset_path};
use crate::router::Route;
use condor_core::SessionSnapshot;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session: SessionSnapshot,
    pub current_lang: String,
    pub on_lang_change: Callback<String>,
}

fn nav_item(route: Route, label: String, class: &'static str) -> Html {
    html! {
        <li class="nav-item">
            <Link<Route> classes={classes!(class)} to={route}>{ label }</Link<Route>>
        </li>
    }
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            cb.emit(select.value());
        })
    };
    let flags = p.session.flags;
    let options = locales().iter().map(|meta| {
        html! {
            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
        }
    });

    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <nav class="navbar navbar-expand-lg fixed-top w-100 shadow" aria-label={t("nav.label")}>
                <div class="container-fluid">
                    <Link<Route> classes="navbar-brand d-flex align-items-center" to={Route::Home}>
                        <img src={asset_path(LOGO)} alt="" width="40" height="40" class="me-2" />
                        <span class="h1 mb-0">{ t("nav.brand") }</span>
                    </Link<Route>>
                    <ul class="navbar-nav ms-auto">
                        { nav_item(Route::Home, t("nav.home"), "btn btn-lg") }
                        { nav_item(Route::About, t("nav.about"), "btn btn-lg") }
                        { nav_item(profile_entry(&p.session), t("nav.profile"), "btn btn-lg") }
                        if flags.is_admin {
                            { nav_item(Route::Admin, t("nav.admin"), "btn btn-lg btn-secondary") }
                        }
                        if flags.is_moderator {
                            { nav_item(Route::Moderator, t("nav.moderator"), "btn btn-lg btn-secondary") }
                            { nav_item(Route::AchievementManager, t("nav.manager"), "btn btn-lg btn-secondary") }
                        }
                    </ul>
                    <label for="lang-select" class="sr-only">{ t("ui.language") }</label>
                    <select id="lang-select" class="form-select form-select-sm w-auto ms-3" onchange={on_change}>
                        { for options }
                    </select>
                </div>
            </nav>
        </header>
    }
}
