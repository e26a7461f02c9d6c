use crate::a11y::{STATUS_REGION_ID, visible_focus_css};
use crate::app::context::AppContext;
use crate::app::routing;
use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::notification::Notification;
use crate::pages;
use crate::router::Route;
use condor_core::RouteListing;
use yew::prelude::*;
use yew_router::prelude::Redirect;

/// Page for an already-authorised route.
pub fn render_main_view(route: &Route) -> Html {
    match route {
        Route::Home => html! { <pages::home::HomePage /> },
        Route::About => html! { <pages::about::AboutPage /> },
        Route::Help => html! { <pages::help::HelpPage /> },
        Route::Contact => html! { <pages::contact::ContactPage /> },
        Route::Login => html! { <pages::login::LoginPage /> },
        Route::Register => html! { <pages::register::RegisterPage /> },
        Route::Profile => html! { <pages::profile::ProfilePage /> },
        Route::Settings => html! { <pages::settings::SettingsPage /> },
        Route::Official => html! {
            <pages::route_list::RouteListPage listing={RouteListing::Official} />
        },
        Route::Community => html! {
            <pages::route_list::RouteListPage listing={RouteListing::Community} />
        },
        Route::RouteDetail { tipo, id } => html! {
            <pages::route_detail::RouteDetailPage
                listing={RouteListing::from_segment(tipo)}
                id={*id}
            />
        },
        Route::Admin => html! { <pages::admin_panel::AdminPanelPage /> },
        Route::Moderator => html! { <pages::moderator_panel::ModeratorPanelPage /> },
        Route::AchievementManager => html! {
            <pages::achievement_manager::AchievementManagerPage />
        },
        Route::MyAchievements => html! { <pages::my_achievements::MyAchievementsPage /> },
        Route::NotFound => html! { <pages::not_found::NotFound /> },
    }
}

pub fn render_app(state: &AppState, route: Option<&Route>) -> Html {
    let context: AppContext = state.context();
    let requested = route.cloned().unwrap_or(Route::NotFound);
    let main_view = match routing::guard(&requested, &context.session) {
        Some(target) => {
            log::info!("{requested:?} is not available here, showing {target:?}");
            html! { <Redirect<Route> to={target} /> }
        }
        None => render_main_view(&requested),
    };

    html! {
        <ContextProvider<AppContext> context={context.clone()}>
            <Header
                session={context.session.clone()}
                current_lang={(*state.current_language).clone()}
                on_lang_change={state.lang_change()}
            />
            <Notification notice={(*state.notice).clone()} on_dismiss={state.dismiss()} />
            <main id="main" role="main" tabindex="-1">
                <style>{ visible_focus_css() }</style>
                <div id={STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
                { main_view }
            </main>
            <Footer />
        </ContextProvider<AppContext>>
    }
}
