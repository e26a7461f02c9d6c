use crate::app::use_app_context;
use crate::components::route_card::RouteCard;
use crate::i18n::{t, tr};
use crate::router::Route;
use condor_core::{RouteListing, RouteSummary};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub listing: RouteListing,
}

#[derive(Clone, PartialEq)]
enum Listing {
    Loading,
    Ready(Vec<RouteSummary>),
    Failed(String),
}

fn headings(listing: RouteListing) -> (String, String) {
    match listing {
        RouteListing::Official => (t("routes.official_title"), t("routes.official_subtitle")),
        RouteListing::Community => (t("routes.community_title"), t("routes.community_subtitle")),
    }
}

/// Public directory of official or community routes.
#[function_component(RouteListPage)]
pub fn route_list_page(props: &Props) -> Html {
    let ctx = use_app_context();
    let state = use_state(|| Listing::Loading);

    {
        let state = state.clone();
        let services = ctx.services.clone();
        use_effect_with(props.listing, move |&listing| {
            state.set(Listing::Loading);
            spawn_local(async move {
                match listing.load(&services).await {
                    Ok(routes) => state.set(Listing::Ready(routes)),
                    Err(err) => {
                        log::error!("{} listing failed: {err}", listing.segment());
                        state.set(Listing::Failed(err.user_message()));
                    }
                }
            });
            || {}
        });
    }

    let (title, subtitle) = headings(props.listing);
    let body = match &*state {
        Listing::Loading => html! { <div class="routes-loading" role="status">{ t("routes.loading") }</div> },
        Listing::Failed(message) => html! { <div class="text-danger" role="alert">{ message.clone() }</div> },
        Listing::Ready(routes) if routes.is_empty() => html! { <p class="text-muted">{ t("routes.empty") }</p> },
        Listing::Ready(routes) => html! {
            <>
                <p class="routes-count text-muted">
                    { tr("routes.count", &[("count", &routes.len().to_string())]) }
                </p>
                <div class="row g-3 route-grid">
                    { for routes.iter().map(|route| html! {
                        <div class="col-12 col-md-6 col-lg-4" key={route.id.unwrap_or_default().to_string()}>
                            <RouteCard route={route.clone()} listing={props.listing} />
                        </div>
                    }) }
                </div>
            </>
        },
    };

    html! {
        <div class="main-content container py-4 route-list">
            <header class="mb-3">
                <h1 class="display-5">{ title }</h1>
                <h2 class="h5 text-secondary">{ subtitle }</h2>
            </header>
            { body }
            <Link<Route> to={Route::Home} classes="btn btn-secondary mt-4">{ t("ui.back_home") }</Link<Route>>
        </div>
    }
}
