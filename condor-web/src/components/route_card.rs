use crate::i18n::t;
use crate::paths::photo_url;
use crate::router::Route;
use condor_core::format::{
    difficulty_badge, format_average, format_distance, format_duration, stars,
};
use condor_core::{RouteListing, RouteSummary};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: RouteSummary,
    pub listing: RouteListing,
    /// Extra controls rendered under the card body (admin actions).
    #[prop_or_default]
    pub children: Children,
}

#[derive(Properties, PartialEq, Clone)]
pub struct StarsProps {
    pub average: f64,
}

/// Star glyphs with the numeric average, e.g. `★★★★☆ (4.3)`.
#[function_component(StarRating)]
pub fn star_rating(props: &StarsProps) -> Html {
    let label = format!("{} / 5", format_average(props.average));
    html! {
        <span class="stars" aria-label={label}>
            <span aria-hidden="true" class="text-warning">{ stars(props.average) }</span>
            <span class="ms-1 text-muted">{ format!("({})", format_average(props.average)) }</span>
        </span>
    }
}

#[function_component(RouteCard)]
pub fn route_card(props: &Props) -> Html {
    let route = &props.route;
    let cover = photo_url(route.cover().unwrap_or_default());
    let title = match route.id {
        Some(id) => html! {
            <Link<Route> classes="stretched-link text-decoration-none" to={Route::detail(props.listing, id)}>
                { route.nombre.clone() }
            </Link<Route>>
        },
        None => html! { <>{ route.nombre.clone() }</> },
    };

    html! {
        <article class="h-100">
            <div class="card h-100 shadow-sm route-card">
                <img src={cover} class="card-img-top" alt={route.nombre.clone()} loading="lazy" />
                <div class="card-body">
                    <h3 class="h5 card-title">{ title }</h3>
                    <div class="d-flex flex-wrap gap-2 mb-2">
                        if let Some(dificultad) = route.dificultad.clone() {
                            <span class={difficulty_badge(&dificultad)}>{ dificultad }</span>
                        }
                        if let Some(region) = route.region.clone() {
                            <span class="badge bg-light text-dark">{ region }</span>
                        }
                    </div>
                    <StarRating average={route.average} />
                    <p class="card-text small mb-1">
                        <strong>{ format!("{}: ", t("routes.distance")) }</strong>
                        { format_distance(route.distancia) }
                        <span class="mx-2">{ "·" }</span>
                        <strong>{ format!("{}: ", t("routes.duration")) }</strong>
                        { format_duration(route.tiempo_segundos) }
                    </p>
                    <p class="card-text">{ route.descripcion.clone() }</p>
                </div>
                if !props.children.is_empty() {
                    <div class="card-footer d-flex gap-2 position-relative">
                        { for props.children.iter() }
                    </div>
                }
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn stars_show_rounded_glyphs_and_average() {
        let html = block_on(
            LocalServerRenderer::<StarRating>::with_props(StarsProps { average: 3.6 }).render(),
        );
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("(3.6)"));
    }
}
