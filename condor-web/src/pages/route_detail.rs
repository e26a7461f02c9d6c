use crate::app::use_app_context;
use crate::components::rating::RatingControl;
use crate::components::route_card::StarRating;
use crate::i18n::{fmt_date_iso, t, tr};
use crate::paths::photo_url;
use crate::router::Route;
use condor_core::format::{difficulty_badge, format_distance, format_duration};
use condor_core::{RouteListing, RouteSummary};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub listing: RouteListing,
    pub id: i64,
}

#[derive(Clone, PartialEq)]
enum Detail {
    Loading,
    Ready(Box<RouteSummary>),
    Missing,
    Failed(String),
}

#[derive(Properties, PartialEq)]
struct GalleryProps {
    fotos: Vec<String>,
    nombre: AttrValue,
}

#[function_component(Gallery)]
fn gallery(props: &GalleryProps) -> Html {
    let active = use_state(|| 0_usize);
    let total = props.fotos.len();
    if total == 0 {
        return html! {
            <img class="d-block w-100 detail-img" src={photo_url("")} alt={props.nombre.clone()} />
        };
    }
    let go = |forward: bool| {
        let active = active.clone();
        Callback::from(move |_: MouseEvent| {
            let next = if forward { (*active + 1) % total } else { (*active + total - 1) % total };
            active.set(next);
        })
    };
    let current = (*active).min(total - 1);
    let total_label = total.to_string();
    let slides = props.fotos.iter().enumerate().map(|(idx, src)| {
        let class = classes!("carousel-item", (idx == current).then_some("active"));
        let alt = format!(
            "{} · {}",
            props.nombre,
            tr("routes.photo", &[("n", &(idx + 1).to_string()), ("total", &total_label)])
        );
        html! {
            <div {class}>
                <img class="d-block w-100 detail-img" src={photo_url(src)} {alt} />
            </div>
        }
    });
    html! {
        <div class="carousel slide mb-3" aria-roledescription="carousel">
            <div class="carousel-inner">{ for slides }</div>
            if total > 1 {
                <button class="carousel-control-prev" type="button" onclick={go(false)}>
                    <span class="carousel-control-prev-icon" aria-hidden="true"></span>
                    <span class="visually-hidden">{ t("home.previous") }</span>
                </button>
                <button class="carousel-control-next" type="button" onclick={go(true)}>
                    <span class="carousel-control-next-icon" aria-hidden="true"></span>
                    <span class="visually-hidden">{ t("home.next") }</span>
                </button>
            }
        </div>
    }
}

fn fact(label: String, value: String) -> Html {
    html! {
        <li class="list-group-item d-flex justify-content-between">
            <span class="fw-semibold">{ label }</span>
            <span>{ value }</span>
        </li>
    }
}

/// One route: photos, facts, map and the rating control.
#[function_component(RouteDetailPage)]
pub fn route_detail_page(props: &Props) -> Html {
    let ctx = use_app_context();
    let detail = use_state(|| Detail::Loading);
    let average = use_state(|| None::<f64>);
    let refresh = use_state(|| 0_u32);

    {
        let detail = detail.clone();
        let ctx = ctx.clone();
        use_effect_with(props.id, move |&id| {
            detail.set(Detail::Loading);
            spawn_local(async move {
                match RouteSummary::load(&ctx.services, id).await {
                    Ok(summary) => detail.set(Detail::Ready(Box::new(summary))),
                    Err(err) if err.status() == Some(404) => {
                        log::warn!("route {id} not found");
                        detail.set(Detail::Missing);
                    }
                    Err(err) => {
                        log::error!("route {id} detail failed: {err}");
                        ctx.report(&err);
                        detail.set(Detail::Failed(err.user_message()));
                    }
                }
            });
            || {}
        });
    }
    {
        let average = average.clone();
        let calificaciones = ctx.services.calificaciones.clone();
        use_effect_with((props.id, *refresh), move |&(id, _)| {
            spawn_local(async move {
                match calificaciones.average(id).await {
                    Ok(value) => average.set(Some(value)),
                    Err(err) => log::warn!("average for route {id} unavailable: {err}"),
                }
            });
            || {}
        });
    }

    let on_rated = {
        let refresh = refresh.clone();
        Callback::from(move |()| refresh.set(refresh.wrapping_add(1)))
    };
    let back = html! {
        <Link<Route> to={Route::listing(props.listing)} classes="btn btn-secondary">{ t("routes.back") }</Link<Route>>
    };

    let route = match &*detail {
        Detail::Loading => {
            return html! {
                <div class="main-content container py-4" role="status">{ t("ui.loading") }</div>
            };
        }
        Detail::Missing => {
            return html! {
                <div class="main-content container py-4 route-missing">
                    <h1 class="h2">{ t("routes.not_found") }</h1>
                    { back }
                </div>
            };
        }
        Detail::Failed(message) => {
            return html! {
                <div class="main-content container py-4 route-failed">
                    <div class="text-danger mb-3" role="alert">{ message.clone() }</div>
                    { back }
                </div>
            };
        }
        Detail::Ready(route) => route,
    };

    let score = (*average).unwrap_or(route.average);
    let badges = route
        .dificultad
        .iter()
        .map(|name| html! { <span class={difficulty_badge(name)}>{ name.clone() }</span> })
        .chain(route.region.iter().map(|name| html! { <span class="badge bg-info text-dark">{ name.clone() }</span> }));
    let published = route
        .published_on
        .as_deref()
        .map_or_else(|| "-".to_string(), fmt_date_iso);

    html! {
        <div class="main-content container py-4 route-detail">
            <div class="mb-3">{ back }</div>
            <article class="card">
                <div class="card-body">
                    <header class="d-flex flex-wrap align-items-center gap-2 mb-3">
                        <h1 class="h2 mb-0 me-2">{ route.nombre.clone() }</h1>
                        { for badges }
                        <div class="ms-auto"><StarRating average={score} /></div>
                    </header>
                    <Gallery fotos={route.fotos.clone()} nombre={route.nombre.clone()} />
                    <ul class="list-group list-group-flush mb-3">
                        { fact(t("routes.distance"), format_distance(route.distancia)) }
                        { fact(t("routes.duration"), format_duration(route.tiempo_segundos)) }
                        { fact(t("routes.published"), published) }
                    </ul>
                    <section class="mb-3">
                        <h2 class="h5">{ t("routes.description") }</h2>
                        <p>{ route.descripcion.clone() }</p>
                    </section>
                    <section>
                        <h2 class="h5">{ t("routes.start") }</h2>
                        <div class="ratio ratio-16x9">
                            <iframe
                                title={t("routes.map_title")}
                                src={route.maps_embed_url()}
                                loading="lazy"
                                referrerpolicy="no-referrer-when-downgrade"
                            />
                        </div>
                    </section>
                </div>
            </article>
            if let Some(id) = route.id {
                <RatingControl ruta_id={id} {on_rated} />
            }
        </div>
    }
}
