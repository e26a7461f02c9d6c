use crate::i18n::{t, tr};
use crate::paths::{HOME_SLIDES, asset_path};
use crate::router::Route;
use gloo_timers::callback::Interval;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Milliseconds each slide stays on screen.
const SLIDE_INTERVAL_MS: u32 = 2000;

const fn step(current: usize, forward: bool) -> usize {
    let total = HOME_SLIDES.len();
    if forward {
        (current + 1) % total
    } else {
        (current + total - 1) % total
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let active = use_state(|| 0_usize);

    {
        let active = active.clone();
        use_effect_with(*active, move |&current| {
            let timer = Interval::new(SLIDE_INTERVAL_MS, move || active.set(step(current, true)));
            move || drop(timer)
        });
    }

    let go = |forward: bool| {
        let active = active.clone();
        Callback::from(move |_: MouseEvent| active.set(step(*active, forward)))
    };
    let total = HOME_SLIDES.len().to_string();
    let slides = HOME_SLIDES.iter().enumerate().map(|(idx, src)| {
        let class = classes!("carousel-item", (idx == *active).then_some("active"));
        let alt = tr("home.slide", &[("n", &(idx + 1).to_string()), ("total", &total)]);
        html! {
            <div {class} aria-hidden={(idx != *active).to_string()}>
                <img src={asset_path(src)} class="d-block carousel-img" {alt} />
            </div>
        }
    });

    html! {
        <div class="main-content home">
            <div class="carousel slide" aria-roledescription="carousel" aria-label={t("home.carousel")}>
                <div class="carousel-inner" aria-live="off">{ for slides }</div>
                <button class="carousel-control-prev" type="button" onclick={go(false)}>
                    <span class="carousel-control-prev-icon" aria-hidden="true"></span>
                    <span class="visually-hidden">{ t("home.previous") }</span>
                </button>
                <button class="carousel-control-next" type="button" onclick={go(true)}>
                    <span class="carousel-control-next-icon" aria-hidden="true"></span>
                    <span class="visually-hidden">{ t("home.next") }</span>
                </button>
            </div>
            <h1 class="display-4">{ t("home.title") }</h1>
            <h2>{ t("home.subtitle") }</h2>
            <div class="d-flex flex-wrap gap-2 justify-content-center mt-3">
                <Link<Route> to={Route::Official} classes="btn btn-primary">{ t("home.cta_official") }</Link<Route>>
                <Link<Route> to={Route::Community} classes="btn btn-outline-primary">{ t("home.cta_community") }</Link<Route>>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::step;

    #[test]
    fn carousel_wraps_both_ways() {
        assert_eq!(step(0, false), 2);
        assert_eq!(step(2, true), 0);
        assert_eq!(step(1, true), 2);
    }
}
