use crate::app::use_app_context;
use crate::i18n::t;
use crate::router::Route;
use condor_core::forms::achievement::{fill_template, format_threshold};
use condor_core::models::Trofeo;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Condition line for an earned trophy, threshold filled in.
fn condition_text(trofeo: &Trofeo) -> String {
    let value = trofeo.restriccion.map(format_threshold).unwrap_or_default();
    if trofeo.condicion_template.trim().is_empty() {
        value
    } else {
        fill_template(&trofeo.condicion_template, &value)
    }
}

#[function_component(MyAchievementsPage)]
pub fn my_achievements_page() -> Html {
    let ctx = use_app_context();
    let trofeos = use_state(Vec::<Trofeo>::new);
    let loading = use_state(|| false);
    let round = use_state(|| 0_u32);
    let user_id = ctx.services.session.user_id();

    {
        let trofeos = trofeos.clone();
        let loading = loading.clone();
        let logros = ctx.services.logros.clone();
        use_effect_with((user_id, *round), move |&(user_id, _)| {
            match user_id {
                Some(id) => {
                    loading.set(true);
                    spawn_local(async move {
                        match logros.trofeos(id).await {
                            Ok(list) => trofeos.set(list),
                            Err(err) => {
                                log::warn!("trophies for user {id} unavailable: {err}");
                                trofeos.set(Vec::new());
                            }
                        }
                        loading.set(false);
                    });
                }
                None => log::warn!("trophies requested without a user in session"),
            }
            || {}
        });
    }

    let reload = {
        let round = round.clone();
        Callback::from(move |_: MouseEvent| round.set(round.wrapping_add(1)))
    };

    let cards = trofeos.iter().enumerate().map(|(idx, trofeo)| {
        let key = trofeo
            .id
            .or(trofeo.id_logro)
            .map_or_else(|| format!("t-{idx}"), |id| id.to_string());
        html! {
            <div {key} class="card p-3 trophy">
                <strong class="trophy-name">{ trofeo.nombre.clone() }</strong>
                <div class="text-muted">{ trofeo.descripcion.clone() }</div>
                <div class="mt-1 fst-italic">{ condition_text(trofeo) }</div>
            </div>
        }
    });

    html! {
        <div class="main-content container py-4 my-achievements">
            <h1>{ t("achievements.title") }</h1>
            <div class="my-3 d-flex gap-2 align-items-center">
                <Link<Route> to={Route::Profile} classes="btn btn-link">{ t("achievements.back") }</Link<Route>>
                <button type="button" class="btn btn-condor" onclick={reload}>{ t("ui.reload") }</button>
            </div>
            if *loading {
                <div role="status">{ t("ui.loading") }</div>
            } else if trofeos.is_empty() {
                <div class="card p-3">{ t("achievements.empty") }</div>
            }
            <div class="d-flex flex-column gap-3">{ for cards }</div>
        </div>
    }
}
