use crate::app::use_app_context;
use crate::components::field::{select_value, textarea_value};
use crate::i18n::{t, tr};
use crate::router::Route;
use condor_core::rating::{
    LOGIN_PROMPT, MAX_SCORE, MIN_SCORE, RatingAccess, RatingDraft, RatingGate,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub ruta_id: i64,
    /// Fired after a rating was stored so the page can refresh the average.
    #[prop_or_default]
    pub on_rated: Callback<()>,
}

#[function_component(RatingControl)]
pub fn rating_control(props: &Props) -> Html {
    let ctx = use_app_context();
    let access = RatingAccess::from_session(&ctx.services.session);
    let gate = use_state(RatingGate::default);
    let draft = use_state(|| RatingDraft {
        puntuacion: MAX_SCORE,
        comentario: String::new(),
    });

    {
        let gate = gate.clone();
        let calificaciones = ctx.services.calificaciones.clone();
        use_effect_with((access, props.ruta_id), move |&(access, ruta)| {
            if let RatingAccess::Member(usuario) = access {
                spawn_local(async move {
                    gate.set(RatingGate::check(&calificaciones, usuario, ruta).await);
                });
            }
            || {}
        });
    }

    let RatingAccess::Member(usuario) = access else {
        return html! {
            <section class="rating card mt-4" aria-labelledby="rating-title">
                <div class="card-body">
                    <h2 id="rating-title" class="h5">{ t("rating.title") }</h2>
                    <p class="text-muted mb-2">{ LOGIN_PROMPT }</p>
                    <Link<Route> to={Route::Login} classes="btn btn-outline-primary btn-sm">
                        { t("rating.login") }
                    </Link<Route>>
                </div>
            </section>
        };
    };

    let on_score = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            if let Ok(score) = select_value(&e).parse::<u8>() {
                let mut next = (*draft).clone();
                next.puntuacion = score;
                draft.set(next);
            }
        })
    };
    let on_comment = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            next.comentario = textarea_value(&e);
            draft.set(next);
        })
    };

    let onsubmit = {
        let gate = gate.clone();
        let draft = draft.clone();
        let ctx = ctx.clone();
        let ruta = props.ruta_id;
        let on_rated = props.on_rated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let current = *gate;
            if !current.is_open() {
                return;
            }
            gate.set(RatingGate::Submitting);
            let gate = gate.clone();
            let draft = (*draft).clone();
            let ctx = ctx.clone();
            let on_rated = on_rated.clone();
            spawn_local(async move {
                let outcome = current
                    .submit(&ctx.services.calificaciones, usuario, ruta, &draft)
                    .await;
                let stored = outcome.gate.is_closed();
                gate.set(outcome.gate);
                ctx.notify.emit(outcome.notice);
                if stored {
                    on_rated.emit(());
                }
            });
        })
    };

    let body = match *gate {
        RatingGate::AlreadyRated => html! {
            <p class="text-success mb-0">{ condor_core::rating::ALREADY_RATED }</p>
        },
        RatingGate::Unknown => html! {
            <p class="text-muted mb-0">{ t("ui.loading") }</p>
        },
        RatingGate::Open | RatingGate::Submitting => {
            let options = (MIN_SCORE..=MAX_SCORE).rev().map(|score| {
                let label = tr("rating.star", &[("count", &score.to_string())]);
                html! {
                    <option value={score.to_string()} selected={draft.puntuacion == score}>
                        { format!("{} {label}", "★".repeat(usize::from(score))) }
                    </option>
                }
            });
            let busy = *gate == RatingGate::Submitting;
            html! {
                <form class="rating-form" {onsubmit} novalidate={true}>
                    <div class="mb-3">
                        <label for="rating-score" class="form-label">{ t("rating.score") }</label>
                        <select id="rating-score" class="form-select" onchange={on_score} disabled={busy}>
                            { for options }
                        </select>
                    </div>
                    <div class="mb-3">
                        <label for="rating-comment" class="form-label">{ t("rating.comment") }</label>
                        <textarea
                            id="rating-comment"
                            class="form-control"
                            rows="3"
                            value={draft.comentario.clone()}
                            oninput={on_comment}
                            disabled={busy}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        { if busy { t("ui.saving") } else { t("rating.submit") } }
                    </button>
                </form>
            }
        }
    };

    html! {
        <section class="rating card mt-4" aria-labelledby="rating-title">
            <div class="card-body">
                <h2 id="rating-title" class="h5">{ t("rating.title") }</h2>
                { body }
            </div>
        </section>
    }
}
