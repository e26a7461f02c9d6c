use crate::app::use_app_context;
use crate::components::field::{Field, select_value, visible_error};
use crate::i18n::t;
use crate::router::Route;
use condor_core::KnownUsers;
use condor_core::forms::register::{PREGUNTAS_1, PREGUNTAS_2, REDIRECT_DELAY_MS, RegisterForm};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

fn question_select(
    id: &'static str,
    label: String,
    choices: &[&str],
    selected: &str,
    onchange: Callback<String>,
) -> Html {
    let onchange = Callback::from(move |e: Event| onchange.emit(select_value(&e)));
    html! {
        <div class="mb-2">
            <label for={id} class="form-label">{ label }</label>
            <select {id} class="form-select" {onchange}>
                { for choices.iter().map(|question| html! {
                    <option value={*question} selected={*question == selected}>{ *question }</option>
                }) }
            </select>
        </div>
    }
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let form = use_state(RegisterForm::default);
    let loading = use_state(|| false);
    let touched = use_state(|| false);

    let edit = |apply: fn(&mut RegisterForm, String)| {
        let form = form.clone();
        let touched = touched.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
            touched.set(true);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let loading = loading.clone();
        let touched = touched.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched.set(true);
            if *loading {
                return;
            }
            if let Some(first) = form.errors(&KnownUsers::new(ctx.services.store())).first() {
                ctx.danger(first);
                return;
            }
            loading.set(true);
            let current = (*form).clone();
            let form = form.clone();
            let loading = loading.clone();
            let touched = touched.clone();
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match current.submit(&ctx.services).await {
                    Ok(message) => {
                        ctx.success(message);
                        form.set(RegisterForm::default());
                        touched.set(false);
                        if let Some(nav) = navigator {
                            Timeout::new(REDIRECT_DELAY_MS, move || nav.push(&Route::Login))
                                .forget();
                        }
                    }
                    Err(err) => ctx.danger(err.banner()),
                }
                loading.set(false);
            });
        })
    };

    let errors = form.errors(&KnownUsers::new(ctx.services.store()));

    html! {
        <div class="main-content register">
            <div class="card auth-card">
                <div class="card-body">
                    <h1 class="h3 text-center mb-3">{ t("register.title") }</h1>
                    <form class="register-form" {onsubmit} novalidate={true}>
                        <Field
                            id="register-correo"
                            label={t("register.email")}
                            input_type="email"
                            value={form.correo.clone()}
                            autocomplete="email"
                            error={visible_error(&errors, "correo", &form.correo, *touched)}
                            on_input={edit(|form, value| form.correo = value)}
                        />
                        <Field
                            id="register-username"
                            label={t("register.username")}
                            value={form.username.clone()}
                            autocomplete="username"
                            error={visible_error(&errors, "username", &form.username, *touched)}
                            on_input={edit(|form, value| form.username = value)}
                        />
                        <Field
                            id="register-password"
                            label={t("register.password")}
                            input_type="password"
                            value={form.password.clone()}
                            autocomplete="new-password"
                            error={visible_error(&errors, "password", &form.password, *touched)}
                            on_input={edit(|form, value| form.password = value)}
                        />
                        <Field
                            id="register-confirm"
                            label={t("register.confirm")}
                            input_type="password"
                            value={form.confirm.clone()}
                            autocomplete="new-password"
                            error={visible_error(&errors, "confirm", &form.confirm, *touched)}
                            on_input={edit(|form, value| form.confirm = value)}
                        />
                        <fieldset class="mb-3">
                            { question_select("register-pregunta1", t("register.question1"), &PREGUNTAS_1, &form.pregunta1, edit(|form, value| form.pregunta1 = value)) }
                            <Field
                                id="register-respuesta1"
                                label={t("register.answer")}
                                value={form.respuesta1.clone()}
                                on_input={edit(|form, value| form.respuesta1 = value)}
                            />
                            { question_select("register-pregunta2", t("register.question2"), &PREGUNTAS_2, &form.pregunta2, edit(|form, value| form.pregunta2 = value)) }
                            <Field
                                id="register-respuesta2"
                                label={t("register.answer")}
                                value={form.respuesta2.clone()}
                                on_input={edit(|form, value| form.respuesta2 = value)}
                            />
                        </fieldset>
                        <button type="submit" class="btn btn-primary w-100" disabled={*loading || !errors.is_clean()}>
                            { if *loading { t("ui.sending") } else { t("register.submit") } }
                        </button>
                    </form>
                    <p class="text-center mt-3 mb-0">
                        <Link<Route> to={Route::Login}>{ t("register.has_account") }</Link<Route>>
                    </p>
                </div>
            </div>
        </div>
    }
}
