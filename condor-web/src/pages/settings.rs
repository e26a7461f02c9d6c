use crate::app::use_app_context;
use crate::components::field::{Field, visible_error};
use crate::dom;
use crate::i18n::t;
use crate::router::Route;
use condor_core::forms::settings::{DELETE_CONFIRMATION, DeleteAccountForm, ProfileForm};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Pause between the deactivation notice and the move to `/login`.
const LOGOUT_REDIRECT_MS: u32 = 1000;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let profile = {
        let services = ctx.services.clone();
        use_state(move || ProfileForm::from_session(&services))
    };
    let removal = use_state(DeleteAccountForm::default);
    let busy = use_state(|| false);
    let touched = use_state(|| false);

    let edit = |apply: fn(&mut ProfileForm, String)| {
        let profile = profile.clone();
        let touched = touched.clone();
        Callback::from(move |value: String| {
            let mut next = (*profile).clone();
            apply(&mut next, value);
            profile.set(next);
            touched.set(true);
        })
    };

    let update = {
        let profile = profile.clone();
        let busy = busy.clone();
        let touched = touched.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched.set(true);
            if *busy {
                return;
            }
            if let Some(first) = profile.errors().first() {
                ctx.danger(first);
                return;
            }
            busy.set(true);
            let current = (*profile).clone();
            let busy = busy.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                match current.submit(&ctx.services).await {
                    Ok(message) => ctx.success(message),
                    Err(err) => ctx.danger(err.banner()),
                }
                busy.set(false);
            });
        })
    };
    let clear = {
        let profile = profile.clone();
        let touched = touched.clone();
        Callback::from(move |_: MouseEvent| {
            profile.set(ProfileForm::default());
            touched.set(false);
        })
    };

    let delete = {
        let removal = removal.clone();
        let busy = busy.clone();
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let session_email = ctx.services.session.current_email();
            if let Some(message) = removal.error(session_email.as_deref()) {
                ctx.danger(message);
                return;
            }
            if !dom::confirm(DELETE_CONFIRMATION) {
                return;
            }
            busy.set(true);
            let current = (*removal).clone();
            let busy = busy.clone();
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match current.submit(&ctx.services).await {
                    Ok(message) => {
                        ctx.success(message);
                        if let Some(nav) = navigator {
                            Timeout::new(LOGOUT_REDIRECT_MS, move || nav.replace(&Route::Login))
                                .forget();
                        }
                    }
                    Err(err) => ctx.danger(err.banner()),
                }
                busy.set(false);
            });
        })
    };
    let on_removal_input = {
        let removal = removal.clone();
        Callback::from(move |value: String| removal.set(DeleteAccountForm { correo: value }))
    };

    let go_home = Callback::from(move |_: MouseEvent| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Home);
        }
    });

    let errors = profile.errors();
    let session_email = ctx.services.session.current_email();
    let removal_error = removal.error(session_email.as_deref());

    html! {
        <div class="main-content perfil-container settings">
            <div class="card perfil-card">
                <div class="perfil-body">
                    <h1 class="perfil-titulo h2">{ t("settings.title") }</h1>
                    <section aria-labelledby="settings-edit">
                        <h2 id="settings-edit" class="h4">{ t("settings.edit_title") }</h2>
                        <form class="settings-form" onsubmit={update} novalidate={true}>
                            <Field
                                id="settings-nombre"
                                label={t("settings.name")}
                                value={profile.nombre.clone()}
                                maxlength={100}
                                error={visible_error(&errors, "nombre", &profile.nombre, *touched)}
                                on_input={edit(|form, value| form.nombre = value)}
                            />
                            <Field
                                id="settings-correo"
                                label={t("settings.email")}
                                input_type="email"
                                value={profile.correo.clone()}
                                error={visible_error(&errors, "correo", &profile.correo, *touched)}
                                on_input={edit(|form, value| form.correo = value)}
                            />
                            <div class="d-flex gap-2">
                                <button type="submit" class="btn btn-primary" disabled={*busy || !errors.is_clean()}>
                                    { t("settings.update") }
                                </button>
                                <button type="button" class="btn btn-light" onclick={clear}>{ t("settings.clear") }</button>
                            </div>
                        </form>
                    </section>
                    <hr />
                    <section aria-labelledby="settings-delete">
                        <h2 id="settings-delete" class="h4">{ t("settings.delete_title") }</h2>
                        <form class="delete-form" onsubmit={delete} novalidate={true}>
                            <Field
                                id="settings-delete-correo"
                                label={t("settings.delete_help")}
                                input_type="email"
                                placeholder="correo@ejemplo.com"
                                value={removal.correo.clone()}
                                error={removal_error.filter(|_| !removal.correo.is_empty()).map(AttrValue::from)}
                                on_input={on_removal_input}
                            />
                            <button type="submit" class="btn btn-danger" disabled={*busy || removal_error.is_some()}>
                                { t("settings.delete") }
                            </button>
                        </form>
                    </section>
                </div>
            </div>
            <button type="button" class="btn btn-condor mt-3" onclick={go_home}>{ t("ui.go_home") }</button>
        </div>
    }
}
