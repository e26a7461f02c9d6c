use crate::app::use_app_context;
use crate::components::field::{Field, visible_error};
use crate::components::recover_password_modal::RecoverPasswordModal;
use crate::i18n::{t, tr};
use crate::router::Route;
use condor_core::forms::login::LoginForm;
use condor_core::forms::recovery::take_recovery_message;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const FORGOT_ID: &str = "login-forgot";

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let form = use_state(LoginForm::default);
    let loading = use_state(|| false);
    let touched = use_state(|| false);
    let recovering = use_state(|| false);

    {
        let ctx = ctx.clone();
        use_effect_with((), move |()| {
            if let Some(message) = take_recovery_message(ctx.services.store()) {
                ctx.success(message);
            }
            || {}
        });
    }

    let edit = |apply: fn(&mut LoginForm, String)| {
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
            if *loading || !form.can_submit() {
                return;
            }
            loading.set(true);
            let current = (*form).clone();
            let loading = loading.clone();
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match current.submit(&ctx.services).await {
                    Ok(name) => {
                        ctx.success(tr("login.welcome", &[("name", &name)]));
                        if let Some(nav) = navigator {
                            nav.push(&Route::Profile);
                        }
                    }
                    Err(err) => ctx.danger(err.banner()),
                }
                loading.set(false);
            });
        })
    };

    let open_recovery = {
        let recovering = recovering.clone();
        Callback::from(move |_: MouseEvent| recovering.set(true))
    };
    let close_recovery = {
        let recovering = recovering.clone();
        let ctx = ctx.clone();
        Callback::from(move |()| {
            recovering.set(false);
            if let Some(message) = take_recovery_message(ctx.services.store()) {
                ctx.success(message);
            }
        })
    };

    let errors = form.errors();

    html! {
        <div class="main-content login">
            <div class="card auth-card">
                <div class="card-body">
                    <h1 class="h3 text-center mb-3">{ t("login.title") }</h1>
                    <form class="login-form" {onsubmit} novalidate={true}>
                        <Field
                            id="login-correo"
                            label={t("login.email")}
                            input_type="email"
                            value={form.correo.clone()}
                            autocomplete="email"
                            error={visible_error(&errors, "correo", &form.correo, *touched)}
                            on_input={edit(|form, value| form.correo = value)}
                        />
                        <Field
                            id="login-password"
                            label={t("login.password")}
                            input_type="password"
                            value={form.password.clone()}
                            autocomplete="current-password"
                            error={visible_error(&errors, "password", &form.password, *touched)}
                            on_input={edit(|form, value| form.password = value)}
                        />
                        <button type="submit" class="btn btn-primary w-100" disabled={*loading || !form.can_submit()}>
                            { if *loading { t("ui.loading") } else { t("login.submit") } }
                        </button>
                    </form>
                    <div class="d-flex flex-column align-items-center gap-1 mt-3">
                        <button id={FORGOT_ID} type="button" class="btn btn-link p-0" onclick={open_recovery}>
                            { t("login.forgot") }
                        </button>
                        <Link<Route> to={Route::Register}>{ t("login.no_account") }</Link<Route>>
                    </div>
                </div>
            </div>
            <RecoverPasswordModal
                open={*recovering}
                on_close={close_recovery}
                return_focus_id={Some(AttrValue::from(FORGOT_ID))}
            />
        </div>
    }
}
