use crate::app::use_app_context;
use crate::components::field::{Field, visible_error};
use crate::components::modal::Modal;
use crate::i18n::t;
use condor_core::Notice;
use condor_core::forms::recovery::{RESET_DELAY_MS, RecoveryFlow, RecoveryStep};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
}

/// Two-step password recovery: email first, then the security questions.
#[function_component(RecoverPasswordModal)]
pub fn recover_password_modal(props: &Props) -> Html {
    let ctx = use_app_context();
    let flow = use_state(RecoveryFlow::new);
    let loading = use_state(|| false);
    let touched = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    let close = {
        let flow = flow.clone();
        let notice = notice.clone();
        let touched = touched.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |()| {
            flow.set(RecoveryFlow::new());
            notice.set(None);
            touched.set(false);
            on_close.emit(());
        })
    };

    let edit = |apply: fn(&mut RecoveryFlow, String)| {
        let flow = flow.clone();
        let touched = touched.clone();
        Callback::from(move |value: String| {
            let mut next = (*flow).clone();
            apply(&mut next, value);
            flow.set(next);
            touched.set(true);
        })
    };

    let request_questions = {
        let flow = flow.clone();
        let loading = loading.clone();
        let notice = notice.clone();
        let usuarios = ctx.services.usuarios.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            loading.set(true);
            notice.set(None);
            let mut next = (*flow).clone();
            let flow = flow.clone();
            let loading = loading.clone();
            let notice = notice.clone();
            let usuarios = usuarios.clone();
            spawn_local(async move {
                match next.request_questions(&usuarios).await {
                    Ok(()) => flow.set(next),
                    Err(err) => notice.set(Some(Notice::danger(err.banner()))),
                }
                loading.set(false);
            });
        })
    };

    let reset_password = {
        let flow = flow.clone();
        let loading = loading.clone();
        let touched = touched.clone();
        let notice = notice.clone();
        let services = ctx.services.clone();
        let close = close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched.set(true);
            if *loading || !flow.answer_errors().is_clean() {
                return;
            }
            loading.set(true);
            let current = (*flow).clone();
            let loading = loading.clone();
            let notice = notice.clone();
            let services = services.clone();
            let close = close.clone();
            spawn_local(async move {
                match current.submit(&services.usuarios, services.store()).await {
                    Ok(message) => {
                        notice.set(Some(Notice::success(message)));
                        Timeout::new(RESET_DELAY_MS, move || close.emit(())).forget();
                    }
                    Err(err) => notice.set(Some(Notice::danger(err.banner()))),
                }
                loading.set(false);
            });
        })
    };

    let back = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*flow).clone();
            next.back();
            flow.set(next);
        })
    };
    let cancel = {
        let close = close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    let banner = (*notice).as_ref().map(|notice| {
        html! { <div class={notice.kind.css_class()} role="alert">{ notice.text.clone() }</div> }
    });

    let body = match &flow.step {
        RecoveryStep::Email => html! {
            <form class="rp-form" onsubmit={request_questions} novalidate={true}>
                <Field
                    id="recover-correo"
                    label={t("recover.email")}
                    input_type="email"
                    value={flow.correo.clone()}
                    autocomplete="email"
                    on_input={edit(|flow, value| flow.correo = value)}
                />
                <div class="rp-actions d-flex gap-2 justify-content-end">
                    <button type="button" class="btn btn-secondary" onclick={cancel}>{ t("ui.cancel") }</button>
                    <button type="submit" class="btn btn-primary" disabled={*loading || flow.correo.trim().is_empty()}>
                        { t("recover.continue") }
                    </button>
                </div>
            </form>
        },
        RecoveryStep::Questions { pregunta1, pregunta2 } => {
            let errors = flow.answer_errors();
            html! {
                <form class="rp-form" onsubmit={reset_password} novalidate={true}>
                    <Field
                        id="recover-respuesta1"
                        label={pregunta1.clone()}
                        value={flow.respuesta1.clone()}
                        error={visible_error(&errors, "respuesta1", &flow.respuesta1, *touched)}
                        on_input={edit(|flow, value| flow.respuesta1 = value)}
                    />
                    <Field
                        id="recover-respuesta2"
                        label={pregunta2.clone()}
                        value={flow.respuesta2.clone()}
                        error={visible_error(&errors, "respuesta2", &flow.respuesta2, *touched)}
                        on_input={edit(|flow, value| flow.respuesta2 = value)}
                    />
                    <Field
                        id="recover-password"
                        label={t("recover.new_password")}
                        input_type="password"
                        value={flow.nueva_password.clone()}
                        autocomplete="new-password"
                        error={visible_error(&errors, "nueva_password", &flow.nueva_password, *touched)}
                        on_input={edit(|flow, value| flow.nueva_password = value)}
                    />
                    <div class="rp-actions d-flex gap-2 justify-content-end">
                        <button type="button" class="btn btn-secondary" onclick={back}>{ t("recover.back") }</button>
                        <button type="submit" class="btn btn-danger" disabled={*loading || !errors.is_clean()}>
                            { t("recover.submit") }
                        </button>
                    </div>
                </form>
            }
        }
    };

    html! {
        <Modal
            open={props.open}
            title={t("recover.title")}
            description={Some(AttrValue::from(t("recover.description")))}
            on_close={close}
            return_focus_id={props.return_focus_id.clone()}
        >
            { for banner }
            { body }
        </Modal>
    }
}
