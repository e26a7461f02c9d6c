use crate::app::use_app_context;
use crate::components::field::{Field, visible_error};
use crate::i18n::{t, tr};
use condor_core::forms::contact::{ContactField, ContactForm, MENSAJE_MAX};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(ContactPage)]
pub fn contact_page() -> Html {
    let ctx = use_app_context();
    let form = use_state(ContactForm::default);
    let sending = use_state(|| false);
    let touched = use_state(|| false);

    let edit = |field: ContactField| {
        let form = form.clone();
        let touched = touched.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            next.set(field, value);
            form.set(next);
            touched.set(true);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let sending = sending.clone();
        let touched = touched.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched.set(true);
            if *sending || !form.can_submit() {
                return;
            }
            sending.set(true);
            let current = (*form).clone();
            let form = form.clone();
            let sending = sending.clone();
            let touched = touched.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                match current.submit(&ctx.services.contacto).await {
                    Ok(message) => {
                        ctx.success(message);
                        form.set(ContactForm::default());
                        touched.set(false);
                    }
                    Err(err) => ctx.danger(err.banner()),
                }
                sending.set(false);
            });
        })
    };

    let errors = form.errors();
    let error_for = |field: ContactField| {
        visible_error(&errors, field.key(), form.value(field), *touched)
    };
    let used = form.mensaje.chars().count();
    let counter_class = classes!(
        "form-text",
        "text-end",
        (used > MENSAJE_MAX).then_some("text-danger")
    );

    html! {
        <div class="main-content contact">
            <h1>{ t("contact.title") }</h1>
            <p>{ t("contact.subtitle") }</p>
            <form class="w-100 contact-form" {onsubmit} novalidate={true}>
                <Field
                    id="nombre"
                    label={t("contact.name")}
                    value={form.nombre.clone()}
                    autocomplete="name"
                    error={error_for(ContactField::Nombre)}
                    on_input={edit(ContactField::Nombre)}
                />
                <Field
                    id="email"
                    label={t("contact.email")}
                    input_type="email"
                    value={form.correo.clone()}
                    autocomplete="email"
                    error={error_for(ContactField::Correo)}
                    on_input={edit(ContactField::Correo)}
                />
                <Field
                    id="mensaje"
                    label={t("contact.message")}
                    rows={4}
                    value={form.mensaje.clone()}
                    error={error_for(ContactField::Mensaje)}
                    on_input={edit(ContactField::Mensaje)}
                />
                <p class={counter_class} aria-live="polite">
                    { tr("contact.counter", &[("count", &used.to_string())]) }
                </p>
                <button type="submit" class="btn btn-light w-100" disabled={*sending || !form.can_submit()}>
                    { if *sending { t("ui.sending") } else { t("contact.submit") } }
                </button>
            </form>
        </div>
    }
}
