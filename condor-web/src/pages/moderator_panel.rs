use crate::app::use_app_context;
use crate::components::field::textarea_value;
use crate::dom;
use crate::i18n::{fmt_date_iso, t};
use condor_core::forms::moderation::{DELETE_CONFIRMATION, ReplyForm, delete_message, mark_answered};
use condor_core::models::MensajeContacto;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(ModeratorPanelPage)]
pub fn moderator_panel_page() -> Html {
    let ctx = use_app_context();
    let mensajes = use_state(Vec::<MensajeContacto>::new);
    let loading = use_state(|| true);
    let reply = use_state(|| None::<ReplyForm>);
    let saving = use_state(|| false);

    {
        let mensajes = mensajes.clone();
        let loading = loading.clone();
        let ctx = ctx.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                match ctx.services.contacto.list().await {
                    Ok(list) => mensajes.set(list),
                    Err(err) => ctx.report(&err),
                }
                loading.set(false);
            });
            || {}
        });
    }

    let on_reply_input = {
        let reply = reply.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(mut next) = (*reply).clone() {
                next.respuesta = textarea_value(&e);
                reply.set(Some(next));
            }
        })
    };
    let cancel_reply = {
        let reply = reply.clone();
        Callback::from(move |_: MouseEvent| reply.set(None))
    };
    let save_reply = {
        let reply = reply.clone();
        let mensajes = mensajes.clone();
        let saving = saving.clone();
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(form) = (*reply).clone() else {
                return;
            };
            if *saving {
                return;
            }
            if let Some(first) = form.errors().first() {
                ctx.danger(first);
                return;
            }
            saving.set(true);
            let reply = reply.clone();
            let mensajes = mensajes.clone();
            let saving = saving.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                match form.submit(&ctx.services.contacto).await {
                    Ok(message) => {
                        if let Some(id) = form.id {
                            let mut next = (*mensajes).clone();
                            mark_answered(&mut next, id, &form.respuesta);
                            mensajes.set(next);
                        }
                        reply.set(None);
                        ctx.success(message);
                    }
                    Err(err) => ctx.danger(err.banner()),
                }
                saving.set(false);
            });
        })
    };

    let items = mensajes.iter().map(|mensaje| {
        let open = {
            let reply = reply.clone();
            let mensaje = mensaje.clone();
            Callback::from(move |_: MouseEvent| reply.set(Some(ReplyForm::open(&mensaje))))
        };
        let delete = {
            let mensajes = mensajes.clone();
            let ctx = ctx.clone();
            let id = mensaje.id;
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else {
                    return;
                };
                if !dom::confirm(DELETE_CONFIRMATION) {
                    return;
                }
                let mensajes = mensajes.clone();
                let ctx = ctx.clone();
                spawn_local(async move {
                    match delete_message(&ctx.services.contacto, id).await {
                        Ok(message) => {
                            let remaining = mensajes.iter().filter(|m| m.id != Some(id)).cloned();
                            mensajes.set(remaining.collect());
                            ctx.success(message);
                        }
                        Err(err) => ctx.danger(err.banner()),
                    }
                });
            })
        };
        let editing = reply
            .as_ref()
            .filter(|form| form.id.is_some() && form.id == mensaje.id);
        let status = if mensaje.resuelto {
            html! { <span class="badge bg-success">{ t("moderator.resolved") }</span> }
        } else {
            html! { <span class="badge bg-warning text-dark">{ t("moderator.pending") }</span> }
        };
        html! {
            <div key={mensaje.id.unwrap_or_default().to_string()} class="list-group-item contact-message">
                <div class="d-flex justify-content-between gap-3">
                    <div>
                        <strong>{ mensaje.nombre.clone() }</strong>{ " · " }<small>{ mensaje.correo.clone() }</small>
                        { " " }{ status }
                        if let Some(fecha) = &mensaje.f_creacion {
                            <div class="small text-muted">{ format!("{} {}", t("moderator.received"), fmt_date_iso(fecha)) }</div>
                        }
                        <div class="mt-2">{ mensaje.mensaje.clone() }</div>
                        if let Some(respuesta) = mensaje.respuesta.as_ref().filter(|r| !r.trim().is_empty()) {
                            <div class="alert alert-secondary mt-2">
                                <strong>{ t("moderator.answer") }</strong>
                                <div>{ respuesta.clone() }</div>
                            </div>
                        }
                    </div>
                    <div class="d-flex flex-column gap-2">
                        <button type="button" class="btn btn-sm btn-outline-primary" onclick={open}>{ t("moderator.reply") }</button>
                        <button type="button" class="btn btn-sm btn-danger" onclick={delete}>{ t("ui.delete") }</button>
                    </div>
                </div>
                if let Some(form) = editing {
                    <div class="mt-2">
                        <label class="visually-hidden" for="reply-text">{ t("moderator.reply") }</label>
                        <textarea
                            id="reply-text"
                            class="form-control"
                            rows="4"
                            value={form.respuesta.clone()}
                            oninput={on_reply_input.clone()}
                        />
                        <div class="d-flex gap-2 mt-2">
                            <button type="button" class="btn btn-sm btn-success" onclick={save_reply.clone()} disabled={*saving}>
                                { t("moderator.save_reply") }
                            </button>
                            <button type="button" class="btn btn-sm btn-light" onclick={cancel_reply.clone()}>{ t("ui.cancel") }</button>
                        </div>
                    </div>
                }
            </div>
        }
    });

    html! {
        <div class="main-content container py-4 moderator-panel">
            <h1>{ t("moderator.title") }</h1>
            if *loading {
                <div role="status">{ t("ui.loading") }</div>
            } else if mensajes.is_empty() {
                <div class="text-muted">{ t("moderator.empty") }</div>
            } else {
                <div class="list-group">{ for items }</div>
            }
        </div>
    }
}
