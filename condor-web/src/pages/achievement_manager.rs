use crate::app::use_app_context;
use crate::components::field::{Field, input_value, select_value, visible_error};
use crate::i18n::t;
use condor_core::forms::achievement::{AchievementForm, LogroAction, condition_hint, toggle_estado};
use condor_core::models::{Condicion, Logro};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

fn estado_label(logro: &Logro) -> String {
    logro.estado().map_or_else(
        || logro.id_estado.map(|code| code.to_string()).unwrap_or_default(),
        |estado| estado.label().to_string(),
    )
}

/// Moderator tool: create achievement definitions and switch them on or off.
#[function_component(AchievementManagerPage)]
pub fn achievement_manager_page() -> Html {
    let ctx = use_app_context();
    let logros = use_state(|| None::<Vec<Logro>>);
    let condiciones = use_state(Vec::<Condicion>::new);
    let form = use_state(AchievementForm::default);
    let busy = use_state(|| false);
    let touched = use_state(|| false);
    let error = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    {
        let logros = logros.clone();
        let error = error.clone();
        let logros_service = ctx.services.logros.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match logros_service.list_with_counts().await {
                    Ok(list) => {
                        logros.set(Some(list));
                        error.set(None);
                    }
                    Err(err) => {
                        log::error!("achievement list failed: {err}");
                        error.set(Some(LogroAction::List.describe(&err)));
                    }
                }
            });
            || {}
        });
    }
    {
        let condiciones = condiciones.clone();
        let form = form.clone();
        let logros_service = ctx.services.logros.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                match logros_service.condiciones().await {
                    Ok(list) => {
                        form.set(AchievementForm::with_conditions(&list));
                        condiciones.set(list);
                    }
                    Err(err) => log::warn!("achievement conditions unavailable: {err}"),
                }
            });
            || {}
        });
    }

    let edit = |apply: fn(&mut AchievementForm, String)| {
        let form = form.clone();
        let touched = touched.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
            touched.set(true);
        })
    };
    let on_condition = {
        let form = form.clone();
        let touched = touched.clone();
        Callback::from(move |e: Event| {
            let mut next = (*form).clone();
            next.id_condicion = select_value(&e).trim().parse().ok();
            form.set(next);
            touched.set(true);
        })
    };
    let on_restriction = {
        let form = form.clone();
        let touched = touched.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            next.restriccion = input_value(&e);
            form.set(next);
            touched.set(true);
        })
    };

    let create = {
        let form = form.clone();
        let busy = busy.clone();
        let touched = touched.clone();
        let error = error.clone();
        let reload = reload.clone();
        let condiciones = condiciones.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched.set(true);
            if *busy || !form.can_submit() {
                return;
            }
            busy.set(true);
            let current = (*form).clone();
            let form = form.clone();
            let busy = busy.clone();
            let touched = touched.clone();
            let error = error.clone();
            let reload = reload.clone();
            let condiciones = condiciones.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                match current.submit(&ctx.services.logros).await {
                    Ok(message) => {
                        ctx.success(message);
                        form.set(AchievementForm::with_conditions(&condiciones));
                        touched.set(false);
                        error.set(None);
                        reload.set(reload.wrapping_add(1));
                    }
                    Err(err) => error.set(Some(err.banner())),
                }
                busy.set(false);
            });
        })
    };

    let errors = form.errors();
    let options = condiciones.iter().filter_map(|condicion| {
        let id = condicion.id?;
        Some(html! {
            <option value={id.to_string()} selected={form.id_condicion == Some(id)}>
                { condition_hint(condicion.tipo) }
            </option>
        })
    });
    let condition_error = visible_error(&errors, "condicion", "", *touched);
    let restriction_error = visible_error(&errors, "restriccion", &form.restriccion, *touched);

    let rows = (*logros).iter().flatten().map(|logro| {
        let toggle = {
            let logro = logro.clone();
            let busy = busy.clone();
            let error = error.clone();
            let logros = logros.clone();
            let ctx = ctx.clone();
            Callback::from(move |_: MouseEvent| {
                if *busy {
                    return;
                }
                busy.set(true);
                let logro = logro.clone();
                let busy = busy.clone();
                let error = error.clone();
                let logros = logros.clone();
                let ctx = ctx.clone();
                spawn_local(async move {
                    match toggle_estado(&ctx.services.logros, &logro).await {
                        Ok(estado) => {
                            let updated = (*logros).clone().map(|mut list| {
                                if let Some(row) = list.iter_mut().find(|row| row.id == logro.id) {
                                    row.id_estado = Some(estado.code());
                                }
                                list
                            });
                            logros.set(updated);
                        }
                        Err(message) => error.set(Some(message)),
                    }
                    busy.set(false);
                });
            })
        };
        html! {
            <tr key={logro.id.unwrap_or_default().to_string()}>
                <td>{ logro.id.map(|id| id.to_string()).unwrap_or_default() }</td>
                <td>{ logro.nombre.clone() }</td>
                <td class="text-truncate achievement-description" title={logro.descripcion.clone()}>{ logro.descripcion.clone() }</td>
                <td>{ logro.conteo_usuarios.to_string() }</td>
                <td>{ estado_label(logro) }</td>
                <td>
                    <button type="button" class="btn btn-sm btn-secondary" onclick={toggle} disabled={*busy}>
                        { t("manager.toggle") }
                    </button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="main-content container mt-4 achievement-manager">
            <h1 class="h2">{ t("manager.title") }</h1>
            <form class="card mb-3 p-3" onsubmit={create} novalidate={true}>
                <h2 class="h5">{ t("manager.create_title") }</h2>
                <Field
                    id="logro-nombre"
                    label={t("manager.name")}
                    value={form.nombre.clone()}
                    error={visible_error(&errors, "nombre", &form.nombre, *touched)}
                    on_input={edit(|form, value| form.nombre = value)}
                />
                <Field
                    id="logro-descripcion"
                    label={t("manager.description")}
                    rows={3}
                    value={form.descripcion.clone()}
                    error={visible_error(&errors, "descripcion", &form.descripcion, *touched)}
                    on_input={edit(|form, value| form.descripcion = value)}
                />
                <div class="mb-2">
                    <label for="logro-condicion" class="form-label">{ t("manager.condition") }</label>
                    <select id="logro-condicion" class="form-select" onchange={on_condition}>
                        <option value="" selected={form.id_condicion.is_none()}>{ "--" }</option>
                        { for options }
                    </select>
                    if let Some(message) = condition_error {
                        <p class="text-danger mt-1">{ message }</p>
                    }
                </div>
                <div class="mb-2">
                    <label for="logro-restriccion" class="form-label">{ t("manager.restriction") }</label>
                    <input
                        id="logro-restriccion"
                        type="number"
                        min="0.0000001"
                        step="any"
                        class="form-control"
                        placeholder="40"
                        value={form.restriccion.clone()}
                        oninput={on_restriction}
                    />
                    if let Some(message) = restriction_error {
                        <p class="text-danger mt-1">{ message }</p>
                    }
                </div>
                if let Some(preview) = form.preview(&condiciones) {
                    <div class="mb-2">
                        <span class="form-label d-block">{ t("manager.preview") }</span>
                        <div class="p-2 bg-light border achievement-preview">{ preview }</div>
                    </div>
                }
                <button type="submit" class="btn btn-primary" disabled={*busy || !form.can_submit()}>
                    { t("manager.create") }
                </button>
            </form>
            if let Some(message) = (*error).clone() {
                <div class="alert alert-danger" role="alert">{ message }</div>
            }
            if logros.is_none() && error.is_none() {
                <div role="status">{ t("ui.loading") }</div>
            }
            if let Some(list) = &*logros {
                <div class="table-responsive">
                    <table class="table table-striped">
                        <thead>
                            <tr>
                                <th>{ t("manager.col_id") }</th>
                                <th>{ t("manager.col_name") }</th>
                                <th>{ t("manager.col_description") }</th>
                                <th>{ t("manager.col_users") }</th>
                                <th>{ t("manager.col_state") }</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            if list.is_empty() {
                                <tr><td colspan="6">{ t("manager.empty") }</td></tr>
                            }
                            { for rows }
                        </tbody>
                    </table>
                </div>
            }
        </div>
    }
}
