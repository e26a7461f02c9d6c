use crate::app::use_app_context;
use crate::components::field::{Field, checkbox_checked, select_value, visible_error};
use crate::i18n::t;
use condor_core::RouteCatalogs;
use condor_core::forms::route::RouteForm;
use condor_core::models::{CatalogItem, Ruta};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Route being edited; `None` creates a new one.
    #[prop_or_default]
    pub initial: Option<Ruta>,
    pub on_cancel: Callback<()>,
    /// Receives the success message once the backend accepted the route.
    pub on_saved: Callback<String>,
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn catalog_select(
    id: &'static str,
    label: String,
    items: &[CatalogItem],
    selected: Option<i64>,
    onchange: Callback<Option<i64>>,
) -> Html {
    let onchange = Callback::from(move |e: Event| onchange.emit(parse_id(&select_value(&e))));
    let options = items.iter().filter_map(|item| {
        let value = item.id?;
        Some(html! {
            <option value={value.to_string()} selected={selected == Some(value)}>
                { item.nombre.clone() }
            </option>
        })
    });
    html! {
        <div class="col-6 mb-3">
            <label for={id} class="form-label">{ label }</label>
            <select {id} class="form-select" {onchange}>
                <option value="" selected={selected.is_none()}>{ t("admin.select") }</option>
                { for options }
            </select>
        </div>
    }
}

/// Route editor for the admin panel. Re-mount it (change its `key`) to edit another route.
#[function_component(RouteFormCard)]
pub fn route_form_card(props: &Props) -> Html {
    let ctx = use_app_context();
    let form = {
        let initial = props.initial.clone();
        use_state(move || initial.as_ref().map_or_else(RouteForm::new, RouteForm::edit))
    };
    let catalogs = use_state(RouteCatalogs::default);
    let saving = use_state(|| false);
    let touched = use_state(|| false);

    {
        let catalogs = catalogs.clone();
        let services = ctx.services.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                match RouteCatalogs::load(&services).await {
                    Ok(loaded) => catalogs.set(loaded),
                    Err(err) => log::warn!("route form catalogs unavailable: {err}"),
                }
            });
            || {}
        });
    }

    let update = |apply: fn(&mut RouteForm, String)| {
        let form = form.clone();
        let touched = touched.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
            touched.set(true);
        })
    };
    let pick = |apply: fn(&mut RouteForm, Option<i64>)| {
        let form = form.clone();
        Callback::from(move |value: Option<i64>| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let add_foto = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            if next.add_foto() {
                form.set(next);
            }
        })
    };
    let toggle_activo = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let mut next = (*form).clone();
            next.activo = checkbox_checked(&e);
            form.set(next);
        })
    };
    let cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let onsubmit = {
        let form = form.clone();
        let saving = saving.clone();
        let touched = touched.clone();
        let ctx = ctx.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched.set(true);
            if *saving {
                return;
            }
            if let Some(first) = form.errors().first() {
                ctx.danger(first);
                return;
            }
            saving.set(true);
            let current = (*form).clone();
            let saving = saving.clone();
            let ctx = ctx.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match current.submit(&ctx.services.rutas).await {
                    Ok(message) => on_saved.emit(message),
                    Err(err) => ctx.danger(err.banner()),
                }
                saving.set(false);
            });
        })
    };

    let errors = form.errors();
    let photos = form.fotos.iter().enumerate().map(|(idx, url)| {
        let remove = {
            let form = form.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*form).clone();
                next.remove_foto(idx);
                form.set(next);
            })
        };
        html! {
            <li class="list-group-item d-flex justify-content-between align-items-center">
                <span class="text-truncate">{ url.clone() }</span>
                <button type="button" class="btn btn-sm btn-outline-danger" onclick={remove}>
                    { t("admin.remove_photo") }
                </button>
            </li>
        }
    });
    let (title, submit_label) = if form.is_edit() {
        (t("admin.edit_title"), t("admin.save"))
    } else {
        (t("admin.create_title"), t("admin.create"))
    };

    html! {
        <div class="card mb-3">
            <div class="card-body">
                <h2 class="h5 card-title">{ title }</h2>
                <form class="route-form" {onsubmit} novalidate={true}>
                    <Field
                        id="ruta-nombre"
                        label={t("admin.name")}
                        value={form.nombre.clone()}
                        error={visible_error(&errors, "nombre", &form.nombre, *touched)}
                        on_input={update(|form, value| form.nombre = value)}
                    />
                    <Field
                        id="ruta-duracion"
                        label={t("admin.duration")}
                        input_type="number"
                        value={form.duracion_min.clone()}
                        error={visible_error(&errors, "duracion", &form.duracion_min, *touched)}
                        on_input={update(|form, value| form.duracion_min = value)}
                    />
                    <div class="row g-2">
                        { catalog_select("ruta-tipo", t("admin.tipo"), &catalogs.tipos, form.id_tipo, pick(|form, id| form.id_tipo = id)) }
                        { catalog_select("ruta-dificultad", t("admin.difficulty"), &catalogs.dificultades, form.id_dificultad, pick(|form, id| form.id_dificultad = id)) }
                        { catalog_select("ruta-region", t("admin.region"), &catalogs.regiones, form.id_region, pick(|form, id| form.id_region = id)) }
                        { catalog_select("ruta-estado", t("admin.estado"), &catalogs.estados, form.id_estado, pick(|form, id| form.id_estado = id)) }
                    </div>
                    <Field
                        id="ruta-descripcion"
                        label={t("admin.description")}
                        rows={4}
                        value={form.descripcion.clone()}
                        on_input={update(|form, value| form.descripcion = value)}
                    />
                    <div class="mb-3">
                        <label for="ruta-foto" class="form-label">{ t("admin.photos") }</label>
                        <div class="input-group">
                            <input
                                id="ruta-foto"
                                type="url"
                                class="form-control"
                                value={form.foto_input.clone()}
                                oninput={update(|form, value| form.foto_input = value)
                                    .reform(|e: InputEvent| crate::components::field::input_value(&e))}
                            />
                            <button type="button" class="btn btn-outline-secondary" onclick={add_foto}>
                                { t("admin.add_photo") }
                            </button>
                        </div>
                        <ul class="list-group mt-2">{ for photos }</ul>
                    </div>
                    <div class="form-check mb-3">
                        <input id="ruta-activo" type="checkbox" class="form-check-input" checked={form.activo} onchange={toggle_activo} />
                        <label for="ruta-activo" class="form-check-label">{ t("admin.active") }</label>
                    </div>
                    <div class="d-flex gap-2 justify-content-end">
                        <button type="button" class="btn btn-secondary" onclick={cancel}>{ t("ui.cancel") }</button>
                        <button type="submit" class="btn btn-primary" disabled={*saving || !errors.is_clean()}>
                            { if *saving { t("ui.saving") } else { submit_label } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
