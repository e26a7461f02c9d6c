use crate::app::use_app_context;
use crate::components::route_form::RouteFormCard;
use crate::dom;
use crate::i18n::{t, tr};
use crate::paths::photo_url;
use condor_core::models::Ruta;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Which editor, if any, is mounted. The counter re-mounts a fresh create form.
#[derive(Clone, PartialEq)]
enum Editor {
    Closed,
    Create(u32),
    Edit(Box<Ruta>),
}

impl Editor {
    fn key(&self) -> String {
        match self {
            Self::Closed => String::new(),
            Self::Create(round) => format!("new-{round}"),
            Self::Edit(ruta) => format!("edit-{}", ruta.id.unwrap_or_default()),
        }
    }
}

fn status_badges(ruta: &Ruta) -> Html {
    html! {
        <>
            if ruta.f_baneo.unwrap_or(false) {
                <span class="badge bg-danger">{ t("admin.banned") }</span>
            }
            if !ruta.activo.unwrap_or(true) {
                <span class="badge bg-secondary">{ t("admin.inactive") }</span>
            }
        </>
    }
}

#[function_component(AdminPanelPage)]
pub fn admin_panel_page() -> Html {
    let ctx = use_app_context();
    let rutas = use_state(Vec::<Ruta>::new);
    let loading = use_state(|| true);
    let editor = use_state(|| Editor::Closed);
    let reload = use_state(|| 0_u32);

    {
        let rutas = rutas.clone();
        let loading = loading.clone();
        let ctx = ctx.clone();
        use_effect_with(*reload, move |_| {
            loading.set(true);
            spawn_local(async move {
                match ctx.services.rutas.list().await {
                    Ok(list) => rutas.set(list),
                    Err(err) => ctx.report(&err),
                }
                loading.set(false);
            });
            || {}
        });
    }

    let open_new = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| {
            let round = match &*editor {
                Editor::Create(round) => round.wrapping_add(1),
                _ => 0,
            };
            editor.set(Editor::Create(round));
        })
    };
    let on_cancel = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(Editor::Closed))
    };
    let on_saved = {
        let editor = editor.clone();
        let reload = reload.clone();
        let ctx = ctx.clone();
        Callback::from(move |message: String| {
            editor.set(Editor::Closed);
            ctx.success(message);
            reload.set(reload.wrapping_add(1));
        })
    };

    let cards = rutas.iter().enumerate().map(|(idx, ruta)| {
        let edit = {
            let editor = editor.clone();
            let ruta = ruta.clone();
            Callback::from(move |_: MouseEvent| editor.set(Editor::Edit(Box::new(ruta.clone()))))
        };
        let delete = {
            let rutas = rutas.clone();
            let ruta = ruta.clone();
            let ctx = ctx.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = ruta.id else {
                    return;
                };
                if !dom::confirm(&tr("admin.delete_confirm", &[("nombre", &ruta.nombre)])) {
                    return;
                }
                let rutas = rutas.clone();
                let ctx = ctx.clone();
                spawn_local(async move {
                    match ctx.services.rutas.delete(id).await {
                        Ok(()) => {
                            ctx.success(t("admin.deleted"));
                            rutas.set(rutas.iter().filter(|r| r.id != Some(id)).cloned().collect());
                        }
                        Err(err) => ctx.report(&err),
                    }
                });
            })
        };
        let key = ruta.id.map_or_else(|| format!("r-{idx}"), |id| id.to_string());
        html! {
            <div {key} class="col-12 col-md-8 mx-auto">
                <div class="card admin-card">
                    if let Some(src) = ruta.foto.first() {
                        <img src={photo_url(src)} class="card-img-top" alt={ruta.nombre.clone()} />
                    }
                    <div class="card-body">
                        <h3 class="h5 card-title d-flex gap-2 align-items-center">
                            { ruta.nombre.clone() }
                            { status_badges(ruta) }
                        </h3>
                        <p>{ ruta.descripcion.clone() }</p>
                        <div class="d-flex gap-2 align-items-center">
                            <button type="button" class="btn btn-sm btn-outline-primary" onclick={edit}>{ t("ui.edit") }</button>
                            <button type="button" class="btn btn-sm btn-outline-danger" onclick={delete}>{ t("ui.delete") }</button>
                        </div>
                    </div>
                </div>
            </div>
        }
    });

    let form = match &*editor {
        Editor::Closed => Html::default(),
        Editor::Create(_) => html! {
            <RouteFormCard key={editor.key()} on_cancel={on_cancel.clone()} on_saved={on_saved.clone()} />
        },
        Editor::Edit(ruta) => html! {
            <RouteFormCard key={editor.key()} initial={Some((**ruta).clone())} {on_cancel} {on_saved} />
        },
    };

    html! {
        <div class="main-content container py-4 admin-panel">
            <h1>{ t("admin.title") }</h1>
            <div class="mb-3">
                <button type="button" class="btn btn-primary" onclick={open_new}>{ t("admin.new_form") }</button>
            </div>
            { form }
            <h2 class="h4 mt-4">{ t("admin.routes") }</h2>
            if *loading {
                <div role="status">{ t("ui.loading") }</div>
            } else {
                <div class="row g-3">{ for cards }</div>
            }
        </div>
    }
}
