use crate::app::use_app_context;
use crate::i18n::t;
use crate::paths::photo_url;
use crate::router::Route;
use condor_core::Role;
use condor_core::models::Usuario;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

fn role_label(role: Role) -> String {
    match role {
        Role::Admin => t("profile.role_admin"),
        Role::Moderator => t("profile.role_moderator"),
        Role::Member => t("profile.role_member"),
    }
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let ratings = use_state(|| None::<usize>);

    let cached = ctx.services.session.cached_profile();
    let role = cached.as_ref().map_or(Role::Member, Role::classify);
    let usuario = cached.as_ref().map(Usuario::from_value).unwrap_or_default();
    let user_id = usuario.id;

    {
        let ratings = ratings.clone();
        let calificaciones = ctx.services.calificaciones.clone();
        use_effect_with(user_id, move |&user_id| {
            if let Some(id) = user_id {
                spawn_local(async move {
                    match calificaciones.by_user(id).await {
                        Ok(list) => ratings.set(Some(list.len())),
                        Err(err) => log::warn!("ratings for user {id} unavailable: {err}"),
                    }
                });
            }
            || {}
        });
    }

    let logout = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.services.session.end_session();
            ctx.info(t("nav.logged_out"));
            if let Some(nav) = &navigator {
                nav.push(&Route::Home);
            }
        })
    };

    let correo = ctx
        .services
        .session
        .current_email()
        .unwrap_or_else(|| usuario.correo.clone());
    let avatar = match usuario.foto_perfil.as_deref().filter(|src| !src.trim().is_empty()) {
        Some(src) => html! { <img class="perfil-avatar rounded-circle" src={photo_url(src)} alt={usuario.nombre.clone()} /> },
        None => html! { <div class="perfil-avatar" aria-hidden="true">{ "👤" }</div> },
    };
    let fact = |label: String, value: String| {
        html! { <p><strong>{ format!("{label}: ") }</strong>{ value }</p> }
    };

    html! {
        <div class="main-content perfil-container">
            <div class="card perfil-card">
                <div class="perfil-body">
                    <h1 class="perfil-titulo h2">{ t("profile.title") }</h1>
                    { avatar }
                    <div class="perfil-info">
                        { fact(t("profile.name"), usuario.nombre.clone()) }
                        { fact(t("profile.email"), correo) }
                        { fact(t("profile.role"), role_label(role)) }
                        { fact(t("profile.routes_done"), usuario.rutas_recorridas.unwrap_or(0).to_string()) }
                        if let Some(count) = *ratings {
                            { fact(t("profile.ratings"), count.to_string()) }
                        }
                    </div>
                    <div class="d-flex flex-wrap gap-2 justify-content-center">
                        <Link<Route> to={Route::MyAchievements} classes="btn btn-outline-primary">{ t("profile.achievements") }</Link<Route>>
                        <Link<Route> to={Route::Settings} classes="btn btn-outline-secondary">{ t("profile.settings") }</Link<Route>>
                    </div>
                    <button type="button" class="btn btn-primary perfil-boton mt-3" onclick={logout}>
                        { t("profile.logout") }
                    </button>
                    <Link<Route> to={Route::Home} classes="btn btn-link perfil-volver">{ t("ui.back_home") }</Link<Route>>
                </div>
            </div>
        </div>
    }
}
