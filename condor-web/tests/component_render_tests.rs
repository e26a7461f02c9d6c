mod support;

use condor_core::models::Ruta;
use condor_core::{RoleFlags, RouteCatalogs, RouteListing, RouteSummary, SessionSnapshot};
use condor_web::components::footer::Footer;
use condor_web::components::header::Header;
use condor_web::components::rating::RatingControl;
use condor_web::components::recover_password_modal::RecoverPasswordModal;
use condor_web::components::route_card::RouteCard;
use condor_web::components::route_form::RouteFormCard;
use support::{Harness, is_disabled, member};
use yew::{Callback, html};

fn header(session: SessionSnapshot) -> String {
    Harness::new().render(html! {
        <Header {session} current_lang="es" on_lang_change={Callback::noop()} />
    })
}

#[test]
fn anonymous_header_points_profile_to_login() {
    condor_web::i18n::set_lang("es");
    let html = header(SessionSnapshot::default());
    assert!(html.contains("href=\"#main\""));
    assert!(html.contains("lang-select"));
    assert!(html.contains("href=\"/login\""));
    assert!(!html.contains("Panel de Administrador"));
    assert!(!html.contains("Gestor"));
}

#[test]
fn header_shows_privileged_links_per_flag() {
    condor_web::i18n::set_lang("es");
    let admin = header(SessionSnapshot {
        active: true,
        email: Some("root@condor.cl".into()),
        flags: RoleFlags {
            is_admin: true,
            is_moderator: false,
        },
    });
    assert!(admin.contains("href=\"/admin\""));
    assert!(admin.contains("href=\"/perfil\""));
    assert!(!admin.contains("href=\"/moderador\""));

    let moderator = header(SessionSnapshot {
        active: true,
        email: Some("mod@condor.cl".into()),
        flags: RoleFlags {
            is_admin: false,
            is_moderator: true,
        },
    });
    assert!(moderator.contains("href=\"/moderador\""));
    assert!(moderator.contains("href=\"/gestor\""));
    assert!(!moderator.contains("href=\"/admin\""));
}

#[test]
fn footer_links_the_team() {
    condor_web::i18n::set_lang("es");
    let html = Harness::new().render(html! { <Footer /> });
    assert!(html.contains("role=\"contentinfo\""));
    assert!(html.contains("Cristóbal Barrientos"));
    assert!(html.contains("Tomás Zapata"));
    assert!(html.contains("linkedin.com"));
}

#[test]
fn route_card_links_to_its_directory() {
    condor_web::i18n::set_lang("es");
    let ruta = Ruta {
        id: Some(12),
        nombre: "Cerro Manquehue".into(),
        descripcion: "Subida corta con vista a Santiago.".into(),
        dificultad: Some("MODERADO".into()),
        region: Some("Metropolitana".into()),
        distancia: Some(3.2),
        tiempo_segundos: Some(5400),
        ..Ruta::default()
    };
    let route = RouteSummary::enrich(&ruta, &RouteCatalogs::default());
    let html = Harness::new().render(html! {
        <RouteCard {route} listing={RouteListing::Community}>
            <button type="button">{ "Editar" }</button>
        </RouteCard>
    });
    assert!(html.contains("href=\"/rutas/comunitarias/12\""));
    assert!(html.contains("badge bg-warning text-dark"));
    assert!(html.contains("3.20 km"));
    assert!(html.contains("1 h 30 min"));
    assert!(html.contains("card-footer"));
    assert!(html.contains("/static/img/ruta-sin-foto.jpg"));
}

#[test]
fn route_form_titles_follow_the_mode() {
    condor_web::i18n::set_lang("es");
    let h = Harness::new();
    let create = h.render(html! {
        <RouteFormCard on_cancel={Callback::noop()} on_saved={Callback::noop()} />
    });
    assert!(create.contains("Crear ruta"));
    assert!(is_disabled(&create, "Crear ruta"), "a nameless route cannot be saved");

    let ruta = Ruta {
        id: Some(4),
        nombre: "Salto del Laja".into(),
        ..Ruta::default()
    };
    let edit = h.render(html! {
        <RouteFormCard initial={Some(ruta)} on_cancel={Callback::noop()} on_saved={Callback::noop()} />
    });
    assert!(edit.contains("Editar ruta"));
    assert!(edit.contains("Guardar cambios"));
    assert!(!is_disabled(&edit, "Guardar cambios"));
}

#[test]
fn recovery_modal_opens_on_the_email_step() {
    condor_web::i18n::set_lang("es");
    let h = Harness::new();
    let open = h.render(html! { <RecoverPasswordModal open={true} on_close={Callback::noop()} /> });
    assert!(open.contains("role=\"dialog\""));
    assert!(open.contains("Recuperar contraseña"));
    assert!(open.contains("Correo registrado"));
    assert!(open.contains("Siguiente"));

    let closed = h.render(html! { <RecoverPasswordModal open={false} on_close={Callback::noop()} /> });
    assert!(!closed.contains("role=\"dialog\""));
}

#[test]
fn member_rating_control_waits_for_the_existence_check() {
    condor_web::i18n::set_lang("es");
    let h = Harness::new();
    h.sign_in(&member(7, 3));
    let html = h.render(html! { <RatingControl ruta_id={3} /> });
    assert!(html.contains("Califica esta ruta"));
    assert!(html.contains("Cargando..."));
    assert!(!html.contains("Inicia sesión para calificar"));
}
