use std::rc::Rc;

use condor_core::forms::achievement::AchievementForm;
use condor_core::forms::contact::{ContactField, ContactForm};
use condor_core::forms::login::LoginForm;
use condor_core::forms::moderation::{ReplyForm, delete_message};
use condor_core::forms::recovery::{RecoveryFlow, RecoveryStep, take_recovery_message};
use condor_core::forms::register::RegisterForm;
use condor_core::forms::settings::{DeleteAccountForm, ProfileForm};
use condor_core::mock::MockBackend;
use condor_core::services::ROLE_HEADER;
use condor_core::storage::keys;
use condor_core::{ApiConfig, FormError, KeyValueStore, KnownUsers, MemoryStore, Method, Services};
use futures::executor::block_on;
use serde_json::{Value, json};

const CONTACTO: &str = "/api/v1/contacto";
const USUARIOS: &str = "/api/v1/usuarios";
const LOGIN: &str = "/api/v1/usuarios/login";
const BUSCAR: &str = "/api/v1/usuarios/buscar";

struct Harness {
    mock: Rc<MockBackend>,
    store: Rc<MemoryStore>,
    services: Services,
}

fn harness() -> Harness {
    let mock = Rc::new(MockBackend::new());
    let store = Rc::new(MemoryStore::new());
    let services = Services::new(
        ApiConfig::uniform("http://backend.test"),
        mock.clone(),
        store.clone(),
    );
    Harness {
        mock,
        store,
        services,
    }
}

fn signed_in(h: &Harness, profile: &Value) {
    h.services.session.cache_profile(profile);
    h.services
        .session
        .start_session(profile["correo"].as_str().unwrap_or("ana@condor.cl"));
}

fn contact_form(mensaje: &str) -> ContactForm {
    let mut form = ContactForm::default();
    form.set(ContactField::Nombre, "Ana".into());
    form.set(ContactField::Correo, "ana@condor.cl".into());
    form.set(ContactField::Mensaje, mensaje.into());
    form
}

#[test]
fn contact_message_length_boundaries() {
    let h = harness();
    h.mock.on(Method::Post, CONTACTO, 201, "");

    assert!(!contact_form(&"a".repeat(9)).can_submit());
    assert!(contact_form(&"a".repeat(10)).can_submit());
    assert!(contact_form(&"a".repeat(300)).can_submit());

    let too_long = contact_form(&"a".repeat(301));
    assert_eq!(
        too_long.field_error(ContactField::Mensaje),
        Some("El mensaje no puede exceder los 300 caracteres.")
    );
    let err = block_on(too_long.submit(&h.services.contacto)).expect_err("rejected");
    assert!(matches!(err, FormError::Invalid(_)));
    assert!(!h.mock.called(Method::Post, CONTACTO));

    let sent = block_on(contact_form(&"a".repeat(300)).submit(&h.services.contacto)).expect("sent");
    assert_eq!(sent, "Gracias Ana, tu mensaje ha sido enviado!");
    assert_eq!(h.mock.count(Method::Post, CONTACTO), 1);
}

#[test]
fn register_duplicate_never_reaches_backend() {
    let h = harness();
    h.store.set(
        keys::KNOWN_USERS,
        r#"[{"username":"Exist","email":"exist@a.com"}]"#,
    );
    let form = RegisterForm {
        correo: "exist@a.com".into(),
        username: "Otro".into(),
        password: "abcdef".into(),
        confirm: "abcdef".into(),
        ..RegisterForm::default()
    };
    let err = block_on(form.submit(&h.services)).expect_err("duplicate");
    assert_eq!(
        err.field_errors().and_then(|errors| errors.get("correo")),
        Some("El Correo ya está registrado.")
    );
    assert!(h.mock.requests().is_empty());
}

#[test]
fn register_new_account_is_remembered() {
    let h = harness();
    h.mock.on(Method::Post, USUARIOS, 201, r#"{"id":12}"#);
    let form = RegisterForm {
        correo: "nuevo@a.com".into(),
        username: "Nuevo".into(),
        password: "abcdef".into(),
        confirm: "abcdef".into(),
        ..RegisterForm::default()
    };
    let message = block_on(form.submit(&h.services)).expect("registered");
    assert!(message.contains("Nuevo"));
    assert!(KnownUsers::new(h.store.as_ref()).contains_email("nuevo@a.com"));

    let body: Value = h
        .mock
        .last_request()
        .expect("request")
        .json_body()
        .expect("json");
    assert_eq!(body["idRol"], 3);
    assert_eq!(body["idRegion"], 1);
}

#[test]
fn register_conflict_uses_backend_copy() {
    let h = harness();
    h.mock.on(Method::Post, USUARIOS, 409, "");
    let form = RegisterForm {
        correo: "otro@a.com".into(),
        username: "Otro".into(),
        password: "abcdef".into(),
        confirm: "abcdef".into(),
        ..RegisterForm::default()
    };
    let err = block_on(form.submit(&h.services)).expect_err("conflict");
    assert_eq!(err, FormError::Api("El correo ya está registrado.".into()));
}

#[test]
fn unauthorized_login_skips_profile_lookup() {
    let h = harness();
    h.mock.on(Method::Post, LOGIN, 401, r#"{"message":"bad credentials"}"#);
    let form = LoginForm {
        correo: "ana@condor.cl".into(),
        password: "wrong".into(),
    };
    let err = block_on(form.submit(&h.services)).expect_err("unauthorized");
    assert_eq!(err.banner(), "Correo o contraseña incorrectos.");
    assert!(!h.mock.called(Method::Get, BUSCAR));
    assert!(!h.services.session.is_session_active());
}

#[test]
fn login_caches_profile_and_token() {
    let h = harness();
    h.mock.on(Method::Post, LOGIN, 200, r#"{"token":"abc"}"#);
    h.mock.on_json(
        Method::Get,
        BUSCAR,
        200,
        &json!({"id": 5, "nombre": "Ana", "correo": "ana@condor.cl", "idRol": 2}),
    );
    let form = LoginForm {
        correo: " ana@condor.cl ".into(),
        password: "secreto".into(),
    };
    let name = block_on(form.submit(&h.services)).expect("signed in");
    assert_eq!(name, "Ana");
    let session = &h.services.session;
    assert!(session.is_session_active());
    assert_eq!(session.current_email().as_deref(), Some("ana@condor.cl"));
    assert_eq!(session.user_id(), Some(5));
    assert!(session.role_flags().is_moderator);
    assert_eq!(h.store.get(keys::TOKEN).as_deref(), Some("abc"));
    let lookup = h.mock.last_request().expect("lookup");
    assert_eq!(lookup.query_param("correo").as_deref(), Some("ana@condor.cl"));
}

#[test]
fn profile_update_patches_only_changed_fields() {
    let h = harness();
    signed_in(&h, &json!({"id": 3, "nombre": "Ana", "correo": "ana@condor.cl"}));
    h.mock.on_json(
        Method::Get,
        BUSCAR,
        200,
        &json!({"id": 3, "nombre": "Ana", "correo": "ana@condor.cl"}),
    );
    h.mock.on(Method::Patch, "/api/v1/usuarios/3/nombre", 200, "");
    let form = ProfileForm {
        nombre: "Ana María".into(),
        ..ProfileForm::from_session(&h.services)
    };
    let message = block_on(form.submit(&h.services)).expect("updated");
    assert_eq!(message, "Perfil actualizado correctamente.");
    assert!(h.mock.called(Method::Patch, "/api/v1/usuarios/3/nombre"));
    assert!(!h.mock.called(Method::Patch, "/api/v1/usuarios/3/correo"));
    let profile = h.services.session.cached_profile().expect("profile");
    assert_eq!(profile["nombre"], "Ana María");
}

#[test]
fn failed_email_change_still_caches_the_new_name() {
    let h = harness();
    signed_in(&h, &json!({"id": 3, "nombre": "Ana", "correo": "ana@condor.cl"}));
    h.mock.on_json(
        Method::Get,
        BUSCAR,
        200,
        &json!({"id": 3, "nombre": "Ana", "correo": "ana@condor.cl"}),
    );
    h.mock.on(Method::Patch, "/api/v1/usuarios/3/nombre", 200, "");
    h.mock.on(Method::Patch, "/api/v1/usuarios/3/correo", 500, "");
    let form = ProfileForm {
        nombre: "Ana María".into(),
        correo: "ana.maria@condor.cl".into(),
    };
    assert!(block_on(form.submit(&h.services)).is_err());
    let profile = h.services.session.cached_profile().expect("profile");
    assert_eq!(profile["nombre"], "Ana María");
    assert_eq!(profile["correo"], "ana@condor.cl");
    assert_eq!(
        h.services.session.current_email().as_deref(),
        Some("ana@condor.cl")
    );
}

#[test]
fn account_deletion_ends_session() {
    let h = harness();
    signed_in(&h, &json!({"id": 3, "nombre": "Ana", "correo": "ana@condor.cl"}));
    h.store.set(
        keys::KNOWN_USERS,
        r#"[{"username":"Ana","email":"ana@condor.cl"}]"#,
    );
    h.mock
        .on_json(Method::Get, BUSCAR, 200, &json!({"id": 3, "correo": "ana@condor.cl"}));
    h.mock.on(Method::Delete, "/api/v1/usuarios/3", 204, "");

    let mismatch = DeleteAccountForm {
        correo: "otra@condor.cl".into(),
    };
    assert!(block_on(mismatch.submit(&h.services)).is_err());
    assert!(h.mock.requests().is_empty());

    let form = DeleteAccountForm {
        correo: "ana@condor.cl".into(),
    };
    let message = block_on(form.submit(&h.services)).expect("deleted");
    assert_eq!(message, "Usuario ana@condor.cl desactivado correctamente.");
    assert!(!h.services.session.is_session_active());
    assert!(!KnownUsers::new(h.store.as_ref()).contains_email("ana@condor.cl"));
}

#[test]
fn recovery_walks_both_steps() {
    let h = harness();
    h.mock.on_json(
        Method::Get,
        "/api/v1/usuarios/preguntas",
        200,
        &json!({"correo": "ana@condor.cl", "pregunta1": "¿Color?", "pregunta2": "¿Mascota?"}),
    );
    h.mock.on(Method::Post, "/api/v1/usuarios/recuperar", 200, "ok");

    let mut flow = RecoveryFlow {
        correo: "ana".into(),
        ..RecoveryFlow::new()
    };
    let err = block_on(flow.request_questions(&h.services.usuarios)).expect_err("bad email");
    assert_eq!(err.banner(), "No has colocado un correo válido.");
    assert!(h.mock.requests().is_empty());

    flow.correo = "ana@condor.cl".into();
    block_on(flow.request_questions(&h.services.usuarios)).expect("questions");
    assert_eq!(
        flow.step,
        RecoveryStep::Questions {
            pregunta1: "¿Color?".into(),
            pregunta2: "¿Mascota?".into(),
        }
    );

    flow.respuesta1 = "rojo".into();
    flow.respuesta2 = "firulais".into();
    flow.nueva_password = "nueva123".into();
    let message =
        block_on(flow.submit(&h.services.usuarios, h.store.as_ref())).expect("recovered");
    assert_eq!(message, "Contraseña actualizada correctamente.");
    let body: Value = h
        .mock
        .last_request()
        .expect("request")
        .json_body()
        .expect("json");
    assert_eq!(body["nuevaPassword"], "nueva123");
    assert_eq!(take_recovery_message(h.store.as_ref()).as_deref(), Some(message.as_str()));
}

#[test]
fn moderator_actions_carry_role_header() {
    let h = harness();
    signed_in(
        &h,
        &json!({"id": 8, "nombre": "Mod", "correo": "mod@condor.cl", "idRol": 2}),
    );
    h.mock.on(Method::Put, "/api/v1/contacto/4", 200, "");
    h.mock.on(Method::Delete, "/api/v1/contacto/4", 204, "");

    let reply = ReplyForm {
        id: Some(4),
        respuesta: "Gracias por escribir".into(),
    };
    let saved = block_on(reply.submit(&h.services.contacto)).expect("reply");
    assert_eq!(saved, "Respuesta guardada y marcado como resuelto.");
    let put = h.mock.last_request().expect("put");
    assert_eq!(put.header(ROLE_HEADER), Some("2"));
    let body: Value = put.json_body().expect("json");
    assert_eq!(body, json!({"respuesta": "Gracias por escribir", "resuelto": true}));

    let deleted = block_on(delete_message(&h.services.contacto, 4)).expect("delete");
    assert_eq!(deleted, "Mensaje eliminado.");
}

#[test]
fn achievement_creation_maps_forbidden() {
    let h = harness();
    h.mock.on(Method::Post, "/api/v1/logros", 403, "");
    let form = AchievementForm {
        nombre: "Explorador".into(),
        descripcion: "Recorre muchos kilómetros".into(),
        id_condicion: Some(1),
        restriccion: "50".into(),
    };
    let err = block_on(form.submit(&h.services.logros)).expect_err("forbidden");
    assert_eq!(
        err.banner(),
        "No autorizado: solo moderadores pueden crear logros."
    );
}
