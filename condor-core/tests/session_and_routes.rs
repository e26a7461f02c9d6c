use std::cell::RefCell;
use std::rc::Rc;

use condor_core::mock::MockBackend;
use condor_core::rating::{RatingAccess, RatingDraft};
use condor_core::storage::keys;
use condor_core::{
    ApiConfig, ApiError, KeyValueStore, MemoryStore, Method, RatingGate, RoleFlags, RouteCatalogs,
    RouteListing, RouteSummary, Services, SessionContext,
};
use futures::executor::block_on;
use serde_json::json;

const RATINGS: &str = "/api/v1/calificaciones";
const EXISTE: &str = "/api/v1/calificaciones/existe";

fn services_over(mock: &Rc<MockBackend>, store: &Rc<MemoryStore>) -> Services {
    Services::new(
        ApiConfig::uniform("http://backend.test"),
        mock.clone(),
        store.clone(),
    )
}

fn script_catalogs(mock: &MockBackend) {
    mock.on_json(
        Method::Get,
        "/api/v1/rutas/tipo",
        200,
        &json!([{"id": 1, "nombre": "OFICIAL"}, {"id": 2, "nombre": "COMUNITARIA"}]),
    );
    mock.on_json(
        Method::Get,
        "/api/v1/rutas/dificultad",
        200,
        &json!([{"id": 1, "nombre": "FACIL"}, {"id": 3, "nombre": "DIFICIL"}]),
    );
    mock.on_json(
        Method::Get,
        "/api/v1/regiones",
        200,
        &json!([{"idRegion": 13, "nombre": "Metropolitana"}]),
    );
}

fn script_estados(mock: &MockBackend) {
    mock.on_json(
        Method::Get,
        "/api/v1/estados",
        200,
        &json!([{"id": 1, "nombre": "Publicada"}]),
    );
}

#[test]
fn ending_session_drops_flags_even_with_stale_profile() {
    let store = Rc::new(MemoryStore::new());
    let session = SessionContext::new(store.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = seen.clone();
        session.subscribe(move |snapshot| seen.borrow_mut().push(snapshot.flags))
    };

    session.cache_profile(&json!({"id": 1, "idRol": 1}));
    session.start_session("admin@condor.cl");
    assert!(session.role_flags().is_admin);

    session.end_session();
    assert_eq!(session.role_flags(), RoleFlags::NONE);
    assert_eq!(seen.borrow().last().copied(), Some(RoleFlags::NONE));

    // Another tab leaves a profile behind without re-opening the session.
    store.set(keys::CACHED_PROFILE, r#"{"idRol":1}"#);
    assert!(session.handle_external_change(Some(keys::CACHED_PROFILE)));
    assert_eq!(session.role_flags(), RoleFlags::NONE);
    assert_eq!(seen.borrow().last().copied(), Some(RoleFlags::NONE));
}

#[test]
fn rating_is_accepted_once_per_route() {
    let mock = Rc::new(MockBackend::new());
    let store = Rc::new(MemoryStore::new());
    let services = services_over(&mock, &store);
    services.session.cache_profile(&json!({"id": 4, "correo": "ana@condor.cl"}));
    services.session.start_session("ana@condor.cl");

    let RatingAccess::Member(usuario) = RatingAccess::from_session(&services.session) else {
        panic!("signed-in user must be able to rate");
    };
    mock.on(Method::Get, EXISTE, 200, r#"{"existe":false}"#);
    mock.on(Method::Post, RATINGS, 201, "");
    mock.on(Method::Post, RATINGS, 409, "");

    let draft = RatingDraft {
        puntuacion: 5,
        comentario: " Muy linda ".into(),
    };
    let gate = block_on(RatingGate::check(&services.calificaciones, usuario, 9));
    assert_eq!(gate, RatingGate::Open);

    let first = block_on(gate.submit(&services.calificaciones, usuario, 9, &draft));
    assert_eq!(first.gate, RatingGate::AlreadyRated);
    let request = mock.last_request().expect("create");
    let body: serde_json::Value = request.json_body().expect("json");
    assert_eq!(
        body,
        json!({"idUsuario": 4, "idRuta": 9, "puntuacion": 5, "comentario": "Muy linda"})
    );

    let again = block_on(first.gate.submit(&services.calificaciones, usuario, 9, &draft));
    assert_eq!(again.gate, RatingGate::AlreadyRated);
    assert_eq!(mock.count(Method::Post, RATINGS), 1);

    // A second session that checked before the first submit still ends closed.
    let raced = block_on(RatingGate::Open.submit(&services.calificaciones, usuario, 9, &draft));
    assert_eq!(raced.gate, RatingGate::AlreadyRated);
    assert_eq!(mock.count(Method::Post, RATINGS), 2);
}

#[test]
fn anonymous_visitors_cannot_rate() {
    let store = Rc::new(MemoryStore::with_entries([
        (keys::SESSION_ACTIVE, "false"),
        (keys::CACHED_PROFILE, r#"{"id":4}"#),
    ]));
    let session = SessionContext::new(store);
    assert_eq!(RatingAccess::from_session(&session), RatingAccess::Anonymous);
}

#[test]
fn catalog_join_fails_as_a_whole() {
    let mock = Rc::new(MockBackend::new());
    let store = Rc::new(MemoryStore::new());
    let services = services_over(&mock, &store);
    script_catalogs(&mock);
    mock.on(Method::Get, "/api/v1/estados", 500, "");

    let err = block_on(RouteCatalogs::load(&services)).expect_err("join fails");
    assert_eq!(err, ApiError::http(500, ""));
}

#[test]
fn official_listing_resolves_names_and_hides_banned_routes() {
    let mock = Rc::new(MockBackend::new());
    let store = Rc::new(MemoryStore::new());
    let services = services_over(&mock, &store);
    script_catalogs(&mock);
    script_estados(&mock);
    mock.on_json(
        Method::Get,
        "/api/v1/rutas",
        200,
        &json!([
            {"idRuta": 1, "nombre": "Cerro Renca", "idTipo": 1, "idDificultad": 1,
             "idRegion": 13, "promCalificacion": 4.4, "activo": true},
            {"idRuta": 2, "nombre": "Sendero vecinal", "idTipo": 2, "activo": true},
            {"idRuta": 3, "nombre": "Cerrada", "idTipo": 1, "activo": true, "f_baneo": true},
            {"idRuta": 4, "nombre": "Inactiva", "idTipo": 1, "activo": false}
        ]),
    );

    let official = block_on(RouteListing::Official.load(&services)).expect("listing");
    assert_eq!(official.len(), 1);
    let summary = &official[0];
    assert_eq!(summary.nombre, "Cerro Renca");
    assert_eq!(summary.dificultad.as_deref(), Some("FACIL"));
    assert_eq!(summary.region.as_deref(), Some("Metropolitana"));

    let community = block_on(RouteListing::Community.load(&services)).expect("listing");
    assert_eq!(community.len(), 1);
    assert_eq!(community[0].id, Some(2));
}

#[test]
fn route_detail_needs_every_catalog() {
    let mock = Rc::new(MockBackend::new());
    let store = Rc::new(MemoryStore::new());
    let services = services_over(&mock, &store);
    script_catalogs(&mock);
    mock.on_json(
        Method::Get,
        "/api/v1/rutas/1",
        200,
        &json!({"idRuta": 1, "nombre": "Cerro Renca", "idDificultad": 3, "idRegion": 13}),
    );
    mock.on(Method::Get, "/api/v1/estados", 503, "");
    script_estados(&mock);
    let err = block_on(RouteSummary::load(&services, 1)).expect_err("partial join");
    assert_eq!(err.status(), Some(503));

    let summary = block_on(RouteSummary::load(&services, 1)).expect("detail");
    assert_eq!(summary.dificultad.as_deref(), Some("DIFICIL"));
    assert_eq!(summary.region.as_deref(), Some("Metropolitana"));
}
