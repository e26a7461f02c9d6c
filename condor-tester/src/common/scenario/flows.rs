//! Core flows that only make sense against the scripted backend.

use anyhow::{Result, anyhow, bail, ensure};
use futures::executor::block_on;
use serde_json::{Value, json};

use super::TestScenario;
use crate::logic::Fixture;
use condor_core::forms::login::LoginForm;
use condor_core::forms::register::RegisterForm;
use condor_core::rating::{RatingAccess, RatingDraft};
use condor_core::storage::keys;
use condor_core::{
    ApiError, KeyValueStore, KnownUsers, Method, RatingGate, RoleFlags, RouteCatalogs,
    RouteListing,
};

const USUARIOS: &str = "/api/v1/usuarios";
const LOGIN: &str = "/api/v1/usuarios/login";
const BUSCAR: &str = "/api/v1/usuarios/buscar";
const RATINGS: &str = "/api/v1/calificaciones";
const EXISTE: &str = "/api/v1/calificaciones/existe";

pub const REGISTER_DUPLICATE: TestScenario = TestScenario::new(
    "register-duplicate",
    "Register With Known Email",
    register_duplicate,
);
pub const REGISTER_NEW: TestScenario =
    TestScenario::new("register-new", "Register New Account", register_new);
pub const LOGIN_UNAUTHORIZED: TestScenario = TestScenario::new(
    "login-unauthorized",
    "Login With Bad Credentials",
    login_unauthorized,
);
pub const SESSION_LOGOUT: TestScenario =
    TestScenario::new("session-logout", "Login Then Logout", session_logout);
pub const RATING_ONCE: TestScenario =
    TestScenario::new("rating-once", "One Rating Per Route", rating_once);
pub const CATALOG_JOIN: TestScenario =
    TestScenario::new("catalog-join", "Catalog Join And Listings", catalog_join);

fn registration(correo: &str, username: &str) -> RegisterForm {
    RegisterForm {
        correo: correo.into(),
        username: username.into(),
        password: "abcdef".into(),
        confirm: "abcdef".into(),
        ..RegisterForm::default()
    }
}

fn register_duplicate() -> Result<()> {
    let fixture = Fixture::new();
    fixture.store.set(
        keys::KNOWN_USERS,
        r#"[{"username":"Exist","email":"exist@a.com"}]"#,
    );

    let Err(err) = block_on(registration("EXIST@a.com", "Otro").submit(&fixture.services)) else {
        bail!("duplicate email was accepted");
    };
    let copy = err.field_errors().and_then(|errors| errors.get("correo"));
    ensure!(
        copy == Some("El Correo ya está registrado."),
        "unexpected duplicate copy: {copy:?}"
    );
    ensure!(
        fixture.mock.requests().is_empty(),
        "duplicate registration reached the backend"
    );
    Ok(())
}

fn register_new() -> Result<()> {
    let fixture = Fixture::new();
    fixture.mock.on(Method::Post, USUARIOS, 201, r#"{"id":12}"#);

    let message = block_on(registration("nuevo@a.com", "Nuevo").submit(&fixture.services))
        .map_err(|err| anyhow!("registration failed: {}", err.banner()))?;
    ensure!(message.contains("Nuevo"), "greeting lacks the name: {message}");
    ensure!(
        KnownUsers::new(fixture.store.as_ref()).contains_email("nuevo@a.com"),
        "new account was not remembered"
    );

    let body: Value = fixture
        .mock
        .last_request()
        .ok_or_else(|| anyhow!("no request recorded"))?
        .json_body()
        .map_err(|err| anyhow!("request body: {err}"))?;
    ensure!(body["idRol"] == 3, "new accounts must be members: {body}");
    Ok(())
}

fn login_unauthorized() -> Result<()> {
    let fixture = Fixture::new();
    fixture
        .mock
        .on(Method::Post, LOGIN, 401, r#"{"message":"bad credentials"}"#);

    let form = LoginForm {
        correo: "ana@condor.cl".into(),
        password: "wrong".into(),
    };
    let Err(err) = block_on(form.submit(&fixture.services)) else {
        bail!("rejected credentials opened a session");
    };
    ensure!(
        err.banner() == "Correo o contraseña incorrectos.",
        "unexpected banner: {}",
        err.banner()
    );
    ensure!(
        !fixture.mock.called(Method::Get, BUSCAR),
        "profile lookup ran after a 401"
    );
    ensure!(
        !fixture.services.session.is_session_active(),
        "session opened after a 401"
    );
    Ok(())
}

fn session_logout() -> Result<()> {
    let fixture = Fixture::new();
    fixture.mock.on(Method::Post, LOGIN, 200, r#"{"token":"abc"}"#);
    fixture.mock.on_json(
        Method::Get,
        BUSCAR,
        200,
        &json!({"id": 1, "nombre": "Admin", "correo": "admin@condor.cl", "idRol": 1}),
    );

    let form = LoginForm {
        correo: "admin@condor.cl".into(),
        password: "secreto".into(),
    };
    block_on(form.submit(&fixture.services))
        .map_err(|err| anyhow!("login failed: {}", err.banner()))?;
    let session = &fixture.services.session;
    ensure!(session.role_flags().is_admin, "admin flag not derived");

    session.end_session();
    ensure!(!session.is_session_active(), "session still active");
    ensure!(session.role_flags() == RoleFlags::NONE, "flags survived logout");
    for key in [keys::CURRENT_EMAIL, keys::CACHED_PROFILE, keys::TOKEN] {
        ensure!(fixture.store.get(key).is_none(), "{key} survived logout");
    }
    Ok(())
}

fn rating_once() -> Result<()> {
    let fixture = Fixture::new();
    fixture.sign_in(&json!({"id": 4, "nombre": "Ana", "correo": "ana@condor.cl"}));
    fixture
        .mock
        .on(Method::Get, EXISTE, 200, r#"{"existe":false}"#);
    fixture.mock.on(Method::Post, RATINGS, 201, "");

    let RatingAccess::Member(usuario) = RatingAccess::from_session(&fixture.services.session)
    else {
        bail!("signed-in member cannot rate");
    };
    let calificaciones = &fixture.services.calificaciones;
    let gate = block_on(RatingGate::check(calificaciones, usuario, 9));
    ensure!(gate == RatingGate::Open, "fresh route should be open, got {gate:?}");

    let draft = RatingDraft {
        puntuacion: 4,
        comentario: "Buena vista".into(),
    };
    let first = block_on(gate.submit(calificaciones, usuario, 9, &draft));
    ensure!(first.gate.is_closed(), "gate stayed open after rating");

    let again = block_on(first.gate.submit(calificaciones, usuario, 9, &draft));
    ensure!(again.gate.is_closed(), "closed gate reopened");
    let posts = fixture.mock.count(Method::Post, RATINGS);
    ensure!(posts == 1, "expected 1 POST, saw {posts}");
    Ok(())
}

fn script_catalogs(fixture: &Fixture) {
    let mock = &fixture.mock;
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
        &json!([{"id": 2, "nombre": "MEDIA"}]),
    );
    mock.on_json(
        Method::Get,
        "/api/v1/regiones",
        200,
        &json!([{"idRegion": 5, "nombre": "Valparaíso"}]),
    );
}

fn catalog_join() -> Result<()> {
    let fixture = Fixture::new();
    script_catalogs(&fixture);
    fixture.mock.on_json(
        Method::Get,
        "/api/v1/estados",
        200,
        &json!([{"id": 1, "nombre": "Publicada"}]),
    );
    fixture.mock.on_json(
        Method::Get,
        "/api/v1/rutas",
        200,
        &json!([
            {"idRuta": 7, "nombre": "La Campana", "idTipo": 1, "idDificultad": 2,
             "idRegion": 5, "activo": true},
            {"idRuta": 8, "nombre": "Quebrada", "idTipo": 2, "activo": true}
        ]),
    );

    let official = block_on(RouteListing::Official.load(&fixture.services))
        .map_err(|err| anyhow!("official listing: {}", err.user_message()))?;
    ensure!(official.len() == 1, "expected 1 official route, got {}", official.len());
    let route = &official[0];
    ensure!(
        route.dificultad.as_deref() == Some("MEDIA"),
        "difficulty not resolved: {:?}",
        route.dificultad
    );
    ensure!(
        route.region.as_deref() == Some("Valparaíso"),
        "region not resolved: {:?}",
        route.region
    );

    let broken = Fixture::new();
    script_catalogs(&broken);
    broken.mock.on(Method::Get, "/api/v1/estados", 500, "");
    match block_on(RouteCatalogs::load(&broken.services)) {
        Err(err) if err == ApiError::http(500, "") => Ok(()),
        Err(err) => bail!("unexpected join failure: {err}"),
        Ok(_) => bail!("join succeeded with a failing catalog"),
    }
}
