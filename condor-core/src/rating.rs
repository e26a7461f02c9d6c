//! One rating per user and route.
//!
//! The page asks the ratings backend whether the pair already has a rating before it shows
//! the control. That check can race with another session, so a 409 from the create call
//! closes the gate exactly like a successful submit does.

use crate::models::NuevaCalificacion;
use crate::notice::Notice;
use crate::services::CalificacionesService;
use crate::session::SessionContext;

pub const LOGIN_PROMPT: &str = "Inicia sesión para calificar esta ruta.";
pub const ALREADY_RATED: &str = "Ya calificaste esta ruta.";
pub const THANKS: &str = "¡Gracias por calificar esta ruta!";
const BAD_SCORE: &str = "Elige una puntuación entre 1 y 5 estrellas.";

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Who is looking at the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAccess {
    Anonymous,
    Member(i64),
}

impl RatingAccess {
    /// A member needs both an active session and a cached profile carrying an id.
    #[must_use]
    pub fn from_session(session: &SessionContext) -> Self {
        match session.user_id() {
            Some(id) if session.is_session_active() => Self::Member(id),
            _ => Self::Anonymous,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingGate {
    /// Existence not checked yet.
    #[default]
    Unknown,
    Open,
    Submitting,
    AlreadyRated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDraft {
    pub puntuacion: u8,
    pub comentario: String,
}

impl RatingDraft {
    #[must_use]
    pub const fn score_is_valid(&self) -> bool {
        self.puntuacion >= MIN_SCORE && self.puntuacion <= MAX_SCORE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingOutcome {
    pub gate: RatingGate,
    pub notice: Notice,
}

impl RatingGate {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::AlreadyRated)
    }

    /// Ask the backend whether `usuario` already rated `ruta`. A failed check leaves the
    /// control open; the create call's 409 still protects the pair.
    pub async fn check(calificaciones: &CalificacionesService, usuario: i64, ruta: i64) -> Self {
        match calificaciones.exists(usuario, ruta).await {
            Ok(true) => Self::AlreadyRated,
            Ok(false) => Self::Open,
            Err(err) => {
                log::warn!("rating existence check failed for route {ruta}: {err}");
                Self::Open
            }
        }
    }

    /// Send one rating. Only an open gate issues a request.
    pub async fn submit(
        self,
        calificaciones: &CalificacionesService,
        usuario: i64,
        ruta: i64,
        draft: &RatingDraft,
    ) -> RatingOutcome {
        match self {
            Self::Open => {}
            Self::AlreadyRated => {
                return RatingOutcome {
                    gate: self,
                    notice: Notice::info(ALREADY_RATED),
                };
            }
            Self::Unknown | Self::Submitting => {
                log::debug!("rating submit ignored while gate is {self:?}");
                return RatingOutcome {
                    gate: self,
                    notice: Notice::info("Espera un momento..."),
                };
            }
        }
        if !draft.score_is_valid() {
            return RatingOutcome {
                gate: Self::Open,
                notice: Notice::danger(BAD_SCORE),
            };
        }

        let comentario = draft.comentario.trim();
        let payload = NuevaCalificacion {
            id_usuario: usuario,
            id_ruta: ruta,
            puntuacion: draft.puntuacion,
            comentario: (!comentario.is_empty()).then(|| comentario.to_string()),
        };
        match calificaciones.create(&payload).await {
            Ok(()) => {
                log::info!("user {usuario} rated route {ruta} with {}", draft.puntuacion);
                RatingOutcome {
                    gate: Self::AlreadyRated,
                    notice: Notice::success(THANKS),
                }
            }
            Err(err) if err.is_conflict() => {
                log::info!("route {ruta} was already rated by user {usuario}");
                RatingOutcome {
                    gate: Self::AlreadyRated,
                    notice: Notice::info(ALREADY_RATED),
                }
            }
            Err(err) => {
                log::warn!("rating for route {ruta} failed: {err}");
                RatingOutcome {
                    gate: Self::Open,
                    notice: Notice::from_error(&err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::http::Method;
    use crate::mock::MockBackend;
    use crate::notice::NoticeKind;
    use crate::services::Services;
    use crate::storage::MemoryStore;
    use futures::executor::block_on;
    use std::rc::Rc;

    const CREATE: &str = "/api/v1/calificaciones";

    fn services(mock: &Rc<MockBackend>) -> Services {
        Services::new(ApiConfig::default(), mock.clone(), Rc::new(MemoryStore::new()))
    }

    fn draft(puntuacion: u8) -> RatingDraft {
        RatingDraft {
            puntuacion,
            comentario: String::new(),
        }
    }

    #[test]
    fn existing_rating_closes_gate() {
        let mock = Rc::new(MockBackend::new());
        mock.on(Method::Get, "/api/v1/calificaciones/existe", 200, r#"{"existe":true}"#);
        let gate = block_on(RatingGate::check(&services(&mock).calificaciones, 1, 9));
        assert_eq!(gate, RatingGate::AlreadyRated);
    }

    #[test]
    fn conflict_closes_gate_like_success() {
        let mock = Rc::new(MockBackend::new());
        mock.on(Method::Post, CREATE, 409, "");
        let services = services(&mock);
        let outcome = block_on(RatingGate::Open.submit(&services.calificaciones, 1, 9, &draft(4)));
        assert_eq!(outcome.gate, RatingGate::AlreadyRated);
        assert_eq!(outcome.notice.kind, NoticeKind::Info);
    }

    #[test]
    fn server_failure_keeps_gate_open() {
        let mock = Rc::new(MockBackend::new());
        mock.on(Method::Post, CREATE, 500, "");
        let services = services(&mock);
        let outcome = block_on(RatingGate::Open.submit(&services.calificaciones, 1, 9, &draft(4)));
        assert_eq!(outcome.gate, RatingGate::Open);
        assert_eq!(outcome.notice.kind, NoticeKind::Danger);
    }

    #[test]
    fn out_of_range_score_is_not_sent() {
        let mock = Rc::new(MockBackend::new());
        let services = services(&mock);
        let outcome = block_on(RatingGate::Open.submit(&services.calificaciones, 1, 9, &draft(6)));
        assert_eq!(outcome.notice.text, BAD_SCORE);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn closed_gate_never_calls_backend() {
        let mock = Rc::new(MockBackend::new());
        let services = services(&mock);
        let outcome =
            block_on(RatingGate::AlreadyRated.submit(&services.calificaciones, 1, 9, &draft(5)));
        assert_eq!(outcome.gate, RatingGate::AlreadyRated);
        assert!(mock.requests().is_empty());
    }
}
