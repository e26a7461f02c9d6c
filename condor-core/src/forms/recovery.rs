//! Two-step password recovery: email first, then the account's security questions.

use super::{FormError, detail, invalid_unless_clean};
use crate::error::ApiError;
use crate::models::RecuperarPayload;
use crate::services::UsuariosService;
use crate::storage::{KeyValueStore, keys};
use crate::validation::{Check, FieldErrors, Rule, is_email};

pub const UPDATED: &str = "Contraseña actualizada correctamente.";
/// Delay before a finished recovery resets to the email step.
pub const RESET_DELAY_MS: u32 = 1300;

const BAD_EMAIL: &str = "No has colocado un correo válido.";
const FALLBACK: &str = "Error al recuperar contraseña.";

const RESPUESTA: &[Check<'static>] =
    &[Check::new(Rule::Required, "Por favor responda la pregunta.")];
const PASSWORD: &[Check<'static>] = &[
    Check::new(Rule::Required, "Por favor ingrese la nueva contraseña."),
    Check::new(
        Rule::MinChars(6),
        "La contraseña debe tener al menos 6 caracteres.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecoveryStep {
    #[default]
    Email,
    Questions {
        pregunta1: String,
        pregunta2: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecoveryFlow {
    pub step: RecoveryStep,
    pub correo: String,
    pub respuesta1: String,
    pub respuesta2: String,
    pub nueva_password: String,
}

impl RecoveryFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the email step, keeping the typed email.
    pub fn back(&mut self) {
        self.step = RecoveryStep::Email;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn answer_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("respuesta1", &self.respuesta1, RESPUESTA);
        errors.check("respuesta2", &self.respuesta2, RESPUESTA);
        errors.check("nueva_password", &self.nueva_password, PASSWORD);
        errors
    }

    /// Step 1: fetch the questions registered for the typed email.
    ///
    /// # Errors
    /// A malformed email never reaches the backend; lookup failures use the server's text
    /// when it sent one.
    pub async fn request_questions(&mut self, usuarios: &UsuariosService) -> Result<(), FormError> {
        let correo = self.correo.trim().to_string();
        if !is_email(&correo) {
            let mut errors = FieldErrors::new();
            errors.insert("correo", BAD_EMAIL);
            return Err(FormError::Invalid(errors));
        }
        let preguntas = usuarios.preguntas(&correo).await.map_err(|err| {
            log::warn!("security questions lookup failed: {err}");
            FormError::Api(server_text(&err).unwrap_or_else(|| BAD_EMAIL.to_string()))
        })?;
        self.step = RecoveryStep::Questions {
            pregunta1: preguntas.pregunta1,
            pregunta2: preguntas.pregunta2,
        };
        Ok(())
    }

    /// Step 2: send the answers with the new password. On success the confirmation is also
    /// left for the login page.
    ///
    /// # Errors
    /// Validation failures, or the backend's refusal (often a bare string body).
    pub async fn submit(
        &self,
        usuarios: &UsuariosService,
        store: &dyn KeyValueStore,
    ) -> Result<String, FormError> {
        if self.step == RecoveryStep::Email {
            return Err(FormError::Api(BAD_EMAIL.to_string()));
        }
        invalid_unless_clean(self.answer_errors())?;
        let payload = RecuperarPayload {
            correo: self.correo.trim().to_string(),
            respuesta_seguridad1: self.respuesta1.clone(),
            respuesta_seguridad2: self.respuesta2.clone(),
            nueva_password: self.nueva_password.clone(),
        };
        usuarios.recuperar(&payload).await.map_err(|err| {
            log::warn!("password recovery failed: {err}");
            FormError::Api(server_text(&err).unwrap_or_else(|| FALLBACK.to_string()))
        })?;
        store.set(keys::RECOVERY_MESSAGE, UPDATED);
        log::info!("password recovered for {}", payload.correo);
        Ok(UPDATED.to_string())
    }
}

fn server_text(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Http { .. } => detail(err),
        _ => Some(err.user_message()),
    }
}

/// Read and forget the one-shot message left by a finished recovery.
pub fn take_recovery_message(store: &dyn KeyValueStore) -> Option<String> {
    let message = store
        .get(keys::RECOVERY_MESSAGE)
        .filter(|text| !text.trim().is_empty());
    store.remove(keys::RECOVERY_MESSAGE);
    message
}
