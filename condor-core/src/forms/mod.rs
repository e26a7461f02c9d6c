//! Form models shared by the pages.
//!
//! Every form follows the same cycle: `Idle` until touched, `Editing` while inline errors
//! are recomputed on each change, `Submitting` while the request is in flight, then back
//! to `Idle` on success or to `Editing` with a banner on failure. Client-side checks only
//! gate the submit button; backend rejections are still reported.

pub mod achievement;
pub mod contact;
pub mod login;
pub mod moderation;
pub mod recovery;
pub mod register;
pub mod route;
pub mod settings;

use crate::error::{ApiError, CONNECTION_MESSAGE, DECODE_MESSAGE, plain_body};
use crate::validation::FieldErrors;

pub const SERVER_ERROR: &str = "Error del servidor. Intenta nuevamente más tarde.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Editing,
    Submitting,
}

impl FormPhase {
    /// A field changed. Edits made while a request is in flight do not leave `Submitting`.
    #[must_use]
    pub const fn edit(self) -> Self {
        match self {
            Self::Submitting => Self::Submitting,
            Self::Idle | Self::Editing => Self::Editing,
        }
    }

    /// `None` when a submission is already running.
    #[must_use]
    pub const fn begin_submit(self) -> Option<Self> {
        match self {
            Self::Submitting => None,
            Self::Idle | Self::Editing => Some(Self::Submitting),
        }
    }

    #[must_use]
    pub const fn succeed(self) -> Self {
        Self::Idle
    }

    #[must_use]
    pub const fn fail(self) -> Self {
        Self::Editing
    }

    #[must_use]
    pub const fn is_submitting(self) -> bool {
        matches!(self, Self::Submitting)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Client-side validation failed; nothing was sent.
    #[error("{}", .0.first().unwrap_or("Revisa los campos marcados."))]
    Invalid(FieldErrors),
    /// The backend (or the network) refused; the text is ready for a banner.
    #[error("{0}")]
    Api(String),
}

impl FormError {
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Api(_) => None,
        }
    }

    #[must_use]
    pub fn banner(&self) -> String {
        self.to_string()
    }
}

/// Per-form wording for backend failures.
pub(crate) struct ErrorCopy {
    pub fixed: &'static [(u16, &'static str)],
    pub bad_request: &'static str,
    pub fallback: &'static str,
}

impl ErrorCopy {
    /// Fixed status texts first, then server detail for 400, a generic line for 5xx,
    /// and the server detail or the form's fallback for everything else.
    pub(crate) fn describe(&self, err: &ApiError) -> String {
        let status = err.status();
        if let Some(text) = status.and_then(|code| {
            self.fixed
                .iter()
                .find(|(fixed, _)| *fixed == code)
                .map(|(_, text)| *text)
        }) {
            return text.to_string();
        }
        match status {
            Some(400) => detail(err).unwrap_or_else(|| self.bad_request.to_string()),
            Some(500..=599) => SERVER_ERROR.to_string(),
            _ => detail(err).unwrap_or_else(|| self.fallback.to_string()),
        }
    }

    pub(crate) fn to_form_error(&self, err: &ApiError) -> FormError {
        log::warn!("form submission failed: {err}");
        FormError::Api(self.describe(err))
    }
}

/// Whatever the server said, or the transport-level wording when it said nothing.
pub(crate) fn detail(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Transport(_) => Some(CONNECTION_MESSAGE.to_string()),
        ApiError::Decode(_) | ApiError::Encode(_) => Some(DECODE_MESSAGE.to_string()),
        ApiError::Http { body, .. } => err.server_message().or_else(|| plain_body(body)),
    }
}

pub(crate) fn invalid_unless_clean(errors: FieldErrors) -> Result<(), FormError> {
    if errors.is_clean() {
        Ok(())
    } else {
        Err(FormError::Invalid(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COPY: ErrorCopy = ErrorCopy {
        fixed: &[(401, "Correo o contraseña incorrectos.")],
        bad_request: "Solicitud inválida.",
        fallback: "Error de autenticación.",
    };

    #[test]
    fn phase_cycle() {
        let phase = FormPhase::default().edit();
        assert_eq!(phase, FormPhase::Editing);
        let submitting = phase.begin_submit().expect("can submit");
        assert!(submitting.is_submitting());
        assert_eq!(submitting.begin_submit(), None);
        assert_eq!(submitting.edit(), FormPhase::Submitting);
        assert_eq!(submitting.fail(), FormPhase::Editing);
        assert_eq!(submitting.succeed(), FormPhase::Idle);
    }

    #[test]
    fn describe_orders_fixed_then_status_families() {
        assert_eq!(
            COPY.describe(&ApiError::http(401, r#"{"message":"bad"}"#)),
            "Correo o contraseña incorrectos."
        );
        assert_eq!(COPY.describe(&ApiError::http(400, "")), "Solicitud inválida.");
        assert_eq!(
            COPY.describe(&ApiError::http(400, r#"{"message":"Correo requerido"}"#)),
            "Correo requerido"
        );
        assert_eq!(COPY.describe(&ApiError::http(502, "boom")), SERVER_ERROR);
        assert_eq!(COPY.describe(&ApiError::http(418, "")), "Error de autenticación.");
        assert_eq!(
            COPY.describe(&ApiError::Transport("offline".into())),
            CONNECTION_MESSAGE
        );
    }

    #[test]
    fn invalid_error_displays_first_field_message() {
        let mut errors = FieldErrors::new();
        errors.insert("correo", "El Correo no es válido.");
        let err = FormError::Invalid(errors);
        assert_eq!(err.banner(), "El Correo no es válido.");
        assert!(err.field_errors().is_some());
    }
}
