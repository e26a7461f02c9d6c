//! Account settings: profile edits and account deactivation.

use super::{ErrorCopy, FormError, invalid_unless_clean};
use crate::error::ApiError;
use crate::models::Usuario;
use crate::registry::KnownUsers;
use crate::services::Services;
use crate::validation::{Check, FieldErrors, Rule, is_email, validate};

const NOMBRE: &[Check<'static>] = &[
    Check::new(Rule::Required, "El nombre no puede estar vacío."),
    Check::new(
        Rule::MaxChars(100),
        "El nombre no puede exceder 100 caracteres.",
    ),
];
const CORREO: &[Check<'static>] = &[
    Check::new(Rule::Required, "Introduce un correo válido."),
    Check::new(Rule::Email, "Introduce un correo válido."),
];

const PROFILE_COPY: ErrorCopy = ErrorCopy {
    fixed: &[(404, "Usuario no encontrado.")],
    bad_request: "Solicitud inválida.",
    fallback: "Error al actualizar perfil.",
};
const DELETE_COPY: ErrorCopy = ErrorCopy {
    fixed: &[(404, "Usuario no encontrado.")],
    bad_request: "Solicitud inválida.",
    fallback: "Error al eliminar usuario.",
};

pub const DELETE_CONFIRMATION: &str =
    "¿Esta seguro que quiere desactivar su cuenta? Esta acción es irreversible.";

fn missing_session() -> FormError {
    FormError::Api("Inicia sesión para modificar tu cuenta.".to_string())
}

async fn lookup(services: &Services, correo: &str, copy: &ErrorCopy) -> Result<Usuario, FormError> {
    let profile = services
        .usuarios
        .by_correo(correo)
        .await
        .map_err(|err| copy.to_form_error(&err))?;
    let usuario = Usuario::from_value(&profile);
    if usuario.id.is_none() {
        return Err(copy.to_form_error(&ApiError::http(404, "")));
    }
    Ok(usuario)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    pub nombre: String,
    pub correo: String,
}

impl ProfileForm {
    /// Prefill from the cached profile and the session email.
    #[must_use]
    pub fn from_session(services: &Services) -> Self {
        let session = &services.session;
        let cached = session.cached_profile().map(|profile| Usuario::from_value(&profile));
        Self {
            nombre: cached.as_ref().map(|u| u.nombre.clone()).unwrap_or_default(),
            correo: session.current_email().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("nombre", self.nombre.trim(), NOMBRE);
        errors.check("correo", &self.correo, CORREO);
        errors
    }

    /// PATCH only the fields that differ from the stored account, then keep the session's
    /// email and cached profile in step.
    ///
    /// # Errors
    /// Validation failures, a missing session, or the mapped backend failure.
    pub async fn submit(&self, services: &Services) -> Result<String, FormError> {
        invalid_unless_clean(self.errors())?;
        let current = services.session.current_email().ok_or_else(missing_session)?;
        let usuario = lookup(services, &current, &PROFILE_COPY).await?;
        let Some(id) = usuario.id else {
            return Err(missing_session());
        };

        let nombre = self.nombre.trim();
        let correo = self.correo.trim();
        let mut renamed = None;
        let mut moved = None;
        if usuario.nombre != nombre {
            services
                .usuarios
                .update_nombre(id, nombre)
                .await
                .map_err(|err| PROFILE_COPY.to_form_error(&err))?;
            renamed = Some(nombre);
        }
        if !usuario.correo.eq_ignore_ascii_case(correo) {
            if let Err(err) = services.usuarios.update_correo(id, correo).await {
                if renamed.is_some() {
                    services.session.update_identity(None, renamed);
                }
                return Err(PROFILE_COPY.to_form_error(&err));
            }
            moved = Some(correo);
        }
        if renamed.is_some() || moved.is_some() {
            services.session.update_identity(moved, renamed);
        }
        Ok("Perfil actualizado correctamente.".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteAccountForm {
    pub correo: String,
}

impl DeleteAccountForm {
    /// The typed email must be well formed and match the signed-in account.
    #[must_use]
    pub fn error(&self, session_email: Option<&str>) -> Option<&'static str> {
        validate(&self.correo, CORREO).or_else(|| {
            let matches = session_email.is_some_and(|email| {
                is_email(email) && email.trim().eq_ignore_ascii_case(self.correo.trim())
            });
            (!matches).then_some("Correos no coinciden.")
        })
    }

    /// Look the account up, deactivate it and close the session.
    ///
    /// # Errors
    /// Validation failures or the mapped backend failure.
    pub async fn submit(&self, services: &Services) -> Result<String, FormError> {
        let session_email = services.session.current_email();
        if let Some(message) = self.error(session_email.as_deref()) {
            let mut errors = FieldErrors::new();
            errors.insert("correo", message);
            return Err(FormError::Invalid(errors));
        }
        let correo = self.correo.trim();
        let usuario = lookup(services, correo, &DELETE_COPY).await?;
        let Some(id) = usuario.id else {
            return Err(missing_session());
        };
        services
            .usuarios
            .delete(id)
            .await
            .map_err(|err| DELETE_COPY.to_form_error(&err))?;
        KnownUsers::new(services.store()).remove_email(correo);
        services.session.end_session();
        log::info!("account {correo} deactivated");
        Ok(format!("Usuario {correo} desactivado correctamente."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_rules() {
        let long = ProfileForm {
            nombre: "x".repeat(101),
            correo: "ana@condor.cl".into(),
        };
        assert_eq!(
            long.errors().get("nombre"),
            Some("El nombre no puede exceder 100 caracteres.")
        );
        let blank = ProfileForm {
            nombre: "   ".into(),
            correo: "nope".into(),
        };
        let errors = blank.errors();
        assert_eq!(errors.get("nombre"), Some("El nombre no puede estar vacío."));
        assert_eq!(errors.get("correo"), Some("Introduce un correo válido."));
    }

    #[test]
    fn delete_requires_matching_session_email() {
        let form = DeleteAccountForm {
            correo: "ana@condor.cl".into(),
        };
        assert_eq!(form.error(Some("ana@condor.cl")), None);
        assert_eq!(form.error(Some("leo@condor.cl")), Some("Correos no coinciden."));
        assert_eq!(form.error(None), Some("Correos no coinciden."));
        let bad = DeleteAccountForm {
            correo: "ana".into(),
        };
        assert_eq!(bad.error(Some("ana@condor.cl")), Some("Introduce un correo válido."));
    }
}
