use super::{ErrorCopy, FormError, invalid_unless_clean};
use crate::models::LoginPayload;
use crate::services::Services;
use crate::validation::{Check, FieldErrors, Rule};
use serde_json::{Value, json};

const CORREO: &[Check<'static>] = &[
    Check::new(Rule::Required, "El Correo es obligatorio."),
    Check::new(Rule::Email, "El Correo no es válido."),
];
const PASSWORD: &[Check<'static>] =
    &[Check::new(Rule::Required, "La Contraseña es obligatoria.")];

const COPY: ErrorCopy = ErrorCopy {
    fixed: &[
        (401, "Correo o contraseña incorrectos."),
        (404, "Usuario no encontrado."),
    ],
    bad_request: "Solicitud inválida.",
    fallback: "Error de autenticación.",
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub correo: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("correo", &self.correo, CORREO);
        errors.check("password", &self.password, PASSWORD);
        errors
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.errors().is_clean()
    }

    /// Authenticate, then fetch and cache the profile and open the session.
    /// Returns the display name.
    ///
    /// # Errors
    /// Validation failures, or the mapped backend failure. A rejected login never
    /// triggers the profile lookup.
    pub async fn submit(&self, services: &Services) -> Result<String, FormError> {
        invalid_unless_clean(self.errors())?;
        let correo = self.correo.trim().to_string();
        let payload = LoginPayload {
            correo: correo.clone(),
            password: self.password.clone(),
        };

        let answer = services
            .usuarios
            .login(&payload)
            .await
            .map_err(|err| COPY.to_form_error(&err))?;
        let profile = services
            .usuarios
            .by_correo(&correo)
            .await
            .map_err(|err| COPY.to_form_error(&err))?;

        let session = &services.session;
        if let Some(token) = answer
            .as_ref()
            .and_then(|body| body.get("token"))
            .and_then(Value::as_str)
            .filter(|token| !token.trim().is_empty())
        {
            session.store_token(token);
        }
        let cached = if profile.is_object() {
            profile
        } else {
            json!({ "correo": correo })
        };
        session.cache_profile(&cached);
        session.start_session(&correo);

        let name = cached
            .get("nombre")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map_or_else(|| correo.clone(), str::to_string);
        log::info!("session started for {correo}");
        Ok(name)
    }
}
