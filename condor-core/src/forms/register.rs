use super::{ErrorCopy, FormError, invalid_unless_clean};
use crate::models::RegistroPayload;
use crate::registry::{KnownUser, KnownUsers};
use crate::services::Services;
use crate::validation::{Check, FieldErrors, Rule, validate};

pub const PREGUNTAS_1: [&str; 3] = [
    "¿Cuál es tu color favorito?",
    "¿Cuál fue el nombre de tu primera escuela?",
    "¿Cuál es el nombre de tu ciudad natal?",
];
pub const PREGUNTAS_2: [&str; 3] = [
    "¿Cuál fue el nombre de tu primera mascota?",
    "¿Cuál es el segundo nombre de tu padre?",
    "¿Cuál es el nombre de tu mejor amigo de la infancia?",
];

/// Delay before the page moves on to `/login` after a successful registration.
pub const REDIRECT_DELAY_MS: u32 = 1200;

const DEFAULT_REGION: i64 = 1;
const MEMBER_ROLE: i64 = 3;
const DUPLICATE: &str = "El Correo ya está registrado.";

const CORREO: &[Check<'static>] = &[
    Check::new(Rule::Required, "El Correo es obligatorio."),
    Check::new(Rule::Email, "El Correo no es válido."),
];
const USERNAME: &[Check<'static>] = &[Check::new(Rule::Required, "El Username es obligatorio.")];
const PASSWORD: &[Check<'static>] = &[
    Check::new(Rule::Required, "La Contraseña es obligatoria."),
    Check::new(
        Rule::MinChars(6),
        "La Contraseña debe tener al menos 6 caracteres.",
    ),
];

const COPY: ErrorCopy = ErrorCopy {
    fixed: &[(409, "El correo ya está registrado.")],
    bad_request: "Datos inválidos.",
    fallback: "Error al registrar.",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub correo: String,
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub pregunta1: String,
    pub respuesta1: String,
    pub pregunta2: String,
    pub respuesta2: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            correo: String::new(),
            username: String::new(),
            password: String::new(),
            confirm: String::new(),
            pregunta1: PREGUNTAS_1[0].to_string(),
            respuesta1: String::new(),
            pregunta2: PREGUNTAS_2[0].to_string(),
            respuesta2: String::new(),
        }
    }
}

impl RegisterForm {
    /// Shape checks plus the local duplicate check.
    #[must_use]
    pub fn correo_error(&self, known: &KnownUsers<'_>) -> Option<&'static str> {
        validate(&self.correo, CORREO)
            .or_else(|| known.contains_email(&self.correo).then_some(DUPLICATE))
    }

    #[must_use]
    pub fn confirm_error(&self) -> Option<&'static str> {
        let checks = [Check::new(
            Rule::Matches(&self.password),
            "Las contraseñas no coinciden.",
        )];
        validate(&self.confirm, &checks)
    }

    #[must_use]
    pub fn errors(&self, known: &KnownUsers<'_>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.set("correo", self.correo_error(known).map(str::to_string));
        errors.check("username", &self.username, USERNAME);
        errors.check("password", &self.password, PASSWORD);
        errors.set("confirm", self.confirm_error().map(str::to_string));
        errors
    }

    #[must_use]
    pub fn payload(&self) -> RegistroPayload {
        RegistroPayload {
            nombre: self.username.trim().to_string(),
            correo: self.correo.trim().to_string(),
            contrasena: self.password.clone(),
            id_region: DEFAULT_REGION,
            id_rol: MEMBER_ROLE,
            pregunta_seguridad1: self.pregunta1.clone(),
            respuesta_seguridad1: self.respuesta1.trim().to_string(),
            pregunta_seguridad2: self.pregunta2.clone(),
            respuesta_seguridad2: self.respuesta2.trim().to_string(),
            foto_perfil_base64: None,
        }
    }

    /// Create the account and remember it locally.
    ///
    /// # Errors
    /// Validation failures (including an email already known locally, in which case the
    /// backend is never called) or the mapped backend failure.
    pub async fn submit(&self, services: &Services) -> Result<String, FormError> {
        let known = KnownUsers::new(services.store());
        invalid_unless_clean(self.errors(&known))?;
        let payload = self.payload();
        services
            .usuarios
            .register(&payload)
            .await
            .map_err(|err| COPY.to_form_error(&err))?;
        known.add(KnownUser {
            username: payload.nombre.clone(),
            email: payload.correo.clone(),
        });
        log::info!("registered {}", payload.correo);
        Ok(format!(
            "Gracias {}, te has registrado con exito!",
            payload.nombre
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn filled() -> RegisterForm {
        RegisterForm {
            correo: "nuevo@a.com".into(),
            username: "Nuevo".into(),
            password: "abcdef".into(),
            confirm: "abcdef".into(),
            ..RegisterForm::default()
        }
    }

    #[test]
    fn clean_form_has_no_errors() {
        let store = MemoryStore::new();
        assert!(filled().errors(&KnownUsers::new(&store)).is_clean());
    }

    #[test]
    fn reports_every_broken_rule() {
        let store = MemoryStore::new();
        let form = RegisterForm {
            correo: "bademail".into(),
            username: String::new(),
            password: "123".into(),
            confirm: "1234".into(),
            ..RegisterForm::default()
        };
        let errors = form.errors(&KnownUsers::new(&store));
        assert_eq!(errors.get("correo"), Some("El Correo no es válido."));
        assert_eq!(errors.get("username"), Some("El Username es obligatorio."));
        assert_eq!(
            errors.get("password"),
            Some("La Contraseña debe tener al menos 6 caracteres.")
        );
        assert_eq!(errors.get("confirm"), Some("Las contraseñas no coinciden."));
    }

    #[test]
    fn known_email_is_a_duplicate() {
        let store = MemoryStore::with_entries([(
            crate::storage::keys::KNOWN_USERS,
            r#"[{"username":"Exist","email":"exist@a.com"}]"#,
        )]);
        let form = RegisterForm {
            correo: "EXIST@a.com".into(),
            ..filled()
        };
        assert_eq!(form.correo_error(&KnownUsers::new(&store)), Some(DUPLICATE));
    }

    #[test]
    fn payload_uses_member_defaults() {
        let payload = filled().payload();
        assert_eq!(payload.id_region, 1);
        assert_eq!(payload.id_rol, 3);
        assert_eq!(payload.pregunta_seguridad1, PREGUNTAS_1[0]);
    }
}
