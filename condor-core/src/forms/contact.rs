use super::{ErrorCopy, FormError, invalid_unless_clean};
use crate::models::NuevoMensaje;
use crate::services::ContactoService;
use crate::validation::{Check, FieldErrors, Rule, validate};

pub const MENSAJE_MIN: usize = 10;
pub const MENSAJE_MAX: usize = 300;

const NOMBRE: &[Check<'static>] = &[Check::new(Rule::Required, "El nombre es obligatorio.")];
const CORREO: &[Check<'static>] = &[
    Check::new(Rule::Required, "El email no es válido."),
    Check::new(Rule::Email, "El email no es válido."),
];
const MENSAJE: &[Check<'static>] = &[
    Check::new(
        Rule::MinChars(MENSAJE_MIN),
        "El mensaje debe tener al menos 10 caracteres.",
    ),
    Check::new(
        Rule::MaxChars(MENSAJE_MAX),
        "El mensaje no puede exceder los 300 caracteres.",
    ),
];

const COPY: ErrorCopy = ErrorCopy {
    fixed: &[],
    bad_request: "Datos inválidos.",
    fallback: "No se pudo enviar el mensaje.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Nombre,
    Correo,
    Mensaje,
}

impl ContactField {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nombre => "nombre",
            Self::Correo => "correo",
            Self::Mensaje => "mensaje",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    pub nombre: String,
    pub correo: String,
    pub mensaje: String,
}

impl ContactForm {
    #[must_use]
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Nombre => &self.nombre,
            ContactField::Correo => &self.correo,
            ContactField::Mensaje => &self.mensaje,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Nombre => self.nombre = value,
            ContactField::Correo => self.correo = value,
            ContactField::Mensaje => self.mensaje = value,
        }
    }

    #[must_use]
    pub fn field_error(&self, field: ContactField) -> Option<&'static str> {
        let checks = match field {
            ContactField::Nombre => NOMBRE,
            ContactField::Correo => CORREO,
            ContactField::Mensaje => MENSAJE,
        };
        validate(self.value(field), checks)
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in [ContactField::Nombre, ContactField::Correo, ContactField::Mensaje] {
            errors.set(field.key(), self.field_error(field).map(str::to_string));
        }
        errors
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.errors().is_clean()
    }

    #[must_use]
    pub fn payload(&self) -> NuevoMensaje {
        NuevoMensaje {
            nombre: self.nombre.trim().to_string(),
            correo: self.correo.trim().to_string(),
            mensaje: self.mensaje.clone(),
        }
    }

    /// Validate and send. The success text is returned for the banner; clearing the
    /// fields is left to the caller.
    ///
    /// # Errors
    /// [`FormError::Invalid`] without any request when a field fails, otherwise the
    /// backend failure.
    pub async fn submit(&self, contacto: &ContactoService) -> Result<String, FormError> {
        invalid_unless_clean(self.errors())?;
        contacto
            .send(&self.payload())
            .await
            .map_err(|err| COPY.to_form_error(&err))?;
        log::info!("contact message sent");
        Ok(format!(
            "Gracias {}, tu mensaje ha sido enviado!",
            self.nombre.trim()
        ))
    }
}
