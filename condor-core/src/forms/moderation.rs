use super::{ErrorCopy, FormError, invalid_unless_clean};
use crate::models::MensajeContacto;
use crate::services::ContactoService;
use crate::validation::{Check, FieldErrors, Rule};

pub const DELETE_CONFIRMATION: &str = "¿Eliminar este mensaje? Esta acción no se puede deshacer.";

const RESPUESTA: &[Check<'static>] = &[Check::new(Rule::Required, "Escribe una respuesta.")];

const REPLY_COPY: ErrorCopy = ErrorCopy {
    fixed: &[(403, "No autorizado: solo moderadores pueden responder mensajes.")],
    bad_request: "Solicitud inválida.",
    fallback: "Error al guardar la respuesta.",
};
const DELETE_COPY: ErrorCopy = ErrorCopy {
    fixed: &[(403, "No autorizado: solo moderadores pueden eliminar mensajes.")],
    bad_request: "Solicitud inválida.",
    fallback: "Error al eliminar el mensaje.",
};

/// Reply editor for one contact message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyForm {
    pub id: Option<i64>,
    pub respuesta: String,
}

impl ReplyForm {
    /// Open the editor on a message, prefilled with any earlier reply.
    #[must_use]
    pub fn open(mensaje: &MensajeContacto) -> Self {
        Self {
            id: mensaje.id,
            respuesta: mensaje.respuesta.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("respuesta", &self.respuesta, RESPUESTA);
        errors
    }

    /// Store the reply and mark the message resolved.
    ///
    /// # Errors
    /// Validation failures or the mapped backend failure.
    pub async fn submit(&self, contacto: &ContactoService) -> Result<String, FormError> {
        invalid_unless_clean(self.errors())?;
        let Some(id) = self.id else {
            return Err(FormError::Api(REPLY_COPY.fallback.to_string()));
        };
        contacto
            .reply(id, self.respuesta.trim())
            .await
            .map_err(|err| REPLY_COPY.to_form_error(&err))?;
        log::info!("contact message {id} answered");
        Ok("Respuesta guardada y marcado como resuelto.".to_string())
    }
}

/// # Errors
/// The mapped backend failure.
pub async fn delete_message(contacto: &ContactoService, id: i64) -> Result<String, FormError> {
    contacto
        .delete(id)
        .await
        .map_err(|err| DELETE_COPY.to_form_error(&err))?;
    log::info!("contact message {id} deleted");
    Ok("Mensaje eliminado.".to_string())
}

/// Apply a saved reply to the local list without refetching.
pub fn mark_answered(mensajes: &mut [MensajeContacto], id: i64, respuesta: &str) {
    if let Some(mensaje) = mensajes.iter_mut().find(|m| m.id == Some(id)) {
        mensaje.respuesta = Some(respuesta.trim().to_string());
        mensaje.resuelto = true;
    }
}
