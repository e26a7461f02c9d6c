use serde_json::Value;

pub const CONNECTION_MESSAGE: &str = "No se pudo conectar con el servidor. Revisa tu conexión.";
pub const DECODE_MESSAGE: &str = "Respuesta inesperada del servidor.";

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    #[must_use]
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self.status(), Some(403))
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409))
    }

    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// The `message` or `error` field of a JSON error body, when the server sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let Self::Http { body, .. } = self else {
            return None;
        };
        let parsed: Value = serde_json::from_str(body).ok()?;
        ["message", "error", "mensaje"]
            .iter()
            .find_map(|key| parsed.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// One display-ready line for any failure. Never empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => CONNECTION_MESSAGE.to_string(),
            Self::Decode(_) | Self::Encode(_) => DECODE_MESSAGE.to_string(),
            Self::Http { status, body } => self
                .server_message()
                .or_else(|| status_message(*status).map(str::to_string))
                .or_else(|| plain_body(body))
                .unwrap_or_else(|| format!("Error inesperado (HTTP {status}).")),
        }
    }
}

#[must_use]
pub const fn status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Solicitud inválida."),
        401 => Some("No autorizado."),
        403 => Some("Acceso denegado."),
        404 => Some("Recurso no encontrado."),
        409 => Some("Conflicto: el recurso ya existe."),
        422 => Some("Datos inválidos."),
        500 => Some("Error del servidor. Intenta nuevamente más tarde."),
        503 => Some("Servicio no disponible. Intenta más tarde."),
        _ => None,
    }
}

pub(crate) fn plain_body(body: &str) -> Option<String> {
    let text = body.trim();
    if text.is_empty() || text.starts_with('{') || text.starts_with('<') || text.len() > 200 {
        return None;
    }
    Some(text.to_string())
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message_over_status_text() {
        let err = ApiError::http(400, r#"{"message":"La ruta ya existe"}"#);
        assert_eq!(err.user_message(), "La ruta ya existe");
        let err = ApiError::http(409, r#"{"error":"duplicado"}"#);
        assert_eq!(err.user_message(), "duplicado");
    }

    #[test]
    fn falls_back_to_status_table() {
        assert_eq!(ApiError::http(404, "").user_message(), "Recurso no encontrado.");
        assert_eq!(ApiError::http(403, "{}").user_message(), "Acceso denegado.");
        assert_eq!(
            ApiError::http(503, "<html>down</html>").user_message(),
            "Servicio no disponible. Intenta más tarde."
        );
        assert_eq!(
            ApiError::http(422, r#"{"message":"  "}"#).user_message(),
            "Datos inválidos."
        );
    }

    #[test]
    fn unknown_status_uses_raw_text_then_generic() {
        assert_eq!(ApiError::http(418, "I'm a teapot").user_message(), "I'm a teapot");
        assert_eq!(
            ApiError::http(418, "").user_message(),
            "Error inesperado (HTTP 418)."
        );
    }

    #[test]
    fn transport_and_decode_have_fixed_messages() {
        assert_eq!(
            ApiError::Transport("Failed to fetch".into()).user_message(),
            CONNECTION_MESSAGE
        );
        assert_eq!(ApiError::Decode("eof".into()).user_message(), DECODE_MESSAGE);
    }

    #[test]
    fn every_status_maps_to_non_empty_text() {
        for status in 100..600 {
            for body in ["", "{}", "x", r#"{"message":""}"#] {
                assert!(!ApiError::http(status, body).user_message().is_empty());
            }
        }
    }

    #[test]
    fn status_helpers_classify() {
        assert!(ApiError::http(401, "").is_unauthorized());
        assert!(ApiError::http(409, "").is_conflict());
        assert!(ApiError::http(502, "").is_server_error());
        assert_eq!(ApiError::Transport(String::new()).status(), None);
    }
}
