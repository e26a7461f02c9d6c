use super::ROLE_HEADER;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{MensajeContacto, NuevoMensaje, RespuestaMensaje};
use crate::session::SessionContext;

const CONTACTO: &str = "/api/v1/contacto";

#[derive(Clone, Debug)]
pub struct ContactoService {
    client: ApiClient,
    session: SessionContext,
}

impl ContactoService {
    #[must_use]
    pub const fn new(client: ApiClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn send(&self, mensaje: &NuevoMensaje) -> Result<(), ApiError> {
        self.client.post(CONTACTO).json(mensaje)?.fetch_empty().await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn list(&self) -> Result<Vec<MensajeContacto>, ApiError> {
        self.client
            .get(CONTACTO)
            .header_opt(ROLE_HEADER, self.session.role_header())
            .fetch_json()
            .await
    }

    /// Store a reply and mark the message resolved.
    ///
    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn reply(&self, id: i64, respuesta: &str) -> Result<(), ApiError> {
        let body = RespuestaMensaje {
            respuesta: respuesta.to_string(),
            resuelto: true,
        };
        self.client
            .put(&format!("{CONTACTO}/{id}"))
            .header_opt(ROLE_HEADER, self.session.role_header())
            .json(&body)?
            .fetch_empty()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{CONTACTO}/{id}"))
            .header_opt(ROLE_HEADER, self.session.role_header())
            .fetch_empty()
            .await
    }
}
