use super::ROLE_HEADER;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Condicion, Logro, NuevoLogro, Trofeo};
use crate::session::SessionContext;
use serde_json::Value;

const LOGROS: &str = "/api/v1/logros";

#[derive(Clone, Debug)]
pub struct LogrosService {
    client: ApiClient,
    session: SessionContext,
}

impl LogrosService {
    #[must_use]
    pub const fn new(client: ApiClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// Achievements with the number of users holding each one.
    ///
    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn list_with_counts(&self) -> Result<Vec<Logro>, ApiError> {
        self.client
            .get(&format!("{LOGROS}/conConteo"))
            .header_opt(ROLE_HEADER, self.session.role_header())
            .fetch_json()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn create(&self, logro: &NuevoLogro) -> Result<Option<Value>, ApiError> {
        self.client
            .post(LOGROS)
            .header_opt(ROLE_HEADER, self.session.role_header())
            .json(logro)?
            .fetch_lenient()
            .await
    }

    /// The backend takes the new state code as a bare JSON number.
    ///
    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn set_estado(&self, id: i64, estado: i64) -> Result<(), ApiError> {
        self.client
            .patch(&format!("{LOGROS}/{id}/estado"))
            .header_opt(ROLE_HEADER, self.session.role_header())
            .json(&estado)?
            .fetch_empty()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn condiciones(&self) -> Result<Vec<Condicion>, ApiError> {
        self.client.get_json(&format!("{LOGROS}/condiciones")).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn trofeos(&self, id_usuario: i64) -> Result<Vec<Trofeo>, ApiError> {
        self.client
            .get_json(&format!("{LOGROS}/trofeos/usuario/{id_usuario}"))
            .await
    }
}
