use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Calificacion, Existe, NuevaCalificacion, Promedio};

const CALIFICACIONES: &str = "/api/v1/calificaciones";

#[derive(Clone, Debug)]
pub struct CalificacionesService {
    client: ApiClient,
}

impl CalificacionesService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Whether `usuario` already rated `ruta`.
    ///
    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn exists(&self, usuario: i64, ruta: i64) -> Result<bool, ApiError> {
        let answer: Existe = self
            .client
            .get(&format!("{CALIFICACIONES}/existe"))
            .query("usuario", usuario)
            .query("ruta", ruta)
            .fetch_json()
            .await?;
        Ok(answer.existe)
    }

    /// # Errors
    /// Propagates the normalized request failure; 409 when the pair was already rated.
    pub async fn create(&self, payload: &NuevaCalificacion) -> Result<(), ApiError> {
        self.client
            .post(CALIFICACIONES)
            .json(payload)?
            .fetch_empty()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn average(&self, ruta: i64) -> Result<f64, ApiError> {
        let promedio: Option<Promedio> = self
            .client
            .get(&format!("{CALIFICACIONES}/ruta/{ruta}/promedio"))
            .fetch_optional()
            .await?;
        Ok(promedio.map_or(0.0, Promedio::value))
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn by_user(&self, usuario: i64) -> Result<Vec<Calificacion>, ApiError> {
        self.client
            .get_json(&format!("{CALIFICACIONES}/usuario/{usuario}"))
            .await
    }
}
