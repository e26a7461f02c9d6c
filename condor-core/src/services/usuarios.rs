use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{
    CambioPassword, CatalogItem, FotoPerfil, LoginPayload, PreguntasSeguridad, RecuperarPayload,
    RegistroPayload,
};
use serde_json::Value;

const USUARIOS: &str = "/api/v1/usuarios";

#[derive(Clone, Debug)]
pub struct UsuariosService {
    client: ApiClient,
}

impl UsuariosService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn register(&self, payload: &RegistroPayload) -> Result<Option<Value>, ApiError> {
        self.client.post_json(USUARIOS, payload).await
    }

    /// Authenticate. The body may carry a `token`.
    ///
    /// # Errors
    /// Propagates the normalized request failure (401 for bad credentials).
    pub async fn login(&self, payload: &LoginPayload) -> Result<Option<Value>, ApiError> {
        self.client
            .post_json(&format!("{USUARIOS}/login"), payload)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn by_id(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get_json(&format!("{USUARIOS}/{id}")).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn by_correo(&self, correo: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("{USUARIOS}/buscar"))
            .query("correo", correo)
            .fetch_json()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn update_nombre(&self, id: i64, nombre: &str) -> Result<(), ApiError> {
        self.client
            .patch_query(&format!("{USUARIOS}/{id}/nombre"), "nombre", nombre)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn update_correo(&self, id: i64, correo: &str) -> Result<(), ApiError> {
        self.client
            .patch_query(&format!("{USUARIOS}/{id}/correo"), "correo", correo)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn update_region(&self, id: i64, id_region: i64) -> Result<(), ApiError> {
        self.client
            .patch_query(
                &format!("{USUARIOS}/{id}/region"),
                "idRegion",
                &id_region.to_string(),
            )
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn update_rutas_recorridas(&self, id: i64, total: i64) -> Result<(), ApiError> {
        self.client
            .patch_query(
                &format!("{USUARIOS}/{id}/rutasRecorridas"),
                "nuevasRutas",
                &total.to_string(),
            )
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn update_foto(&self, id: i64, foto_base64: &str) -> Result<(), ApiError> {
        let body = FotoPerfil {
            foto: foto_base64.to_string(),
        };
        self.client
            .patch_json(&format!("{USUARIOS}/{id}/foto"), &body)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn change_password(&self, id: i64, payload: &CambioPassword) -> Result<(), ApiError> {
        self.client
            .patch_json(&format!("{USUARIOS}/{id}/password"), payload)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{USUARIOS}/{id}"))
            .fetch_empty()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn preguntas(&self, correo: &str) -> Result<PreguntasSeguridad, ApiError> {
        self.client
            .get(&format!("{USUARIOS}/preguntas"))
            .query("correo", correo)
            .fetch_json()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn recuperar(&self, payload: &RecuperarPayload) -> Result<(), ApiError> {
        self.client
            .post(&format!("{USUARIOS}/recuperar"))
            .json(payload)?
            .fetch_empty()
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn regiones(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.client.get_json("/api/v1/regiones").await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn estados(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.client.get_json("/api/v1/estados").await
    }
}
