use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{CatalogItem, Ruta, RutaPayload};
use serde_json::Value;

const RUTAS: &str = "/api/v1/rutas";

#[derive(Clone, Debug)]
pub struct RutasService {
    client: ApiClient,
}

impl RutasService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn list(&self) -> Result<Vec<Ruta>, ApiError> {
        self.client.get_json(RUTAS).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn get(&self, id: i64) -> Result<Ruta, ApiError> {
        self.client.get_json(&format!("{RUTAS}/{id}")).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn create(&self, payload: &RutaPayload) -> Result<Option<Ruta>, ApiError> {
        self.client.post_json(RUTAS, payload).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn update(&self, id: i64, payload: &RutaPayload) -> Result<Option<Ruta>, ApiError> {
        self.client.put_json(&format!("{RUTAS}/{id}"), payload).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn patch_nombre(&self, id: i64, nombre: &str) -> Result<(), ApiError> {
        self.client.patch_text(&format!("{RUTAS}/{id}/nombre"), nombre).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn patch_descripcion(&self, id: i64, descripcion: &str) -> Result<(), ApiError> {
        self.client
            .patch_text(&format!("{RUTAS}/{id}/descripcion"), descripcion)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn patch_polyline(&self, id: i64, polyline: &str) -> Result<(), ApiError> {
        self.client
            .patch_text(&format!("{RUTAS}/{id}/polyline"), polyline)
            .await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn ban(&self, id: i64) -> Result<(), ApiError> {
        self.client.patch(&format!("{RUTAS}/{id}/banear")).fetch_empty().await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn unban(&self, id: i64) -> Result<(), ApiError> {
        self.client.patch(&format!("{RUTAS}/{id}/desbanear")).fetch_empty().await
    }

    /// Soft delete: the backend deactivates the route.
    ///
    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{RUTAS}/{id}")).fetch_empty().await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn tipos(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.client.get_json(&format!("{RUTAS}/tipo")).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn dificultades(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.client.get_json(&format!("{RUTAS}/dificultad")).await
    }

    /// # Errors
    /// Propagates the normalized request failure.
    pub async fn fotos(&self, id: i64) -> Result<Vec<Value>, ApiError> {
        self.client.get_json(&format!("{RUTAS}/foto/{id}")).await
    }
}
