use super::{lenient_id, nullable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed view over a user profile. The raw JSON is what gets cached in the session.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Usuario {
    #[serde(alias = "idUsuario", alias = "id_usuario", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(alias = "username", deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(alias = "email", deserialize_with = "nullable")]
    pub correo: String,
    #[serde(rename = "idRegion", alias = "id_region", deserialize_with = "lenient_id")]
    pub id_region: Option<i64>,
    #[serde(rename = "idRol", alias = "id_rol", deserialize_with = "lenient_id")]
    pub id_rol: Option<i64>,
    pub rol: Option<Value>,
    #[serde(rename = "fotoPerfil", alias = "foto")]
    pub foto_perfil: Option<String>,
    #[serde(rename = "rutasRecorridas", alias = "rutas_recorridas")]
    pub rutas_recorridas: Option<i64>,
}

impl Usuario {
    /// Lenient decode; unknown shapes give an empty profile rather than an error.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPayload {
    pub nombre: String,
    pub correo: String,
    pub contrasena: String,
    pub id_region: i64,
    pub id_rol: i64,
    pub pregunta_seguridad1: String,
    pub respuesta_seguridad1: String,
    pub pregunta_seguridad2: String,
    pub respuesta_seguridad2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto_perfil_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPayload {
    pub correo: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CambioPassword {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FotoPerfil {
    pub foto: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PreguntasSeguridad {
    #[serde(deserialize_with = "nullable")]
    pub correo: String,
    #[serde(deserialize_with = "nullable")]
    pub pregunta1: String,
    #[serde(deserialize_with = "nullable")]
    pub pregunta2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecuperarPayload {
    pub correo: String,
    pub respuesta_seguridad1: String,
    pub respuesta_seguridad2: String,
    pub nueva_password: String,
}
