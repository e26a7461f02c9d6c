use super::{lenient_id, nullable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct MensajeContacto {
    #[serde(alias = "idContacto", alias = "id_contacto", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(alias = "email", deserialize_with = "nullable")]
    pub correo: String,
    #[serde(deserialize_with = "nullable")]
    pub mensaje: String,
    #[serde(rename = "fCreacion", alias = "f_creacion")]
    pub f_creacion: Option<String>,
    pub respuesta: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub resuelto: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NuevoMensaje {
    pub nombre: String,
    pub correo: String,
    pub mensaje: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespuestaMensaje {
    pub respuesta: String,
    pub resuelto: bool,
}
