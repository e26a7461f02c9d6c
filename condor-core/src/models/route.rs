use super::{lenient_id, nullable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Ruta {
    #[serde(rename = "idRuta", alias = "id_ruta", alias = "id", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    pub dificultad: Option<String>,
    pub tipo: Option<String>,
    pub region: Option<String>,
    #[serde(alias = "idTipo", deserialize_with = "lenient_id")]
    pub id_tipo: Option<i64>,
    #[serde(alias = "idDificultad", deserialize_with = "lenient_id")]
    pub id_dificultad: Option<i64>,
    #[serde(alias = "idRegion", deserialize_with = "lenient_id")]
    pub id_region: Option<i64>,
    #[serde(alias = "idEstado", deserialize_with = "lenient_id")]
    pub id_estado: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub foto: Vec<String>,
    #[serde(rename = "promCalificacion", alias = "prom_calificacion")]
    pub prom_calificacion: Option<f64>,
    pub activo: Option<bool>,
    pub distancia: Option<f64>,
    #[serde(alias = "tiempoSegundos")]
    pub tiempo_segundos: Option<i64>,
    pub f_public: Option<Value>,
    pub f_baneo: Option<bool>,
    pub geometria_polyline: Option<String>,
}

impl Ruta {
    /// Listed routes must be active and not banned. Missing flags count as permissive.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.activo.unwrap_or(true) && !self.f_baneo.unwrap_or(false)
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        self.prom_calificacion.unwrap_or(0.0)
    }

    /// Publication date (`YYYY-MM-DD`) when the backend sent a timestamp instead of a flag.
    #[must_use]
    pub fn published_on(&self) -> Option<&str> {
        self.f_public
            .as_ref()
            .and_then(Value::as_str)
            .map(|stamp| stamp.get(..10).unwrap_or(stamp))
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        !matches!(self.f_public, Some(Value::Bool(false)))
    }
}

/// Body for create and full update. No id: the server assigns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RutaPayload {
    pub nombre: String,
    pub descripcion: String,
    pub id_tipo: Option<i64>,
    pub id_dificultad: Option<i64>,
    pub id_region: Option<i64>,
    pub id_estado: i64,
    pub foto: Vec<String>,
    pub activo: bool,
    pub distancia: f64,
    pub tiempo_segundos: i64,
    pub f_public: bool,
    pub f_baneo: bool,
    pub geometria_polyline: String,
    pub prom_calificacion: f64,
}

/// Row of any lookup table (tipo, dificultad, region, estado).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogItem {
    #[serde(
        alias = "id_tipo",
        alias = "id_dificultad",
        alias = "id_region",
        alias = "id_estado",
        alias = "idRegion",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<i64>,
    #[serde(alias = "descripcion", deserialize_with = "nullable")]
    pub nombre: String,
}

impl CatalogItem {
    #[must_use]
    pub fn new(id: i64, nombre: &str) -> Self {
        Self {
            id: Some(id),
            nombre: nombre.to_string(),
        }
    }
}
