use super::{lenient_id, nullable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Calificacion {
    #[serde(
        rename = "idCalificacion",
        alias = "id_calificacion",
        alias = "id",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<i64>,
    #[serde(rename = "idUsuario", alias = "id_usuario", deserialize_with = "lenient_id")]
    pub id_usuario: Option<i64>,
    #[serde(rename = "idRuta", alias = "id_ruta", deserialize_with = "lenient_id")]
    pub id_ruta: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub puntuacion: u8,
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaCalificacion {
    pub id_usuario: i64,
    pub id_ruta: i64,
    pub puntuacion: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Existe {
    #[serde(deserialize_with = "nullable")]
    pub existe: bool,
}

/// Average score; the service has answered with a bare number and with an object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Promedio {
    Bare(f64),
    Wrapped {
        #[serde(alias = "prom", alias = "average")]
        promedio: Option<f64>,
    },
}

impl Promedio {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Bare(value) => value,
            Self::Wrapped { promedio } => promedio.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promedio_accepts_number_or_object() {
        let bare: Promedio = serde_json::from_str("4.5").expect("bare");
        let wrapped: Promedio = serde_json::from_str(r#"{"promedio":3.0}"#).expect("wrapped");
        let empty: Promedio = serde_json::from_str(r#"{"promedio":null}"#).expect("empty");
        assert!((bare.value() - 4.5).abs() < f64::EPSILON);
        assert!((wrapped.value() - 3.0).abs() < f64::EPSILON);
        assert!(empty.value().abs() < f64::EPSILON);
    }

    #[test]
    fn new_rating_skips_missing_comment() {
        let body = serde_json::to_value(NuevaCalificacion {
            id_usuario: 1,
            id_ruta: 2,
            puntuacion: 5,
            comentario: None,
        })
        .expect("encode");
        assert_eq!(body["idUsuario"], 1);
        assert!(body.get("comentario").is_none());
    }
}
