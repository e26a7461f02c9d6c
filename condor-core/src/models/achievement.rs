use super::{lenient_id, nullable};
use serde::{Deserialize, Serialize};

/// `id_estado` values used by the achievements backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoLogro {
    Activo,
    Inactivo,
}

impl EstadoLogro {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Activo => 1,
            Self::Inactivo => 2,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Activo),
            2 => Some(Self::Inactivo),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Activo => Self::Inactivo,
            Self::Inactivo => Self::Activo,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activo => "Activo",
            Self::Inactivo => "Inactivo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Logro {
    #[serde(rename = "idLogro", alias = "id_logro", alias = "id", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    #[serde(rename = "conteoUsuarios", alias = "conteo_usuarios", deserialize_with = "nullable")]
    pub conteo_usuarios: i64,
    #[serde(alias = "idEstado", deserialize_with = "lenient_id")]
    pub id_estado: Option<i64>,
    #[serde(alias = "idCondicion", deserialize_with = "lenient_id")]
    pub id_condicion: Option<i64>,
    pub restriccion: Option<f64>,
}

impl Logro {
    #[must_use]
    pub fn estado(&self) -> Option<EstadoLogro> {
        self.id_estado.and_then(EstadoLogro::from_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuevoLogro {
    pub nombre: String,
    pub descripcion: String,
    pub id_condicion: i64,
    pub restriccion: f64,
    pub id_estado: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Condicion {
    #[serde(alias = "id_condicion", alias = "idCondicion", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Template text such as "Recorrer (n) kilómetros en total".
    #[serde(alias = "condicion", deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(
        alias = "id_tipo_condicion",
        alias = "idTipoCondicion",
        deserialize_with = "lenient_id"
    )]
    pub tipo: Option<i64>,
}

/// Achievement earned by a user.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Trofeo {
    #[serde(rename = "idTrofeo", alias = "id_trofeo", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(rename = "idLogro", alias = "id_logro", deserialize_with = "lenient_id")]
    pub id_logro: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    #[serde(alias = "condicion", deserialize_with = "nullable")]
    pub condicion_template: String,
    pub restriccion: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn estado_toggles_between_codes() {
        assert_eq!(EstadoLogro::Activo.toggled().code(), 2);
        assert_eq!(EstadoLogro::from_code(2).map(EstadoLogro::toggled), Some(EstadoLogro::Activo));
        assert_eq!(EstadoLogro::from_code(7), None);
    }

    #[test]
    fn condicion_accepts_both_spellings() {
        let c: Condicion = serde_json::from_value(json!({
            "id_condicion": 4,
            "condicion": "Recorrer (n) kilómetros en total",
            "id_tipo_condicion": 1
        }))
        .expect("decode");
        assert_eq!(c.id, Some(4));
        assert_eq!(c.tipo, Some(1));
        assert!(c.nombre.contains("(n)"));
    }
}
