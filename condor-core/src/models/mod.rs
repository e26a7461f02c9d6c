//! Wire types for the five backends.
//!
//! The services disagree on casing (`idRuta` next to `id_tipo`, `promCalificacion` next
//! to `prom_calificacion`), so the read models accept every spelling seen in the wild and
//! treat `null` like a missing field.

mod achievement;
mod contact;
mod rating;
mod route;
mod user;

pub use achievement::{Condicion, EstadoLogro, Logro, NuevoLogro, Trofeo};
pub use contact::{MensajeContacto, NuevoMensaje, RespuestaMensaje};
pub use rating::{Calificacion, Existe, NuevaCalificacion, Promedio};
pub use route::{CatalogItem, Ruta, RutaPayload};
pub use user::{
    CambioPassword, FotoPerfil, LoginPayload, PreguntasSeguridad, RecuperarPayload,
    RegistroPayload, Usuario,
};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept ids sent either as numbers or numeric strings.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
