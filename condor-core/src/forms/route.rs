//! Route editor used by the admin panel for both creation and edits.

use super::{ErrorCopy, FormError, invalid_unless_clean};
use crate::models::{Ruta, RutaPayload};
use crate::services::RutasService;
use crate::validation::{Check, FieldErrors, Rule, validate};

const NOMBRE: &[Check<'static>] = &[Check::new(Rule::Required, "El nombre es obligatorio.")];
const DURACION: &str = "La duración debe ser un número de minutos mayor o igual a 0.";

const COPY: ErrorCopy = ErrorCopy {
    fixed: &[],
    bad_request: "Datos inválidos.",
    fallback: "Error al guardar la ruta.",
};

/// Which fields differ from the route being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteChanges {
    pub nombre: bool,
    pub descripcion: bool,
    pub other: bool,
}

impl RouteChanges {
    #[must_use]
    pub const fn any(self) -> bool {
        self.nombre || self.descripcion || self.other
    }

    /// Only text fields changed, so the dedicated PATCH endpoints suffice.
    #[must_use]
    pub const fn text_only(self) -> bool {
        (self.nombre || self.descripcion) && !self.other
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteForm {
    pub nombre: String,
    pub descripcion: String,
    pub id_tipo: Option<i64>,
    pub id_dificultad: Option<i64>,
    pub id_region: Option<i64>,
    pub id_estado: Option<i64>,
    /// Minutes as typed; blank keeps the stored duration.
    pub duracion_min: String,
    pub fotos: Vec<String>,
    pub foto_input: String,
    pub activo: bool,
    initial: Option<Ruta>,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            descripcion: String::new(),
            id_tipo: None,
            id_dificultad: None,
            id_region: None,
            id_estado: None,
            duracion_min: String::new(),
            fotos: Vec::new(),
            foto_input: String::new(),
            activo: true,
            initial: None,
        }
    }
}

impl RouteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing route.
    #[must_use]
    pub fn edit(ruta: &Ruta) -> Self {
        let minutes = ruta
            .tiempo_segundos
            .filter(|secs| *secs > 0)
            .map(|secs| (secs.saturating_add(30) / 60).to_string())
            .unwrap_or_default();
        Self {
            nombre: ruta.nombre.clone(),
            descripcion: ruta.descripcion.clone(),
            id_tipo: ruta.id_tipo,
            id_dificultad: ruta.id_dificultad,
            id_region: ruta.id_region,
            id_estado: ruta.id_estado,
            duracion_min: minutes,
            fotos: ruta.foto.clone(),
            foto_input: String::new(),
            activo: ruta.activo.unwrap_or(true),
            initial: Some(ruta.clone()),
        }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.route_id().is_some()
    }

    #[must_use]
    pub fn route_id(&self) -> Option<i64> {
        self.initial.as_ref().and_then(|ruta| ruta.id)
    }

    /// Move the typed URL into the photo list. Blank or repeated URLs are ignored.
    pub fn add_foto(&mut self) -> bool {
        let url = self.foto_input.trim().to_string();
        if url.is_empty() || self.fotos.contains(&url) {
            return false;
        }
        self.fotos.push(url);
        self.foto_input.clear();
        true
    }

    pub fn remove_foto(&mut self, index: usize) {
        if index < self.fotos.len() {
            self.fotos.remove(index);
        }
    }

    /// Typed duration in seconds, `Ok(None)` for a blank field.
    fn seconds(&self) -> Result<Option<i64>, ()> {
        let text = self.duracion_min.trim();
        if text.is_empty() {
            return Ok(None);
        }
        match text.parse::<i64>().ok().filter(|minutes| *minutes >= 0) {
            Some(minutes) => minutes.checked_mul(60).map(Some).ok_or(()),
            None => Err(()),
        }
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.set("nombre", validate(&self.nombre, NOMBRE).map(str::to_string));
        if self.seconds().is_err() {
            errors.insert("duracion", DURACION);
        }
        errors
    }

    /// Full body for POST and PUT. Server-side fields not edited here keep the stored
    /// values (or their defaults for a new route).
    #[must_use]
    pub fn payload(&self) -> RutaPayload {
        let initial = self.initial.as_ref();
        let tiempo_segundos = match self.seconds() {
            Ok(Some(secs)) => secs,
            _ => initial.and_then(|r| r.tiempo_segundos).unwrap_or(0),
        };
        RutaPayload {
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.clone(),
            id_tipo: self.id_tipo,
            id_dificultad: self.id_dificultad,
            id_region: self.id_region,
            id_estado: self.id_estado.unwrap_or(1),
            foto: self.fotos.clone(),
            activo: self.activo,
            distancia: initial.and_then(|r| r.distancia).unwrap_or(0.0),
            tiempo_segundos,
            f_public: initial.is_none_or(Ruta::is_published),
            f_baneo: initial.and_then(|r| r.f_baneo).unwrap_or(false),
            geometria_polyline: initial
                .and_then(|r| r.geometria_polyline.clone())
                .unwrap_or_default(),
            prom_calificacion: initial.map_or(0.0, Ruta::average),
        }
    }

    #[must_use]
    pub fn changes(&self) -> RouteChanges {
        let Some(initial) = self.initial.as_ref() else {
            return RouteChanges::default();
        };
        let duration_changed = self
            .seconds()
            .ok()
            .flatten()
            .is_some_and(|secs| Some(secs) != initial.tiempo_segundos);
        let other = initial.id_tipo != self.id_tipo
            || initial.id_dificultad != self.id_dificultad
            || initial.id_region != self.id_region
            || initial.id_estado != self.id_estado
            || initial.foto != self.fotos
            || initial.activo.unwrap_or(true) != self.activo
            || duration_changed;
        RouteChanges {
            nombre: initial.nombre != self.nombre.trim(),
            descripcion: initial.descripcion != self.descripcion,
            other,
        }
    }

    /// Create, or update via the narrowest endpoint that covers the edit.
    ///
    /// # Errors
    /// Validation failures or the mapped backend failure.
    pub async fn submit(&self, rutas: &RutasService) -> Result<String, FormError> {
        invalid_unless_clean(self.errors())?;
        let map = |err: crate::error::ApiError| COPY.to_form_error(&err);
        let Some(id) = self.route_id() else {
            rutas.create(&self.payload()).await.map_err(map)?;
            log::info!("route {} created", self.nombre.trim());
            return Ok("Ruta creada correctamente.".to_string());
        };

        let changes = self.changes();
        if changes.text_only() {
            if changes.nombre {
                rutas.patch_nombre(id, self.nombre.trim()).await.map_err(map)?;
            }
            if changes.descripcion {
                rutas.patch_descripcion(id, &self.descripcion).await.map_err(map)?;
            }
        } else {
            rutas.update(id, &self.payload()).await.map_err(map)?;
        }
        log::info!("route {id} updated");
        Ok("Ruta actualizada correctamente.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Ruta {
        Ruta {
            id: Some(7),
            nombre: "Cerro Renca".into(),
            descripcion: "Subida corta".into(),
            id_tipo: Some(1),
            id_estado: Some(1),
            foto: vec!["https://img/1.jpg".into()],
            tiempo_segundos: Some(3600),
            distancia: Some(4.5),
            activo: Some(true),
            ..Ruta::default()
        }
    }

    #[test]
    fn new_route_payload_defaults() {
        let form = RouteForm {
            nombre: " Nueva ".into(),
            duracion_min: "90".into(),
            ..RouteForm::new()
        };
        let payload = form.payload();
        assert_eq!(payload.nombre, "Nueva");
        assert_eq!(payload.tiempo_segundos, 5400);
        assert_eq!(payload.id_estado, 1);
        assert!(payload.f_public);
        assert!(!payload.f_baneo);
        let body = serde_json::to_value(&payload).expect("encode");
        assert!(body.get("idRuta").is_none());
    }

    #[test]
    fn edit_prefills_minutes_and_keeps_distance() {
        let form = RouteForm::edit(&stored());
        assert_eq!(form.duracion_min, "60");
        assert!((form.payload().distancia - 4.5).abs() < f64::EPSILON);
        assert!(!form.changes().any());
    }

    #[test]
    fn text_edits_are_patch_only() {
        let mut form = RouteForm::edit(&stored());
        form.descripcion = "Subida corta y empinada".into();
        assert!(form.changes().text_only());
        form.activo = false;
        assert!(!form.changes().text_only());
    }

    #[test]
    fn photo_list_rejects_blank_and_duplicates() {
        let mut form = RouteForm::edit(&stored());
        form.foto_input = "  ".into();
        assert!(!form.add_foto());
        form.foto_input = "https://img/1.jpg".into();
        assert!(!form.add_foto());
        form.foto_input = "https://img/2.jpg".into();
        assert!(form.add_foto());
        assert_eq!(form.fotos.len(), 2);
        form.remove_foto(0);
        assert_eq!(form.fotos, vec!["https://img/2.jpg".to_string()]);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let form = RouteForm {
            nombre: "Ruta".into(),
            duracion_min: "-5".into(),
            ..RouteForm::new()
        };
        assert_eq!(form.errors().get("duracion"), Some(DURACION));
    }

    #[test]
    fn oversized_duration_is_rejected_and_payload_keeps_stored_time() {
        let mut form = RouteForm::edit(&stored());
        form.duracion_min = "999999999999999999".into();
        assert_eq!(form.errors().get("duracion"), Some(DURACION));
        assert_eq!(form.payload().tiempo_segundos, 3600);
        assert!(!form.changes().any());
    }

    #[test]
    fn huge_stored_duration_prefills_without_overflow() {
        let ruta = Ruta {
            tiempo_segundos: Some(i64::MAX),
            ..stored()
        };
        let form = RouteForm::edit(&ruta);
        assert_eq!(form.duracion_min, (i64::MAX / 60).to_string());
    }
}
