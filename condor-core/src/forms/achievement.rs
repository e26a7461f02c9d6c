//! Achievement definitions managed by moderators, and the text shown for a condition.

use super::{FormError, detail, invalid_unless_clean};
use crate::error::ApiError;
use crate::models::{Condicion, EstadoLogro, Logro, NuevoLogro};
use crate::services::LogrosService;
use crate::validation::{Check, FieldErrors, Rule, validate};
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)\(n\)").ok());
static FIRST_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\d+[.,]?\d*").ok());

const NOMBRE: &[Check<'static>] = &[
    Check::new(Rule::Required, "El nombre es obligatorio."),
    Check::new(Rule::MaxChars(30), "El nombre no puede exceder 30 caracteres."),
];
const DESCRIPCION: &[Check<'static>] = &[
    Check::new(
        Rule::MinChars(10),
        "La descripción debe tener al menos 10 caracteres.",
    ),
    Check::new(
        Rule::MaxChars(100),
        "La descripción no puede exceder 100 caracteres.",
    ),
];
const RESTRICCION: &[Check<'static>] = &[Check::new(
    Rule::Positive,
    "Ingresa una restricción numérica positiva (mayor que 0).",
)];
const CONDICION: &str = "Selecciona una condición.";

/// What the moderator was trying to do, for the 403 wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogroAction {
    List,
    Create,
    ToggleEstado,
}

impl LogroAction {
    const fn forbidden(self) -> &'static str {
        match self {
            Self::List => "No autorizado: solo moderadores pueden acceder.",
            Self::Create => "No autorizado: solo moderadores pueden crear logros.",
            Self::ToggleEstado => "No autorizado: solo moderadores pueden actualizar estado.",
        }
    }

    const fn fallback(self) -> &'static str {
        match self {
            Self::List => "No se pudo obtener logros.",
            Self::Create => "Error al crear logro.",
            Self::ToggleEstado => "Error al actualizar estado.",
        }
    }

    /// Banner text for a failed call to the achievements backend.
    #[must_use]
    pub fn describe(self, err: &ApiError) -> String {
        let text = detail(err).unwrap_or_default();
        let lower = text.to_lowercase();
        if err.is_forbidden()
            || lower.contains("acceso denegado")
            || lower.contains("no autorizado")
        {
            self.forbidden().to_string()
        } else if err.status() == Some(404) || lower.contains("no encontrado") {
            "Recurso no encontrado en el servidor de logros.".to_string()
        } else if text.is_empty() {
            self.fallback().to_string()
        } else {
            text
        }
    }
}

/// Generic template for a condition type; every one carries the `(n)` slot.
#[must_use]
pub fn condition_hint(tipo: Option<i64>) -> &'static str {
    match tipo {
        Some(1) => "Recorrer (n) kilómetros en total",
        Some(2) => "Haber terminado (n) rutas en diferentes regiones",
        Some(3) => "Haber terminado (n) rutas en total",
        _ => "Condición específica (n)",
    }
}

/// Put `value` into `template`: every `(n)` slot, else the first number, else appended.
#[must_use]
pub fn fill_template(template: &str, value: &str) -> String {
    if let Some(re) = PLACEHOLDER.as_ref().filter(|re| re.is_match(template)) {
        return re.replace_all(template, regex::NoExpand(value)).into_owned();
    }
    if let Some(re) = FIRST_NUMBER.as_ref().filter(|re| re.is_match(template)) {
        return re.replacen(template, 1, regex::NoExpand(value)).into_owned();
    }
    format!("{template} {value}").trim().to_string()
}

/// Display text for a condition with its threshold. An empty threshold shows `N`.
#[must_use]
pub fn condition_preview(condicion: &Condicion, restriccion: &str) -> String {
    let value = match restriccion.trim() {
        "" => "N",
        typed => typed,
    };
    let template = if condicion.nombre.trim().is_empty() {
        condition_hint(condicion.tipo)
    } else {
        condicion.nombre.as_str()
    };
    fill_template(template, value)
}

/// Numbers as the backend stores them: integers without a trailing `.0`.
#[must_use]
pub fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AchievementForm {
    pub nombre: String,
    pub descripcion: String,
    pub id_condicion: Option<i64>,
    pub restriccion: String,
}

impl AchievementForm {
    /// Fresh form with the first listed condition preselected.
    #[must_use]
    pub fn with_conditions(condiciones: &[Condicion]) -> Self {
        Self {
            id_condicion: condiciones.first().and_then(|c| c.id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("nombre", self.nombre.trim(), NOMBRE);
        errors.check("descripcion", self.descripcion.trim(), DESCRIPCION);
        if self.id_condicion.is_none() {
            errors.insert("condicion", CONDICION);
        }
        errors.set(
            "restriccion",
            validate(&self.restriccion, RESTRICCION).map(str::to_string),
        );
        errors
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.errors().is_clean()
    }

    #[must_use]
    pub fn preview(&self, condiciones: &[Condicion]) -> Option<String> {
        let id = self.id_condicion?;
        let condicion = condiciones
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .unwrap_or_default();
        Some(condition_preview(&condicion, &self.restriccion))
    }

    /// # Errors
    /// Validation failures or the mapped backend failure.
    pub fn payload(&self) -> Result<NuevoLogro, FormError> {
        invalid_unless_clean(self.errors())?;
        let restriccion = self.restriccion.trim().parse::<f64>().unwrap_or_default();
        Ok(NuevoLogro {
            nombre: self.nombre.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            id_condicion: self.id_condicion.unwrap_or_default(),
            restriccion,
            id_estado: EstadoLogro::Activo.code(),
        })
    }

    /// # Errors
    /// Validation failures or the mapped backend failure.
    pub async fn submit(&self, logros: &LogrosService) -> Result<String, FormError> {
        let payload = self.payload()?;
        logros
            .create(&payload)
            .await
            .map_err(|err| FormError::Api(LogroAction::Create.describe(&err)))?;
        log::info!("achievement {} created", payload.nombre);
        Ok(format!("Logro \"{}\" creado.", payload.nombre))
    }
}

/// Flip a definition between active and inactive. Returns the new state.
///
/// # Errors
/// The banner text for the failed update.
pub async fn toggle_estado(logros: &LogrosService, logro: &Logro) -> Result<EstadoLogro, String> {
    let Some(id) = logro.id else {
        return Err(LogroAction::ToggleEstado.fallback().to_string());
    };
    let next = logro.estado().unwrap_or(EstadoLogro::Inactivo).toggled();
    logros
        .set_estado(id, next.code())
        .await
        .map_err(|err| LogroAction::ToggleEstado.describe(&err))?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AchievementForm {
        AchievementForm {
            nombre: "Explorador".into(),
            descripcion: "Recorre muchos kilómetros".into(),
            id_condicion: Some(1),
            restriccion: "50".into(),
        }
    }

    #[test]
    fn valid_form_builds_active_payload() {
        let payload = valid().payload().expect("valid");
        assert_eq!(payload.id_estado, 1);
        assert!((payload.restriccion - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rules_per_field() {
        let form = AchievementForm {
            nombre: "x".repeat(31),
            descripcion: "corta".into(),
            id_condicion: None,
            restriccion: "0".into(),
        };
        let errors = form.errors();
        assert_eq!(errors.get("nombre"), Some("El nombre no puede exceder 30 caracteres."));
        assert_eq!(
            errors.get("descripcion"),
            Some("La descripción debe tener al menos 10 caracteres.")
        );
        assert_eq!(errors.get("condicion"), Some(CONDICION));
        assert!(errors.get("restriccion").is_some());
        assert!(!form.can_submit());
    }

    #[test]
    fn templates_fill_placeholder_number_or_append() {
        assert_eq!(
            fill_template("Recorrer (n) kilómetros en total", "42"),
            "Recorrer 42 kilómetros en total"
        );
        assert_eq!(fill_template("Completa (N) rutas (n)", "3"), "Completa 3 rutas 3");
        assert_eq!(fill_template("Sube 1000 metros", "200"), "Sube 200 metros");
        assert_eq!(fill_template("Visita volcanes", "5"), "Visita volcanes 5");
    }

    #[test]
    fn preview_uses_hint_when_condition_has_no_text() {
        let condicion = Condicion {
            id: Some(2),
            nombre: String::new(),
            tipo: Some(2),
        };
        assert_eq!(
            condition_preview(&condicion, ""),
            "Haber terminado N rutas en diferentes regiones"
        );
    }

    #[test]
    fn forbidden_wording_depends_on_action() {
        let err = ApiError::http(403, "");
        assert_eq!(
            LogroAction::Create.describe(&err),
            "No autorizado: solo moderadores pueden crear logros."
        );
        assert_eq!(
            LogroAction::List.describe(&ApiError::http(404, "")),
            "Recurso no encontrado en el servidor de logros."
        );
    }

    #[test]
    fn thresholds_print_without_trailing_zero() {
        assert_eq!(format_threshold(50.0), "50");
        assert_eq!(format_threshold(2.5), "2.5");
    }
}
