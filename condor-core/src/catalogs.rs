//! Lookup tables for routes and the joined views built from them.
//!
//! Catalog lookups are independent, so they are issued together and joined. Any single
//! failure fails the whole load: pages show one error instead of half-resolved names.

use crate::error::ApiError;
use crate::format;
use crate::models::{CatalogItem, Ruta};
use crate::services::Services;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteCatalogs {
    pub tipos: Vec<CatalogItem>,
    pub dificultades: Vec<CatalogItem>,
    pub regiones: Vec<CatalogItem>,
    pub estados: Vec<CatalogItem>,
}

impl RouteCatalogs {
    /// Fetch the four tables concurrently.
    ///
    /// # Errors
    /// The first failing lookup, if any.
    pub async fn load(services: &Services) -> Result<Self, ApiError> {
        let (tipos, dificultades, regiones, estados) = futures::try_join!(
            services.rutas.tipos(),
            services.rutas.dificultades(),
            services.usuarios.regiones(),
            services.usuarios.estados(),
        )?;
        log::debug!(
            "catalogs loaded: {} tipos, {} dificultades, {} regiones, {} estados",
            tipos.len(),
            dificultades.len(),
            regiones.len(),
            estados.len()
        );
        Ok(Self {
            tipos,
            dificultades,
            regiones,
            estados,
        })
    }

    #[must_use]
    pub fn tipo(&self, id: Option<i64>) -> Option<&str> {
        lookup(&self.tipos, id)
    }

    #[must_use]
    pub fn dificultad(&self, id: Option<i64>) -> Option<&str> {
        lookup(&self.dificultades, id)
    }

    #[must_use]
    pub fn region(&self, id: Option<i64>) -> Option<&str> {
        lookup(&self.regiones, id)
    }

    #[must_use]
    pub fn estado(&self, id: Option<i64>) -> Option<&str> {
        lookup(&self.estados, id)
    }
}

fn lookup(items: &[CatalogItem], id: Option<i64>) -> Option<&str> {
    let id = id?;
    items
        .iter()
        .find(|item| item.id == Some(id))
        .map(|item| item.nombre.as_str())
}

/// A route with every id resolved to a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub id: Option<i64>,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: Option<String>,
    pub dificultad: Option<String>,
    pub region: Option<String>,
    pub estado: Option<String>,
    pub fotos: Vec<String>,
    pub average: f64,
    pub distancia: Option<f64>,
    pub tiempo_segundos: Option<i64>,
    pub published_on: Option<String>,
    pub activo: bool,
    pub baneada: bool,
}

impl RouteSummary {
    /// Fetch one route together with the catalogs that name its fields.
    ///
    /// # Errors
    /// The route lookup (404 for an unknown id) or the first failing catalog.
    pub async fn load(services: &Services, id: i64) -> Result<Self, ApiError> {
        let (ruta, catalogs) =
            futures::try_join!(services.rutas.get(id), RouteCatalogs::load(services))?;
        Ok(Self::enrich(&ruta, &catalogs))
    }

    /// Resolve names through the catalogs, falling back to whatever text the route carried.
    #[must_use]
    pub fn enrich(ruta: &Ruta, catalogs: &RouteCatalogs) -> Self {
        let resolve = |name: Option<&str>, fallback: Option<&String>| {
            name.map(str::to_string)
                .or_else(|| fallback.filter(|text| !text.trim().is_empty()).cloned())
        };
        Self {
            id: ruta.id,
            nombre: ruta.nombre.clone(),
            descripcion: ruta.descripcion.clone(),
            tipo: resolve(catalogs.tipo(ruta.id_tipo), ruta.tipo.as_ref()),
            dificultad: resolve(catalogs.dificultad(ruta.id_dificultad), ruta.dificultad.as_ref()),
            region: resolve(catalogs.region(ruta.id_region), ruta.region.as_ref()),
            estado: catalogs.estado(ruta.id_estado).map(str::to_string),
            fotos: ruta.foto.clone(),
            average: ruta.average(),
            distancia: ruta.distancia,
            tiempo_segundos: ruta.tiempo_segundos,
            published_on: ruta.published_on().map(str::to_string),
            activo: ruta.activo.unwrap_or(true),
            baneada: ruta.f_baneo.unwrap_or(false),
        }
    }

    #[must_use]
    pub fn cover(&self) -> Option<&str> {
        self.fotos.first().map(String::as_str)
    }

    #[must_use]
    pub fn maps_embed_url(&self) -> String {
        format::maps_embed_url(&self.nombre, self.region.as_deref())
    }
}

/// The two public route directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteListing {
    Official,
    Community,
}

impl RouteListing {
    /// Path segment used in `/rutas/:tipo/:id`.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Official => "oficiales",
            Self::Community => "comunitarias",
        }
    }

    /// Unknown segments fall back to the official directory.
    #[must_use]
    pub fn from_segment(segment: &str) -> Self {
        if segment.eq_ignore_ascii_case("comunitarias") {
            Self::Community
        } else {
            Self::Official
        }
    }

    /// Tipo names (uppercased) that place a route in this directory.
    #[must_use]
    pub const fn tipo_names(self) -> &'static [&'static str] {
        match self {
            Self::Official => &["OFICIAL", "PRIVADA"],
            Self::Community => &["COMUNITARIA", "PUBLICA"],
        }
    }

    fn names_tipo(self, name: &str) -> bool {
        let upper = name.trim().to_uppercase();
        self.tipo_names().iter().any(|candidate| *candidate == upper)
    }

    /// Whether `ruta` is listed here: matched by tipo id when the catalog knows the tipo,
    /// otherwise by the route's own tipo text. Inactive or banned routes never are.
    #[must_use]
    pub fn includes(self, ruta: &Ruta, tipos: &[CatalogItem]) -> bool {
        if !ruta.is_visible() {
            return false;
        }
        let tipo_ids: Vec<i64> = tipos
            .iter()
            .filter(|tipo| self.names_tipo(&tipo.nombre))
            .filter_map(|tipo| tipo.id)
            .collect();
        if tipo_ids.is_empty() {
            ruta.tipo.as_deref().is_some_and(|tipo| self.names_tipo(tipo))
        } else {
            ruta.id_tipo.is_some_and(|id| tipo_ids.contains(&id))
        }
    }

    /// Fetch catalogs and routes together and keep this directory's routes.
    ///
    /// # Errors
    /// Any failed lookup fails the whole listing.
    pub async fn load(self, services: &Services) -> Result<Vec<RouteSummary>, ApiError> {
        let (catalogs, rutas) =
            futures::try_join!(RouteCatalogs::load(services), services.rutas.list())?;
        let listed: Vec<RouteSummary> = rutas
            .iter()
            .filter(|ruta| self.includes(ruta, &catalogs.tipos))
            .map(|ruta| RouteSummary::enrich(ruta, &catalogs))
            .collect();
        log::info!("{} of {} routes listed as {}", listed.len(), rutas.len(), self.segment());
        Ok(listed)
    }
}
