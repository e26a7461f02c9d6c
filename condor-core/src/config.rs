//! Backend base URLs.
//!
//! Each backend can be pointed elsewhere at compile time with its `CONDOR_*_API_URL`
//! variable; builds without overrides talk to the local development ports.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    Rutas,
    Usuarios,
    Contacto,
    Logros,
    Calificaciones,
}

impl Backend {
    pub const ALL: [Self; 5] = [
        Self::Rutas,
        Self::Usuarios,
        Self::Contacto,
        Self::Logros,
        Self::Calificaciones,
    ];

    #[must_use]
    pub const fn default_base(self) -> &'static str {
        match self {
            Self::Rutas => "http://localhost:8080",
            Self::Usuarios => "http://localhost:8081",
            Self::Calificaciones => "http://localhost:8082",
            Self::Logros => "http://localhost:8084",
            Self::Contacto => "http://localhost:8085",
        }
    }

    const fn env_override(self) -> Option<&'static str> {
        match self {
            Self::Rutas => option_env!("CONDOR_RUTAS_API_URL"),
            Self::Usuarios => option_env!("CONDOR_USUARIOS_API_URL"),
            Self::Contacto => option_env!("CONDOR_CONTACTO_API_URL"),
            Self::Logros => option_env!("CONDOR_LOGROS_API_URL"),
            Self::Calificaciones => option_env!("CONDOR_CALIFICACIONES_API_URL"),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rutas => "rutas",
            Self::Usuarios => "usuarios",
            Self::Contacto => "contacto",
            Self::Logros => "logros",
            Self::Calificaciones => "calificaciones",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    bases: BTreeMap<Backend, String>,
}

impl ApiConfig {
    /// Resolve every backend from compile-time overrides, falling back to localhost ports.
    #[must_use]
    pub fn from_env() -> Self {
        let bases = Backend::ALL
            .into_iter()
            .map(|backend| {
                let base = backend
                    .env_override()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .unwrap_or(backend.default_base());
                (backend, normalize_base(base))
            })
            .collect();
        Self { bases }
    }

    /// Point every backend at the same origin. Handy for tests and single-gateway deployments.
    #[must_use]
    pub fn uniform(base: &str) -> Self {
        let base = normalize_base(base);
        Self {
            bases: Backend::ALL
                .into_iter()
                .map(|backend| (backend, base.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, backend: Backend, base: &str) -> Self {
        self.bases.insert(backend, normalize_base(base));
        self
    }

    #[must_use]
    pub fn base_url(&self, backend: Backend) -> &str {
        self.bases
            .get(&backend)
            .map_or(backend.default_base(), String::as_str)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
