//! One thin client per backend. Each method maps to exactly one REST call.

mod calificaciones;
mod contacto;
mod logros;
mod rutas;
mod usuarios;

pub use calificaciones::CalificacionesService;
pub use contacto::ContactoService;
pub use logros::LogrosService;
pub use rutas::RutasService;
pub use usuarios::UsuariosService;

use crate::config::{ApiConfig, Backend};
use crate::http::{ClientFactory, Transport};
use crate::session::SessionContext;
use crate::storage::KeyValueStore;
use std::rc::Rc;

/// Header carrying the caller's role to the moderator-only endpoints.
pub const ROLE_HEADER: &str = "X-User-Role";

/// Everything a page needs to talk to the outside world.
#[derive(Clone, Debug)]
pub struct Services {
    pub rutas: RutasService,
    pub usuarios: UsuariosService,
    pub contacto: ContactoService,
    pub logros: LogrosService,
    pub calificaciones: CalificacionesService,
    pub session: SessionContext,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

impl Services {
    #[must_use]
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn Transport>,
        store: Rc<dyn KeyValueStore>,
    ) -> Self {
        let factory = ClientFactory::new(config, transport, Rc::clone(&store));
        let session = SessionContext::new(store);
        Self::from_factory(&factory, session)
    }

    #[must_use]
    pub fn from_factory(factory: &ClientFactory, session: SessionContext) -> Self {
        Self {
            rutas: RutasService::new(factory.client(Backend::Rutas)),
            usuarios: UsuariosService::new(factory.client(Backend::Usuarios)),
            contacto: ContactoService::new(factory.client(Backend::Contacto), session.clone()),
            logros: LogrosService::new(factory.client(Backend::Logros), session.clone()),
            calificaciones: CalificacionesService::new(factory.client(Backend::Calificaciones)),
            session,
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.session.store()
    }
}
