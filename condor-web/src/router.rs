use condor_core::RouteListing;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/nosotros")]
    About,
    #[at("/oficiales")]
    Official,
    #[at("/comunitarias")]
    Community,
    #[at("/rutas/:tipo/:id")]
    RouteDetail { tipo: String, id: i64 },
    #[at("/admin")]
    Admin,
    #[at("/moderador")]
    Moderator,
    #[at("/gestor")]
    AchievementManager,
    #[at("/contacto")]
    Contact,
    #[at("/mis-logros")]
    MyAchievements,
    #[at("/login")]
    Login,
    #[at("/perfil")]
    Profile,
    #[at("/ajustes")]
    Settings,
    #[at("/register")]
    Register,
    #[at("/ayuda")]
    Help,
    #[at("/404")]
    #[not_found]
    NotFound,
}

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    SignedIn,
    Admin,
    Moderator,
}

impl Route {
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Admin => Access::Admin,
            Self::Moderator | Self::AchievementManager => Access::Moderator,
            Self::Profile | Self::Settings | Self::MyAchievements => Access::SignedIn,
            _ => Access::Public,
        }
    }

    /// Directory listing a route belongs to.
    #[must_use]
    pub const fn listing(listing: RouteListing) -> Self {
        match listing {
            RouteListing::Official => Self::Official,
            RouteListing::Community => Self::Community,
        }
    }

    #[must_use]
    pub fn detail(listing: RouteListing, id: i64) -> Self {
        Self::RouteDetail {
            tipo: listing.segment().to_string(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_the_public_urls() {
        assert_eq!(Route::Official.to_path(), "/oficiales");
        assert_eq!(Route::MyAchievements.to_path(), "/mis-logros");
        assert_eq!(
            Route::detail(RouteListing::Community, 12).to_path(),
            "/rutas/comunitarias/12"
        );
        assert_eq!(
            Route::recognize("/rutas/oficiales/3"),
            Some(Route::RouteDetail {
                tipo: "oficiales".into(),
                id: 3
            })
        );
    }

    #[test]
    fn protected_routes_declare_their_audience() {
        assert_eq!(Route::Admin.access(), Access::Admin);
        assert_eq!(Route::AchievementManager.access(), Access::Moderator);
        assert_eq!(Route::Settings.access(), Access::SignedIn);
        assert_eq!(Route::Contact.access(), Access::Public);
    }
}
