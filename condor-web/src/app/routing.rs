use crate::router::{Access, Route};
use condor_core::{Notice, SessionSnapshot};
use yew::prelude::*;

/// Where a request for `route` should land instead, if anywhere.
///
/// Privileged screens fall back to Home for everyone without the flag, including
/// anonymous visitors. Account screens send anonymous visitors to the login page.
#[must_use]
pub fn guard(route: &Route, session: &SessionSnapshot) -> Option<Route> {
    match route.access() {
        Access::Public => None,
        Access::Admin => (!session.flags.is_admin).then_some(Route::Home),
        Access::Moderator => (!session.flags.is_moderator).then_some(Route::Home),
        Access::SignedIn => (!session.active).then_some(Route::Login),
    }
}

/// Target of the "Perfil" navigation entry.
#[must_use]
pub const fn profile_entry(session: &SessionSnapshot) -> Route {
    if session.active {
        Route::Profile
    } else {
        Route::Login
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_scroll_to_top(route: Option<Route>) {
    use_effect_with(route, |_| {
        crate::dom::scroll_to_top();
    });
}

/// Drop a failure banner once the visitor moves to another screen.
#[hook]
pub fn use_clear_notice_on_navigation(
    route: Option<Route>,
    notice: UseStateHandle<Option<Notice>>,
) {
    use_effect_with(route, move |_| {
        if (*notice).as_ref().is_some_and(|current| !current.survives_navigation()) {
            notice.set(None);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use condor_core::RoleFlags;

    fn session(active: bool, flags: RoleFlags) -> SessionSnapshot {
        SessionSnapshot {
            active,
            email: active.then(|| "ana@condor.cl".to_string()),
            flags,
        }
    }

    const ADMIN: RoleFlags = RoleFlags {
        is_admin: true,
        is_moderator: false,
    };
    const MODERATOR: RoleFlags = RoleFlags {
        is_admin: false,
        is_moderator: true,
    };

    #[test]
    fn public_routes_never_redirect() {
        let anonymous = SessionSnapshot::default();
        for route in [Route::Home, Route::Official, Route::Contact, Route::Login, Route::Help] {
            assert_eq!(guard(&route, &anonymous), None);
        }
    }

    #[test]
    fn admin_panel_needs_the_admin_flag() {
        assert_eq!(guard(&Route::Admin, &session(true, ADMIN)), None);
        assert_eq!(guard(&Route::Admin, &session(true, MODERATOR)), Some(Route::Home));
        assert_eq!(guard(&Route::Admin, &SessionSnapshot::default()), Some(Route::Home));
    }

    #[test]
    fn moderator_screens_need_the_moderator_flag() {
        for route in [Route::Moderator, Route::AchievementManager] {
            assert_eq!(guard(&route, &session(true, MODERATOR)), None);
            assert_eq!(guard(&route, &session(true, ADMIN)), Some(Route::Home));
            assert_eq!(guard(&route, &session(true, RoleFlags::NONE)), Some(Route::Home));
        }
    }

    #[test]
    fn account_screens_send_visitors_to_login() {
        for route in [Route::Profile, Route::Settings, Route::MyAchievements] {
            assert_eq!(guard(&route, &SessionSnapshot::default()), Some(Route::Login));
            assert_eq!(guard(&route, &session(true, RoleFlags::NONE)), None);
        }
    }

    #[test]
    fn profile_entry_follows_the_session() {
        assert_eq!(profile_entry(&SessionSnapshot::default()), Route::Login);
        assert_eq!(profile_entry(&session(true, RoleFlags::NONE)), Route::Profile);
    }
}
