//! Privilege classification of the cached user profile.
//!
//! The backends have returned the role as `idRol`, as a nested `rol {id, nombre}` object,
//! and as a bare name; this module is the only place that knows about those shapes.

use serde_json::Value;

const ADMIN_ROLE_ID: i64 = 1;
const MODERATOR_ROLE_ID: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    Member,
}

impl Role {
    /// Classify a decoded user profile. Anything unrecognised is a plain member.
    ///
    /// A recognised role id decides alone and the name is only consulted without one, so a
    /// profile maps to exactly one role and admin and moderator flags are never both set.
    #[must_use]
    pub fn classify(profile: &Value) -> Self {
        match role_id(profile) {
            Some(ADMIN_ROLE_ID) => return Self::Admin,
            Some(MODERATOR_ROLE_ID) => return Self::Moderator,
            _ => {}
        }

        let Some(name) = role_name(profile) else {
            return Self::Member;
        };
        let name = name.to_lowercase();
        if name.contains("admin") || name.contains("administrador") {
            Self::Admin
        } else if name.contains("moder") {
            Self::Moderator
        } else {
            Self::Member
        }
    }
}

/// Visibility flags for privileged navigation. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_moderator: bool,
}

impl RoleFlags {
    pub const NONE: Self = Self {
        is_admin: false,
        is_moderator: false,
    };

    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        Self {
            is_admin: matches!(role, Role::Admin),
            is_moderator: matches!(role, Role::Moderator),
        }
    }

    /// Derive flags from the session flag and the raw cached profile.
    ///
    /// No session, no profile or an unparsable profile all yield [`RoleFlags::NONE`].
    #[must_use]
    pub fn derive(session_active: bool, cached_profile: Option<&str>) -> Self {
        if !session_active {
            return Self::NONE;
        }
        cached_profile
            .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
            .filter(Value::is_object)
            .map_or(Self::NONE, |profile| Self::for_role(Role::classify(&profile)))
    }
}

fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn role_id(profile: &Value) -> Option<i64> {
    profile
        .get("idRol")
        .and_then(as_id)
        .or_else(|| profile.get("rol").and_then(|rol| rol.get("id")).and_then(as_id))
        .or_else(|| profile.get("rol").and_then(as_id))
}

fn role_name(profile: &Value) -> Option<&str> {
    let rol = profile.get("rol")?;
    rol.get("nombre")
        .and_then(Value::as_str)
        .or_else(|| rol.as_str())
}

/// Value for the `X-User-Role` header: role id when known, else the role name.
#[must_use]
pub fn role_header(profile: &Value) -> Option<String> {
    role_id(profile)
        .map(|id| id.to_string())
        .or_else(|| role_name(profile).map(str::to_string))
        .filter(|value| !value.is_empty())
}

/// Numeric user id from a cached profile.
#[must_use]
pub fn user_id(profile: &Value) -> Option<i64> {
    ["id", "idUsuario", "id_usuario"]
        .iter()
        .find_map(|key| profile.get(*key).and_then(as_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_by_numeric_id_first() {
        assert_eq!(Role::classify(&json!({"idRol": 1})), Role::Admin);
        assert_eq!(Role::classify(&json!({"idRol": "2"})), Role::Moderator);
        assert_eq!(Role::classify(&json!({"rol": {"id": 2}})), Role::Moderator);
        assert_eq!(
            Role::classify(&json!({"idRol": 3, "rol": {"nombre": "Usuario"}})),
            Role::Member
        );
    }

    #[test]
    fn classifies_by_role_name_case_insensitively() {
        assert_eq!(
            Role::classify(&json!({"rol": {"nombre": "ADMINISTRADOR"}})),
            Role::Admin
        );
        assert_eq!(
            Role::classify(&json!({"rol": {"nombre": "Moderadora"}})),
            Role::Moderator
        );
        assert_eq!(Role::classify(&json!({"rol": "SuperAdmin"})), Role::Admin);
        assert_eq!(Role::classify(&json!({"correo": "x@y.cl"})), Role::Member);
    }

    #[test]
    fn role_id_outranks_a_conflicting_name() {
        let profile = json!({"idRol": 2, "rol": {"id": 2, "nombre": "Administrador"}});
        assert_eq!(Role::classify(&profile), Role::Moderator);
        let flags = RoleFlags::derive(true, Some(&profile.to_string()));
        assert!(flags.is_moderator);
        assert!(!flags.is_admin);
    }

    #[test]
    fn flags_fail_closed() {
        let admin = r#"{"idRol":1}"#;
        assert_eq!(RoleFlags::derive(false, Some(admin)), RoleFlags::NONE);
        assert_eq!(RoleFlags::derive(true, None), RoleFlags::NONE);
        assert_eq!(RoleFlags::derive(true, Some("not json")), RoleFlags::NONE);
        assert_eq!(RoleFlags::derive(true, Some("[1]")), RoleFlags::NONE);
        assert!(RoleFlags::derive(true, Some(admin)).is_admin);
        assert!(!RoleFlags::derive(true, Some(admin)).is_moderator);
    }

    #[test]
    fn role_header_prefers_id_then_name() {
        assert_eq!(role_header(&json!({"idRol": 2})).as_deref(), Some("2"));
        assert_eq!(
            role_header(&json!({"rol": {"nombre": "MODERADOR"}})).as_deref(),
            Some("MODERADOR")
        );
        assert!(role_header(&json!({})).is_none());
    }

    #[test]
    fn user_id_reads_known_spellings() {
        assert_eq!(user_id(&json!({"id": 7})), Some(7));
        assert_eq!(user_id(&json!({"idUsuario": "9"})), Some(9));
        assert_eq!(user_id(&json!({"id_usuario": 4})), Some(4));
        assert_eq!(user_id(&json!({"correo": "x"})), None);
    }
}
