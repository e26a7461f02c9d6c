//! Banner messages raised by page actions.

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Info,
    Danger,
}

impl NoticeKind {
    /// Success and info banners expire on their own; failures stay until dismissed.
    #[must_use]
    pub const fn auto_dismiss_ms(self) -> Option<u32> {
        match self {
            Self::Success | Self::Info => Some(4000),
            Self::Danger => None,
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Info => "alert alert-info",
            Self::Danger => "alert alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    #[must_use]
    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Danger, text)
    }

    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        Self::danger(err.user_message())
    }

    /// Failures belong to the page that raised them and are dropped on navigation.
    #[must_use]
    pub const fn survives_navigation(&self) -> bool {
        !matches!(self.kind, NoticeKind::Danger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_persist() {
        assert_eq!(NoticeKind::Success.auto_dismiss_ms(), Some(4000));
        assert_eq!(NoticeKind::Info.auto_dismiss_ms(), Some(4000));
        assert_eq!(NoticeKind::Danger.auto_dismiss_ms(), None);
    }

    #[test]
    fn only_failures_are_dropped_on_navigation() {
        assert!(Notice::success("Ruta creada correctamente.").survives_navigation());
        assert!(Notice::info("Cargando").survives_navigation());
        assert!(!Notice::danger("Error al conectar con el servidor.").survives_navigation());
    }

    #[test]
    fn errors_become_danger_notices() {
        let notice = Notice::from_error(&ApiError::http(404, ""));
        assert_eq!(notice.kind, NoticeKind::Danger);
        assert!(!notice.text.is_empty());
    }
}
