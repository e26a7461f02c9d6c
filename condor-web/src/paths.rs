//! URLs for static assets and the router basename.
///
/// `PUBLIC_URL` (read at compile time) prefixes both, so the app can be served from a
/// subdirectory. Without it everything is root-anchored.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Basename handed to `BrowserRouter`; `None` when served from `/`.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Slides shown on the home page carousel.
pub const HOME_SLIDES: [&str; 3] = [
    "static/img/carrusel/torres-del-paine.jpg",
    "static/img/carrusel/volcan-villarrica.jpg",
    "static/img/carrusel/valle-de-la-luna.jpg",
];

pub const LOGO: &str = "static/img/logo.png";

/// Shown when a route has no photos.
pub const ROUTE_PLACEHOLDER: &str = "static/img/ruta-sin-foto.jpg";

/// Resolve a route photo: absolute and data URLs pass through, anything else is an asset.
#[must_use]
pub fn photo_url(src: &str) -> String {
    let src = src.trim();
    if src.is_empty() {
        asset_path(ROUTE_PLACEHOLDER)
    } else if src.starts_with("http://")
        || src.starts_with("https://")
        || src.starts_with("data:")
        || src.starts_with("//")
    {
        src.to_string()
    } else {
        asset_path(src)
    }
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    (!base.is_empty()).then(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_are_root_anchored_without_a_base() {
        assert_eq!(asset_path(LOGO), "/static/img/logo.png");
        assert_eq!(asset_path("/static/img/logo.png"), "/static/img/logo.png");
    }

    #[test]
    fn assets_take_the_public_base() {
        assert_eq!(
            asset_path_with_base("static/img/logo.png", "/condor/"),
            "/condor/static/img/logo.png"
        );
    }

    #[test]
    fn router_base_trims_or_disappears() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("/condor/"), Some("/condor".into()));
        assert_eq!(router_base_with_base("  "), None);
    }

    #[test]
    fn remote_photos_pass_through() {
        assert_eq!(
            photo_url("https://cdn.example.org/paine.jpg"),
            "https://cdn.example.org/paine.jpg"
        );
        assert_eq!(photo_url("data:image/png;base64,AAA"), "data:image/png;base64,AAA");
        assert_eq!(photo_url("img/rutas/1.jpg"), "/img/rutas/1.jpg");
        assert_eq!(photo_url(" "), "/static/img/ruta-sin-foto.jpg");
    }
}
