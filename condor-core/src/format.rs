//! Display helpers shared by cards, detail pages and the admin tables.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `"H h M min"`, `"M min"`, or `"-"` when unknown or zero.
#[must_use]
pub fn format_duration(secs: Option<i64>) -> String {
    match secs {
        Some(secs) if secs > 0 => {
            let hours = secs / 3600;
            let minutes = (secs % 3600) / 60;
            if hours > 0 {
                format!("{hours} h {minutes} min")
            } else {
                format!("{minutes} min")
            }
        }
        _ => "-".to_string(),
    }
}

/// Rounded average clamped to 0..=5.
#[must_use]
pub fn star_count(average: f64) -> usize {
    if !average.is_finite() || average <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = average.round() as usize;
    rounded.min(5)
}

/// Five glyphs: filled for the rounded average, hollow for the rest.
#[must_use]
pub fn stars(average: f64) -> String {
    let filled = star_count(average);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Average with one decimal, as shown next to the stars.
#[must_use]
pub fn format_average(average: f64) -> String {
    format!("{average:.1}")
}

/// CSS classes for a difficulty badge.
#[must_use]
pub fn difficulty_badge(name: &str) -> &'static str {
    match name.trim().to_uppercase().as_str() {
        "FACIL" | "FÁCIL" => "badge bg-success",
        "MODERADO" | "NORMAL" => "badge bg-warning text-dark",
        "DIFICIL" | "DIFÍCIL" | "EXTREMO" => "badge bg-danger",
        _ => "badge bg-secondary",
    }
}

/// Kilometres with two decimals, or `"N/D"`.
#[must_use]
pub fn format_distance(km: Option<f64>) -> String {
    km.filter(|km| km.is_finite())
        .map_or_else(|| "N/D".to_string(), |km| format!("{km:.2} km"))
}

/// Public Google Maps embed centred on the route name (plus region when known).
#[must_use]
pub fn maps_embed_url(name: &str, region: Option<&str>) -> String {
    let query = match region.filter(|region| !region.trim().is_empty()) {
        Some(region) => format!("{name} {region}"),
        None => name.to_string(),
    };
    format!(
        "https://www.google.com/maps?q={}&output=embed",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(0)), "-");
        assert_eq!(format_duration(Some(45 * 60)), "45 min");
        assert_eq!(format_duration(Some(5400)), "1 h 30 min");
    }

    #[test]
    fn stars_round_and_clamp() {
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(3.5), "★★★★☆");
        assert_eq!(stars(4.4), "★★★★☆");
        assert_eq!(stars(9.0), "★★★★★");
        assert_eq!(stars(f64::NAN), "☆☆☆☆☆");
        assert_eq!(format_average(4.26), "4.3");
    }

    #[test]
    fn badges_by_difficulty() {
        assert_eq!(difficulty_badge("facil"), "badge bg-success");
        assert_eq!(difficulty_badge("NORMAL"), "badge bg-warning text-dark");
        assert_eq!(difficulty_badge("Extremo"), "badge bg-danger");
        assert_eq!(difficulty_badge("?"), "badge bg-secondary");
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(Some(12.0)), "12.00 km");
        assert_eq!(format_distance(None), "N/D");
    }

    #[test]
    fn maps_url_encodes_name_and_region() {
        assert_eq!(
            maps_embed_url("Cerro Renca", Some("Metropolitana")),
            "https://www.google.com/maps?q=Cerro%20Renca%20Metropolitana&output=embed"
        );
        assert_eq!(
            maps_embed_url("Salto (Apoquindo)", None),
            "https://www.google.com/maps?q=Salto%20(Apoquindo)&output=embed"
        );
    }
}
