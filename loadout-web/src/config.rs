//! Build-time and bundled configuration for the page.
use loadout_core::{CatalogSource, RollPacing};

const PACING_DATA: &str = include_str!("../static/assets/data/pacing.json");

/// Roll timings from the bundled pacing asset, or the defaults if it does
/// not parse.
#[must_use]
pub fn roll_pacing() -> RollPacing {
    parse_pacing(PACING_DATA)
}

/// Catalog location. `LOADOUT_DATA_URL` set at compile time replaces the
/// base URL, e.g. to serve a mirrored copy next to the page.
#[must_use]
pub fn catalog_source() -> CatalogSource {
    source_with_override(option_env!("LOADOUT_DATA_URL"))
}

fn parse_pacing(raw: &str) -> RollPacing {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        log::warn!("Ignoring bundled pacing data: {err}");
        RollPacing::default()
    })
}

fn source_with_override(base_url: Option<&str>) -> CatalogSource {
    match base_url.map(str::trim) {
        Some(base) if !base.is_empty() => {
            let base = if base.ends_with('/') {
                base.to_string()
            } else {
                format!("{base}/")
            };
            CatalogSource::with_base_url(base)
        }
        _ => CatalogSource::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_pacing_matches_defaults() {
        assert_eq!(roll_pacing(), RollPacing::default());
    }

    #[test]
    fn broken_pacing_falls_back() {
        assert_eq!(parse_pacing("{ nope"), RollPacing::default());
        assert_eq!(parse_pacing(r#"{"tick_ms": 30}"#).tick_ms, 30);
    }

    #[test]
    fn data_url_override_replaces_base() {
        assert_eq!(source_with_override(None), CatalogSource::default());
        assert_eq!(source_with_override(Some("  ")), CatalogSource::default());
        assert_eq!(
            source_with_override(Some("/mirror")).base_url,
            "/mirror/"
        );
        assert_eq!(
            source_with_override(Some("https://cdn.test/hd2/")).base_url,
            "https://cdn.test/hd2/"
        );
    }
}
