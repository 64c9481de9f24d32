//! Built-in glacier catalogue: three presets spanning the difficulty
//! range, used when no scenario file is given.

use firn_core::scenario::GlacierScenario;

pub struct CatalogEntry {
    pub scenario: GlacierScenario,
    pub blurb: &'static str,
}

/// All built-in glaciers, in menu order.
pub fn builtin() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            scenario: scenario("Titanus Glacies", 2000.0, 500.0, 100.0, 8.0),
            blurb: "Massive, ancient ice. Thick but highly sensitive to temperature swings.",
        },
        CatalogEntry {
            scenario: scenario("Fortress Peak", 800.0, 150.0, 100.0, 4.0),
            blurb: "Small, compact high-altitude glacier. Very stable, low volume reserves.",
        },
        CatalogEntry {
            scenario: scenario("Equinox Fields", 1200.0, 300.0, 100.0, 6.0),
            blurb: "Balanced thickness and sensitivity. Good for a first run.",
        },
    ]
}

/// Look up a built-in glacier by name, case-insensitively. A unique
/// prefix is enough: `--scenario fortress` finds Fortress Peak.
pub fn find(name: &str) -> Option<CatalogEntry> {
    let wanted = name.to_ascii_lowercase();
    let entries = builtin();

    if let Some(i) = entries
        .iter()
        .position(|e| e.scenario.name.to_ascii_lowercase() == wanted)
    {
        return entries.into_iter().nth(i);
    }

    let mut matches = entries
        .into_iter()
        .filter(|e| e.scenario.name.to_ascii_lowercase().starts_with(&wanted));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None; // ambiguous prefix
    }
    Some(first)
}

fn scenario(
    name: &str,
    ice_thickness: f64,
    surface_area: f64,
    stability: f64,
    temp_sensitivity: f64,
) -> GlacierScenario {
    GlacierScenario {
        name: name.to_string(),
        ice_thickness,
        surface_area,
        stability,
        temp_sensitivity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scenarios_all_validate() {
        for entry in builtin() {
            assert!(
                entry.scenario.validate().is_ok(),
                "built-in glacier {} must be valid",
                entry.scenario.name
            );
        }
    }

    #[test]
    fn find_matches_case_insensitive_prefixes() {
        assert_eq!(find("fortress").unwrap().scenario.name, "Fortress Peak");
        assert_eq!(find("TITANUS GLACIES").unwrap().scenario.name, "Titanus Glacies");
        assert_eq!(find("eq").unwrap().scenario.name, "Equinox Fields");
        assert!(find("atlantis").is_none());
    }

    #[test]
    fn ambiguous_prefix_matches_nothing() {
        // The empty prefix matches every entry.
        assert!(find("").is_none());
    }
}
