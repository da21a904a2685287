//! Static descriptors for the supported celestial bodies.

use serde::Serialize;

/// Descriptive facts about one celestial body.
#[derive(Debug, Clone, Serialize)]
pub struct CelestialBody {
    pub name: &'static str,
    pub description: &'static str,
    pub diameter: &'static str,
    pub gravity: &'static str,
    pub distance: &'static str,
    pub features: &'static [&'static str],
}

const EARTH: CelestialBody = CelestialBody {
    name: "Earth",
    description: "Our home planet with diverse ecosystems and abundant water",
    diameter: "12,742 km",
    gravity: "9.8 m/s²",
    distance: "N/A",
    features: &["Oceans", "Continents", "Atmosphere", "Life"],
};

const MOON: CelestialBody = CelestialBody {
    name: "Moon",
    description: "Earth's only natural satellite with cratered surface",
    diameter: "3,474 km",
    gravity: "1.6 m/s²",
    distance: "384,400 km",
    features: &["Craters", "Maria", "Highlands", "No atmosphere"],
};

const MARS: CelestialBody = CelestialBody {
    name: "Mars",
    description: "The Red Planet with polar ice caps and ancient riverbeds",
    diameter: "6,779 km",
    gravity: "3.7 m/s²",
    distance: "225M km avg",
    features: &[
        "Olympus Mons",
        "Valles Marineris",
        "Polar Ice Caps",
        "Dust Storms",
    ],
};

/// Look up a body by its lowercase route name.
pub fn lookup(body: &str) -> Option<&'static CelestialBody> {
    match body {
        "earth" => Some(&EARTH),
        "moon" => Some(&MOON),
        "mars" => Some(&MARS),
        _ => None,
    }
}
