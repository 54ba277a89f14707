use crate::error::ChartError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Celestial bodies the engine can place on a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
    Chiron,
}

// Swiss Ephemeris body numbers
const BODIES: &[(&str, Body, i32)] = &[
    ("sun", Body::Sun, 0),
    ("moon", Body::Moon, 1),
    ("mercury", Body::Mercury, 2),
    ("venus", Body::Venus, 3),
    ("mars", Body::Mars, 4),
    ("jupiter", Body::Jupiter, 5),
    ("saturn", Body::Saturn, 6),
    ("uranus", Body::Uranus, 7),
    ("neptune", Body::Neptune, 8),
    ("pluto", Body::Pluto, 9),
    ("mean-node", Body::MeanNode, 10),
    ("true-node", Body::TrueNode, 11),
    ("chiron", Body::Chiron, 15),
];

impl Body {
    /// The seven traditional bodies, in chart order
    pub const TRADITIONAL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    /// Engine body number
    pub fn id(self) -> i32 {
        self.entry().2
    }

    /// Lowercase key used in configuration and on the command line
    pub fn key(self) -> &'static str {
        self.entry().0
    }

    pub fn valid_keys() -> Vec<String> {
        BODIES.iter().map(|(key, _, _)| key.to_string()).collect()
    }

    fn entry(self) -> &'static (&'static str, Body, i32) {
        // every variant has exactly one row
        BODIES
            .iter()
            .find(|(_, body, _)| *body == self)
            .unwrap_or(&BODIES[0])
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        BODIES
            .iter()
            .find(|(key, _, _)| *key == lowered)
            .map(|(_, body, _)| *body)
            .ok_or_else(|| ChartError::UnknownBody {
                input: s.to_string(),
                valid: Body::valid_keys(),
            })
    }
}

/// Instantaneous position and motion of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Distance from Earth in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed_longitude: f64,
    /// Speed in latitude (degrees per day)
    pub speed_latitude: f64,
    /// Speed in distance (AU per day)
    pub speed_distance: f64,
}

impl BodyPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed_longitude < 0.0
    }
}

/// House cusps and chart angles for one time and place
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseData {
    /// Cusps of houses 1 through 12, in order
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub mc: f64,
    /// Local sidereal time in degrees
    pub armc: f64,
    pub vertex: f64,
}
