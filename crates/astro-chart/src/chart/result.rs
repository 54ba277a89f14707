use crate::ephemeris::{Body, BodyPosition, HouseData};
use crate::houses::HouseSystem;
use crate::time::JulianDay;
use crate::zodiac::{placement, ZodiacPlacement};
use serde::Serialize;

/// One computed body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyEntry {
    pub body: Body,
    /// Engine display name ("Sun", "Moon", ...)
    pub name: String,
    pub position: BodyPosition,
    pub placement: ZodiacPlacement,
}

impl BodyEntry {
    pub(crate) fn new(body: Body, name: String, position: BodyPosition) -> Self {
        Self {
            body,
            name,
            placement: placement(position.longitude),
            position,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }

    /// Daily speed in longitude
    pub fn speed(&self) -> f64 {
        self.position.speed_longitude
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub fn distance(&self) -> f64 {
        self.position.distance
    }

    pub fn speed_latitude(&self) -> f64 {
        self.position.speed_latitude
    }

    pub fn speed_distance(&self) -> f64 {
        self.position.speed_distance
    }
}

/// A chart point expressed as a longitude and its zodiac placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleEntry {
    pub longitude: f64,
    pub placement: ZodiacPlacement,
}

impl AngleEntry {
    fn new(longitude: f64) -> Self {
        Self { longitude, placement: placement(longitude) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartAngles {
    pub ascendant: AngleEntry,
    pub mc: AngleEntry,
    /// Sidereal angle in degrees, no zodiac meaning
    pub armc: f64,
    pub vertex: AngleEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cusp {
    /// House number, 1-12
    pub house: u8,
    pub longitude: f64,
    pub placement: ZodiacPlacement,
}

/// A body left out of the chart under [`FailurePolicy::SkipAndContinue`]
///
/// [`FailurePolicy::SkipAndContinue`]: crate::chart::FailurePolicy::SkipAndContinue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedBody {
    pub name: String,
    pub message: String,
}

/// Fully computed chart. Built once by [`assemble`] and read-only afterwards.
///
/// [`assemble`]: crate::chart::assemble
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    julian_day: JulianDay,
    house_system: HouseSystem,
    latitude: f64,
    longitude: f64,
    bodies: Vec<BodyEntry>,
    angles: ChartAngles,
    cusps: Vec<Cusp>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<SkippedBody>,
}

impl ChartResult {
    pub(crate) fn new(
        julian_day: JulianDay,
        house_system: HouseSystem,
        latitude: f64,
        longitude: f64,
        bodies: Vec<BodyEntry>,
        houses: HouseData,
        skipped: Vec<SkippedBody>,
    ) -> Self {
        let cusps = houses
            .cusps
            .iter()
            .zip(1u8..)
            .map(|(&lon, house)| Cusp { house, longitude: lon, placement: placement(lon) })
            .collect();

        Self {
            julian_day,
            house_system,
            latitude,
            longitude,
            bodies,
            angles: ChartAngles {
                ascendant: AngleEntry::new(houses.ascendant),
                mc: AngleEntry::new(houses.mc),
                armc: houses.armc,
                vertex: AngleEntry::new(houses.vertex),
            },
            cusps,
            skipped,
        }
    }

    pub fn julian_day(&self) -> JulianDay {
        self.julian_day
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    /// Canonical display name of the house system ("Whole Sign")
    pub fn house_name(&self) -> &'static str {
        self.house_system.display_name()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Computed bodies, in request order
    pub fn bodies(&self) -> &[BodyEntry] {
        &self.bodies
    }

    pub fn angles(&self) -> &ChartAngles {
        &self.angles
    }

    pub fn ascendant(&self) -> &AngleEntry {
        &self.angles.ascendant
    }

    pub fn mc(&self) -> &AngleEntry {
        &self.angles.mc
    }

    pub fn armc(&self) -> f64 {
        self.angles.armc
    }

    pub fn vertex(&self) -> &AngleEntry {
        &self.angles.vertex
    }

    /// Always 12 entries, houses 1 through 12
    pub fn cusps(&self) -> &[Cusp] {
        &self.cusps
    }

    /// Look up a cusp by house number (1-12)
    pub fn cusp(&self, house: u8) -> Option<&Cusp> {
        if house == 0 {
            return None;
        }
        self.cusps.get(house as usize - 1)
    }

    pub fn skipped(&self) -> &[SkippedBody] {
        &self.skipped
    }
}
