//! Chart computation engine.
//!
//! Turns an instant and a geographic location into planetary positions, house
//! cusps and chart angles. All access to the Swiss Ephemeris goes through
//! [`EphemerisAdapter`], which serializes calls into the non-reentrant native
//! library.

pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod time;
pub mod zodiac;

pub use chart::{assemble, ChartRequest, ChartResult, FailurePolicy};
pub use ephemeris::{Body, BodyPosition, EphemerisAdapter, EphemerisEngine, HouseData, SwissEngine};
pub use error::ChartError;
pub use houses::{resolve_house_system, HouseSystem};
pub use time::{julian_day_from_datetime, to_native_time, JulianDay};
pub use zodiac::{normalize_degrees, placement, Sign, ZodiacPlacement};
