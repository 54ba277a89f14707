use crate::chart::result::{BodyEntry, ChartResult, SkippedBody};
use crate::ephemeris::{Body, EphemerisAdapter, EphemerisEngine};
use crate::error::ChartError;
use crate::houses::HouseSystem;
use crate::time::JulianDay;

/// What to do when a single body cannot be calculated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Leave the body out, record it and keep going
    #[default]
    SkipAndContinue,
    /// Fail the whole chart
    Abort,
}

/// Inputs for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub time: JulianDay,
    pub bodies: Vec<Body>,
    pub latitude: f64,
    pub longitude: f64,
    pub house_system: HouseSystem,
    pub failure_policy: FailurePolicy,
}

impl ChartRequest {
    /// Request the seven traditional bodies, skipping any that fail.
    pub fn new(time: JulianDay, latitude: f64, longitude: f64, house_system: HouseSystem) -> Self {
        Self {
            time,
            bodies: Body::TRADITIONAL.to_vec(),
            latitude,
            longitude,
            house_system,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_bodies(mut self, bodies: Vec<Body>) -> Self {
        self.bodies = bodies;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Compute a complete chart.
///
/// Bodies are calculated in request order. A body failure is handled per
/// `request.failure_policy`; a house failure always fails the chart.
pub fn assemble<E: EphemerisEngine>(
    adapter: &EphemerisAdapter<E>,
    request: &ChartRequest,
) -> Result<ChartResult, ChartError> {
    let mut bodies = Vec::with_capacity(request.bodies.len());
    let mut skipped = Vec::new();

    for &body in &request.bodies {
        match adapter.calc_body(request.time, body) {
            Ok(position) => {
                let name = adapter.name_of(body);
                bodies.push(BodyEntry::new(body, name, position));
            }
            Err(ChartError::BodyCalculation { body: name, message })
                if request.failure_policy == FailurePolicy::SkipAndContinue =>
            {
                log::warn!("skipping {}: {}", name, message);
                skipped.push(SkippedBody { name, message });
            }
            Err(e) => return Err(e),
        }
    }

    let houses = adapter.calc_houses(
        request.time,
        request.latitude,
        request.longitude,
        request.house_system,
    )?;

    Ok(ChartResult::new(
        request.time,
        request.house_system,
        request.latitude,
        request.longitude,
        bodies,
        houses,
        skipped,
    ))
}
