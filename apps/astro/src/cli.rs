use astro_chart::{Body, ChartError};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Planetary positions and house cusps for a moment and place",
    allow_negative_numbers = true
)]
pub(crate) struct Args {
    /// ISO 8601 date/time in UTC, e.g. 2024-03-20T12:00:00Z
    pub datetime: String,

    /// Geographic latitude in decimal degrees (north = positive)
    pub latitude: String,

    /// Geographic longitude in decimal degrees (east = positive)
    pub longitude: String,

    /// House system: placidus, koch, whole-sign, regiomontanus, equal, campanus
    /// (default from config, otherwise placidus)
    #[arg(long)]
    pub house_system: Option<String>,

    /// Output results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Also show latitude, distance and secondary speeds of each body, ARMC and Vertex
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,

    /// Comma-separated bodies to calculate, e.g. sun,moon,true-node
    #[arg(long)]
    pub bodies: Option<String>,

    /// Directory holding Swiss Ephemeris .se1 files
    #[arg(long)]
    pub ephe_path: Option<PathBuf>,

    /// Config file (otherwise $ASTRO_CONFIG or configs/astro.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Warn when no ephemeris data files are found and precision drops
    #[arg(long, default_value_t = false)]
    pub warn_on_fallback: bool,
}

fn invalid(what: &'static str, input: &str, reason: impl ToString) -> ChartError {
    ChartError::InvalidArgument {
        what,
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse an RFC 3339 timestamp and convert it to UTC.
pub(crate) fn parse_datetime(input: &str) -> Result<DateTime<Utc>, ChartError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| invalid("datetime", input, e))
}

fn parse_degrees(what: &'static str, input: &str, limit: f64) -> Result<f64, ChartError> {
    let value: f64 = input.trim().parse().map_err(|e| invalid(what, input, e))?;
    if !value.is_finite() {
        return Err(invalid(what, input, "must be a finite number"));
    }
    if value.abs() > limit {
        return Err(invalid(what, input, format!("must be between -{limit} and {limit}")));
    }
    Ok(value)
}

pub(crate) fn parse_latitude(input: &str) -> Result<f64, ChartError> {
    parse_degrees("latitude", input, 90.0)
}

pub(crate) fn parse_longitude(input: &str) -> Result<f64, ChartError> {
    parse_degrees("longitude", input, 180.0)
}

/// Parse a comma-separated list of body keys, keeping the given order.
pub(crate) fn parse_body_list(input: &str) -> Result<Vec<Body>, ChartError> {
    let bodies = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse::<Body>)
        .collect::<Result<Vec<_>, _>>()?;
    if bodies.is_empty() {
        return Err(invalid("body list", input, "names no bodies"));
    }
    Ok(bodies)
}
