//! Text and JSON reports for a computed chart.

use anyhow::Context;
use astro_chart::chart::{AngleEntry, Cusp};
use astro_chart::ChartResult;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RenderOptions {
    /// Surface the secondary fields (body latitude/distance/speeds, ARMC, Vertex)
    pub verbose: bool,
}

pub(crate) fn write_text<W: Write>(out: &mut W, chart: &ChartResult, options: RenderOptions) -> io::Result<()> {
    writeln!(out, "Julian Day: {}\n", chart.julian_day())?;

    writeln!(out, "=== Planetary Positions ===")?;
    for body in chart.bodies() {
        writeln!(
            out,
            "{:<10}  {:9.4}°  ({} {:5.2}°)  speed: {:+.4}°/day",
            body.name,
            body.longitude(),
            body.placement.sign,
            body.placement.degree,
            body.speed()
        )?;
        if options.verbose {
            writeln!(
                out,
                "            lat: {:+.4}°  dist: {:.6} AU  lat speed: {:+.4}°/day  dist speed: {:+.6} AU/day",
                body.latitude(),
                body.distance(),
                body.speed_latitude(),
                body.speed_distance()
            )?;
        }
    }

    writeln!(
        out,
        "\n=== Houses ({}) for ({:.4}°, {:.4}°) ===",
        chart.house_name(),
        chart.latitude(),
        chart.longitude()
    )?;
    write_angle(out, "Ascendant:", chart.ascendant())?;
    write_angle(out, "MC:", chart.mc())?;
    if options.verbose {
        writeln!(out, "{:<10}  {:9.4}°", "ARMC:", chart.armc())?;
        write_angle(out, "Vertex:", chart.vertex())?;
    }

    writeln!(out, "\nHouse cusps:")?;
    for cusp in chart.cusps() {
        writeln!(
            out,
            "  House {:2}: {:9.4}°  ({} {:.2}°)",
            cusp.house, cusp.longitude, cusp.placement.sign, cusp.placement.degree
        )?;
    }
    Ok(())
}

fn write_angle<W: Write>(out: &mut W, label: &str, angle: &AngleEntry) -> io::Result<()> {
    writeln!(
        out,
        "{:<10}  {:9.4}°  ({} {:.2}°)",
        label, angle.longitude, angle.placement.sign, angle.placement.degree
    )
}

#[derive(Serialize)]
struct PlanetJson<'a> {
    name: &'a str,
    longitude: f64,
    sign: &'static str,
    sign_degree: f64,
    speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed_distance: Option<f64>,
}

#[derive(Serialize)]
struct AngleJson {
    longitude: f64,
    sign: &'static str,
    sign_degree: f64,
}

impl From<&AngleEntry> for AngleJson {
    fn from(angle: &AngleEntry) -> Self {
        Self {
            longitude: angle.longitude,
            sign: angle.placement.sign.name(),
            sign_degree: angle.placement.degree,
        }
    }
}

#[derive(Serialize)]
struct CuspJson {
    house: u8,
    longitude: f64,
    sign: &'static str,
    sign_degree: f64,
}

impl From<&Cusp> for CuspJson {
    fn from(cusp: &Cusp) -> Self {
        Self {
            house: cusp.house,
            longitude: cusp.longitude,
            sign: cusp.placement.sign.name(),
            sign_degree: cusp.placement.degree,
        }
    }
}

#[derive(Serialize)]
struct HousesJson {
    system: &'static str,
    ascendant: AngleJson,
    mc: AngleJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    armc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vertex: Option<AngleJson>,
    cusps: Vec<CuspJson>,
}

#[derive(Serialize)]
struct ResultJson<'a> {
    julian_day: f64,
    planets: Vec<PlanetJson<'a>>,
    houses: HousesJson,
}

/// Encode the whole chart as pretty-printed JSON.
///
/// The document is built in memory so nothing is written if encoding fails.
pub(crate) fn to_json(chart: &ChartResult, options: RenderOptions) -> anyhow::Result<String> {
    let verbose = |v: f64| options.verbose.then_some(v);

    let planets = chart
        .bodies()
        .iter()
        .map(|body| PlanetJson {
            name: &body.name,
            longitude: body.longitude(),
            sign: body.placement.sign.name(),
            sign_degree: body.placement.degree,
            speed: body.speed(),
            latitude: verbose(body.latitude()),
            distance: verbose(body.distance()),
            speed_lat: verbose(body.speed_latitude()),
            speed_distance: verbose(body.speed_distance()),
        })
        .collect();

    let doc = ResultJson {
        julian_day: chart.julian_day().value(),
        planets,
        houses: HousesJson {
            system: chart.house_name(),
            ascendant: chart.ascendant().into(),
            mc: chart.mc().into(),
            armc: verbose(chart.armc()),
            vertex: options.verbose.then(|| chart.vertex().into()),
            cusps: chart.cusps().iter().map(CuspJson::from).collect(),
        },
    };

    serde_json::to_string_pretty(&doc).context("error marshalling JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_chart::{assemble, Body, ChartRequest, EphemerisAdapter, EphemerisEngine, HouseData, HouseSystem, JulianDay};

    struct FixedEngine;

    impl EphemerisEngine for FixedEngine {
        fn set_data_path(&mut self, _path: &str) {}

        fn body_name(&mut self, body: Body) -> String {
            match body {
                Body::Sun => "Sun".to_string(),
                _ => "Moon".to_string(),
            }
        }

        fn calc_body(&mut self, _jd_ut: f64, body: Body) -> Result<[f64; 6], String> {
            match body {
                Body::Sun => Ok([280.5, 0.0001, 0.9833, 1.0194, 0.0, -0.00001]),
                _ => Ok([45.25, -5.1, 0.0027, -13.1, 0.5, 0.00002]),
            }
        }

        fn calc_houses(&mut self, _jd_ut: f64, _lat: f64, _lon: f64, _code: char) -> Result<HouseData, i32> {
            let mut cusps = [0.0; 12];
            for (i, cusp) in cusps.iter_mut().enumerate() {
                *cusp = 24.0 + 30.0 * i as f64;
            }
            Ok(HouseData { cusps, ascendant: 24.0, mc: 280.0, armc: 282.5, vertex: 190.0 })
        }

        fn close(&mut self) {}
    }

    fn chart(time: JulianDay) -> ChartResult {
        let adapter = EphemerisAdapter::new(FixedEngine);
        let request = ChartRequest::new(time, 51.5074, -0.1278, HouseSystem::WholeSign)
            .with_bodies(vec![Body::Sun, Body::Moon]);
        assemble(&adapter, &request).unwrap()
    }

    fn j2000() -> JulianDay {
        astro_chart::to_native_time(2000, 1, 1, 12.0)
    }

    fn text(options: RenderOptions) -> String {
        let mut buf = Vec::new();
        write_text(&mut buf, &chart(j2000()), options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_report() {
        let out = text(RenderOptions::default());
        assert!(out.starts_with("Julian Day: 2451545.000000\n\n=== Planetary Positions ===\n"));
        assert!(out.contains("Sun          280.5000°  (Capricorn 10.50°)  speed: +1.0194°/day\n"));
        assert!(out.contains("Moon          45.2500°  (Taurus 15.25°)  speed: -13.1000°/day\n"));
        assert!(out.contains("=== Houses (Whole Sign) for (51.5074°, -0.1278°) ===\n"));
        assert!(out.contains("Ascendant:    24.0000°  (Aries 24.00°)\n"));
        assert!(out.contains("  House  1:   24.0000°  (Aries 24.00°)\n"));
        assert!(out.contains("  House 12:  354.0000°  (Pisces 24.00°)\n"));
        assert!(!out.contains("ARMC"));
        assert!(!out.contains("dist:"));
    }

    #[test]
    fn test_verbose_text_adds_secondary_fields() {
        let out = text(RenderOptions { verbose: true });
        assert!(out.contains("ARMC:        282.5000°\n"));
        assert!(out.contains("Vertex:      190.0000°  (Libra 10.00°)\n"));
        assert!(out.contains("lat: -5.1000°  dist: 0.002700 AU"));
    }

    #[test]
    fn test_json_report() {
        let doc = to_json(&chart(j2000()), RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(value["julian_day"], 2451545.0);
        assert_eq!(value["planets"][0]["name"], "Sun");
        assert_eq!(value["planets"][0]["sign"], "Capricorn");
        assert_eq!(value["planets"][1]["speed"], -13.1);
        assert!(value["planets"][0].get("distance").is_none());
        assert_eq!(value["houses"]["system"], "Whole Sign");
        assert_eq!(value["houses"]["cusps"].as_array().unwrap().len(), 12);
        assert_eq!(value["houses"]["cusps"][11]["house"], 12);
        assert!(value["houses"].get("armc").is_none());
        assert!(value["houses"].get("vertex").is_none());
    }

    #[test]
    fn test_verbose_json_includes_every_field() {
        let doc = to_json(&chart(j2000()), RenderOptions { verbose: true }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(value["planets"][0]["distance"], 0.9833);
        assert_eq!(value["planets"][1]["latitude"], -5.1);
        assert_eq!(value["planets"][1]["speed_lat"], 0.5);
        assert_eq!(value["planets"][1]["speed_distance"], 0.00002);
        assert_eq!(value["houses"]["armc"], 282.5);
        assert_eq!(value["houses"]["vertex"]["sign"], "Libra");
    }
}
