use crate::ephemeris::engine::{EphemerisEngine, SwissEngine};
use crate::ephemeris::types::{Body, BodyPosition, HouseData};
use crate::error::ChartError;
use crate::houses::HouseSystem;
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

lazy_static::lazy_static! {
    static ref GLOBAL: EphemerisAdapter<SwissEngine> = EphemerisAdapter::new(SwissEngine::new());
}

/// Serialized access to a non-reentrant ephemeris engine.
///
/// Each method holds the lock for exactly one native call. Orchestration
/// (unit conversion, normalization, error mapping) runs outside the lock.
pub struct EphemerisAdapter<E: EphemerisEngine> {
    engine: Mutex<E>,
}

impl EphemerisAdapter<SwissEngine> {
    /// The process-wide Swiss Ephemeris instance
    pub fn global() -> &'static EphemerisAdapter<SwissEngine> {
        &GLOBAL
    }
}

impl<E: EphemerisEngine> EphemerisAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    fn lock(&self) -> MutexGuard<'_, E> {
        // The guarded value carries no Rust-side invariants
        self.engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the high-precision data directory.
    ///
    /// `None`, a missing directory or one without data files all make the
    /// engine fall back to its lower-precision built-in model. That fallback
    /// is silent; callers wanting a warning check the directory themselves.
    pub fn configure(&self, path: Option<&Path>) {
        let mut path_str = path.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        if path_str.contains('\0') {
            log::warn!("ephemeris data path {:?} contains a NUL byte, ignoring it", path_str);
            path_str.clear();
        }
        log::debug!("ephemeris data path: {:?}", path_str);
        self.lock().set_data_path(&path_str);
    }

    pub fn name_of(&self, body: Body) -> String {
        log::trace!("body_name({})", body);
        self.lock().body_name(body)
    }

    /// Calculate the position of one body at the given time.
    pub fn calc_body(&self, time: JulianDay, body: Body) -> Result<BodyPosition, ChartError> {
        log::trace!("calc_body({}, {})", time, body);
        let raw = self.lock().calc_body(time.value(), body);

        match raw {
            Ok(out) => Ok(BodyPosition {
                longitude: normalize_degrees(out[0]),
                latitude: out[1],
                distance: out[2],
                speed_longitude: out[3],
                speed_latitude: out[4],
                speed_distance: out[5],
            }),
            Err(message) => Err(ChartError::BodyCalculation {
                body: self.name_of(body),
                message,
            }),
        }
    }

    /// Calculate house cusps and chart angles for a time and place.
    pub fn calc_houses(
        &self,
        time: JulianDay,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseData, ChartError> {
        let code = system.code();
        log::trace!("calc_houses({}, {}, {}, {})", time, lat, lon, code);
        let raw = self.lock().calc_houses(time.value(), lat, lon, code);

        let data = raw.map_err(|status| ChartError::HouseCalculation {
            system_code: code,
            status,
        })?;
        Ok(HouseData {
            cusps: data.cusps.map(normalize_degrees),
            ascendant: normalize_degrees(data.ascendant),
            mc: normalize_degrees(data.mc),
            armc: normalize_degrees(data.armc),
            vertex: normalize_degrees(data.vertex),
        })
    }

    /// Release engine resources.
    ///
    /// Call once, at process end. Using the adapter afterwards is a caller
    /// error that is not detected here.
    pub fn shutdown(&self) {
        log::debug!("closing ephemeris engine");
        self.lock().close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct Probe {
        in_call: AtomicBool,
        overlaps: AtomicUsize,
        calls: AtomicUsize,
    }

    impl Probe {
        fn enter(&self) {
            if self.in_call.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_micros(200));
            self.in_call.store(false, Ordering::SeqCst);
        }
    }

    struct ProbeEngine {
        probe: Arc<Probe>,
        path: Option<String>,
        closed: bool,
    }

    impl EphemerisEngine for ProbeEngine {
        fn set_data_path(&mut self, path: &str) {
            self.probe.enter();
            self.path = Some(path.to_string());
        }

        fn body_name(&mut self, body: Body) -> String {
            self.probe.enter();
            format!("Body{}", body.id())
        }

        fn calc_body(&mut self, _jd_ut: f64, body: Body) -> Result<[f64; 6], String> {
            self.probe.enter();
            match body {
                Body::Chiron => Err("chiron file not found".to_string()),
                Body::Moon => Ok([-10.0, 5.0, 0.0025, 13.2, 0.1, 0.00001]),
                _ => Ok([370.5, 0.0, 1.0, 1.0, 0.0, 0.0]),
            }
        }

        fn calc_houses(&mut self, _jd_ut: f64, lat: f64, _lon: f64, _code: char) -> Result<HouseData, i32> {
            self.probe.enter();
            if lat > 89.0 {
                return Err(-1);
            }
            let mut cusps = [0.0; 12];
            for (i, cusp) in cusps.iter_mut().enumerate() {
                *cusp = 15.0 + 30.0 * i as f64;
            }
            cusps[0] = 375.0;
            Ok(HouseData { cusps, ascendant: -345.0, mc: 285.0, armc: 720.0, vertex: 195.0 })
        }

        fn close(&mut self) {
            self.probe.enter();
            self.closed = true;
        }
    }

    fn adapter() -> (EphemerisAdapter<ProbeEngine>, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        let engine = ProbeEngine { probe: probe.clone(), path: None, closed: false };
        (EphemerisAdapter::new(engine), probe)
    }

    fn j2000() -> JulianDay {
        crate::time::to_native_time(2000, 1, 1, 12.0)
    }

    #[test]
    fn test_calc_body_normalizes_longitude() {
        let (adapter, _) = adapter();
        let sun = adapter.calc_body(j2000(), Body::Sun).unwrap();
        assert!((sun.longitude - 10.5).abs() < 1e-12);

        let moon = adapter.calc_body(j2000(), Body::Moon).unwrap();
        assert_eq!(moon.longitude, 350.0);
        assert_eq!(moon.latitude, 5.0);
        assert_eq!(moon.distance, 0.0025);
        assert_eq!(moon.speed_longitude, 13.2);
        assert_eq!(moon.speed_latitude, 0.1);
        assert_eq!(moon.speed_distance, 0.00001);
    }

    #[test]
    fn test_calc_body_error_names_the_body() {
        let (adapter, _) = adapter();
        let err = adapter.calc_body(j2000(), Body::Chiron).unwrap_err();
        assert_eq!(
            err,
            ChartError::BodyCalculation {
                body: "Body15".to_string(),
                message: "chiron file not found".to_string(),
            }
        );
    }

    #[test]
    fn test_calc_houses_normalizes_angles() {
        let (adapter, _) = adapter();
        let houses = adapter.calc_houses(j2000(), 51.5, 0.0, HouseSystem::Placidus).unwrap();
        assert_eq!(houses.cusps[0], 15.0);
        assert_eq!(houses.ascendant, 15.0);
        assert_eq!(houses.armc, 0.0);
        for value in houses.cusps {
            assert!((0.0..360.0).contains(&value));
        }
    }

    #[test]
    fn test_calc_houses_error_carries_code_and_status() {
        let (adapter, _) = adapter();
        let err = adapter.calc_houses(j2000(), 89.9, 0.0, HouseSystem::Koch).unwrap_err();
        assert_eq!(err, ChartError::HouseCalculation { system_code: 'K', status: -1 });
    }

    #[test]
    fn test_configure_and_shutdown_reach_engine() {
        let (adapter, _) = adapter();
        adapter.configure(Some(Path::new("/opt/ephe")));
        assert_eq!(adapter.lock().path.as_deref(), Some("/opt/ephe"));
        adapter.configure(None);
        assert_eq!(adapter.lock().path.as_deref(), Some(""));
        adapter.shutdown();
        assert!(adapter.lock().closed);
    }

    #[test]
    fn test_configure_drops_path_with_nul_byte() {
        let (adapter, _) = adapter();
        adapter.configure(Some(Path::new("/opt/\0ephe")));
        assert_eq!(adapter.lock().path.as_deref(), Some(""));
    }

    #[test]
    fn test_concurrent_callers_never_overlap_in_engine() {
        let (adapter, probe) = adapter();
        let adapter = Arc::new(adapter);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let adapter = adapter.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        if i % 2 == 0 {
                            adapter.calc_body(j2000(), Body::Mars).unwrap();
                        } else {
                            adapter.calc_houses(j2000(), 40.0, -74.0, HouseSystem::Equal).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(probe.calls.load(Ordering::SeqCst), 80);
        assert_eq!(probe.overlaps.load(Ordering::SeqCst), 0);
    }
}
