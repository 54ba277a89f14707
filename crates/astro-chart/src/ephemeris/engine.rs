use crate::ephemeris::types::{Body, HouseData};
use libswisseph_sys::safe::swe_houses_ex;
use swisseph::swe::{calc_ut, close, get_planet_name, set_ephe_path};
use swisseph::{AscMc, Cusp};

/// FLG_SWIEPH (2) | FLG_SPEED (256)
const CALC_FLAGS: u32 = 2 | 256;

/// Raw access to a native ephemeris library.
///
/// Implementations are not expected to be reentrant; [`EphemerisAdapter`]
/// takes care of serializing calls.
///
/// [`EphemerisAdapter`]: crate::ephemeris::EphemerisAdapter
pub trait EphemerisEngine {
    /// Point the engine at its data files. Never fails: a bad path makes
    /// the engine fall back to its built-in approximation.
    fn set_data_path(&mut self, path: &str);

    fn body_name(&mut self, body: Body) -> String;

    /// Longitude, latitude, distance and their daily speeds, or the engine's
    /// error text.
    fn calc_body(&mut self, jd_ut: f64, body: Body) -> Result<[f64; 6], String>;

    /// House cusps and angles, or the engine's negative status code.
    fn calc_houses(&mut self, jd_ut: f64, lat: f64, lon: f64, code: char) -> Result<HouseData, i32>;

    fn close(&mut self);
}

/// Swiss Ephemeris backend
#[derive(Debug, Default)]
pub struct SwissEngine {
    _private: (),
}

impl SwissEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EphemerisEngine for SwissEngine {
    fn set_data_path(&mut self, path: &str) {
        set_ephe_path(path);
    }

    fn body_name(&mut self, body: Body) -> String {
        get_planet_name(body.id())
    }

    fn calc_body(&mut self, jd_ut: f64, body: Body) -> Result<[f64; 6], String> {
        let result = calc_ut(jd_ut, body.id() as u32, CALC_FLAGS)
            .map_err(|e| format!("Swiss Ephemeris error: {}", e))?;
        Ok(result.out)
    }

    fn calc_houses(&mut self, jd_ut: f64, lat: f64, lon: f64, code: char) -> Result<HouseData, i32> {
        let mut c = [0.0f64; 13];
        let mut a = [0.0f64; 10];
        // swisseph::swe::houses_ex discards this status; Koch and Placidus
        // inside the polar circle return ERR with Porphyry cusps filled in.
        let status = swe_houses_ex(jd_ut, 0, lat, lon, code as i32, c.as_mut_ptr(), a.as_mut_ptr());
        if status < 0 {
            return Err(status);
        }

        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);
        Ok(HouseData {
            cusps: [
                cusps.first, cusps.second, cusps.third, cusps.fourth,
                cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
                cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
            ],
            ascendant: ascmc.ascendant,
            mc: ascmc.mc,
            armc: ascmc.armc,
            vertex: ascmc.vertex,
        })
    }

    fn close(&mut self) {
        close();
    }
}
