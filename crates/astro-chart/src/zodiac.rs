//! Zodiac sign mapping for ecliptic longitudes.
//!
//! Each sign spans 30 degrees starting from 0° Aries. Longitudes are expected
//! to be normalized to [0, 360) before mapping; the single exception is an
//! exact 360.0, which maps to the very end of Pisces.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Position in the zodiac, 0 for Aries through 11 for Pisces
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign and degree within that sign for a longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZodiacPlacement {
    pub sign: Sign,
    /// 0 <= x < 30, or exactly 30.0 for a longitude of 360
    pub degree: f64,
}

impl fmt::Display for ZodiacPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}°", self.sign, self.degree)
    }
}

/// Map an ecliptic longitude to its zodiac placement.
///
/// No normalization happens here: the caller passes a longitude in [0, 360].
pub fn placement(longitude: f64) -> ZodiacPlacement {
    let idx = (longitude / 30.0).floor() as usize;
    if idx >= 12 {
        return ZodiacPlacement { sign: Sign::Pisces, degree: 30.0 };
    }
    ZodiacPlacement {
        sign: Sign::ALL[idx],
        degree: longitude - idx as f64 * 30.0,
    }
}

/// Fold an engine angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    if (0.0..360.0).contains(&angle) {
        return angle;
    }
    let folded = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to 360.0
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_boundaries() {
        for (i, sign) in Sign::ALL.iter().enumerate() {
            let p = placement(i as f64 * 30.0);
            assert_eq!(p.sign, *sign);
            assert_eq!(p.degree, 0.0);
        }
    }

    #[test]
    fn test_interior_degrees() {
        let cases = [
            (15.0, Sign::Aries, 15.0),
            (45.5, Sign::Taurus, 15.5),
            (29.999, Sign::Aries, 29.999),
            (359.9, Sign::Pisces, 29.9),
            (280.46, Sign::Capricorn, 10.46),
        ];
        for (lon, sign, degree) in cases {
            let p = placement(lon);
            assert_eq!(p.sign, sign, "sign for {}", lon);
            assert!((p.degree - degree).abs() < 1e-9, "degree for {}: {}", lon, p.degree);
        }
    }

    #[test]
    fn test_exact_360_is_end_of_pisces() {
        let p = placement(360.0);
        assert_eq!(p.sign, Sign::Pisces);
        assert_eq!(p.degree, 30.0);
    }

    #[test]
    fn test_degree_matches_floor_formula_across_circle() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let p = placement(lon);
            let idx = (lon / 30.0_f64).floor();
            assert_eq!(p.sign.index(), idx as usize);
            assert_eq!(p.degree, lon - 30.0 * idx);
            assert!(p.degree >= 0.0 && p.degree < 30.0);
            lon += 0.37;
        }
    }

    #[test]
    fn test_placement_display() {
        assert_eq!(placement(45.5).to_string(), "Taurus 15.50°");
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(123.456), 123.456);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-1e-17), 0.0);
        let n = normalize_degrees(-720.25);
        assert!((n - 359.75).abs() < 1e-12);
    }
}
