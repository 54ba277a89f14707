//! House system resolution.

use crate::error::ChartError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    WholeSign,
    Regiomontanus,
    Equal,
    Campanus,
}

/// Name, engine code and display name, in the order reported to users
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("whole-sign", HouseSystem::WholeSign),
    ("regiomontanus", HouseSystem::Regiomontanus),
    ("equal", HouseSystem::Equal),
    ("campanus", HouseSystem::Campanus),
];

impl HouseSystem {
    pub const ALL: [HouseSystem; 6] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::WholeSign,
        HouseSystem::Regiomontanus,
        HouseSystem::Equal,
        HouseSystem::Campanus,
    ];

    /// Single-character code understood by the ephemeris engine
    pub fn code(self) -> char {
        match self {
            HouseSystem::Placidus => 'P',
            HouseSystem::Koch => 'K',
            HouseSystem::WholeSign => 'W',
            HouseSystem::Regiomontanus => 'R',
            HouseSystem::Equal => 'A',
            HouseSystem::Campanus => 'C',
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Koch => "Koch",
            HouseSystem::WholeSign => "Whole Sign",
            HouseSystem::Regiomontanus => "Regiomontanus",
            HouseSystem::Equal => "Equal",
            HouseSystem::Campanus => "Campanus",
        }
    }

    /// Lowercase name accepted on the command line
    pub fn key(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system)| *system == self)
            .map(|(name, _)| *name)
            .unwrap_or("placidus")
    }

    pub fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect()
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_house_system(s)
    }
}

/// Resolve a house system name, ignoring ASCII case.
pub fn resolve_house_system(name: &str) -> Result<HouseSystem, ChartError> {
    let lowered = name.to_ascii_lowercase();
    HOUSE_SYSTEMS
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, system)| *system)
        .ok_or_else(|| ChartError::UnknownHouseSystem {
            input: name.to_string(),
            valid: HouseSystem::valid_names(),
        })
}
