use astro_chart::{resolve_house_system, Body, ChartError, HouseSystem};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "ASTRO_CONFIG";
/// Environment variable naming the ephemeris data directory
pub const EPHEMERIS_ENV: &str = "SWISS_EPHEMERIS_PATH";

const CONFIG_PATHS: [&str; 2] = ["configs/astro.toml", "../../configs/astro.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct AstroSettings {
    pub ephemeris_path: Option<PathBuf>,
    /// Warn when the data directory cannot give full precision
    pub warn_on_fallback: bool,
    pub house_system: HouseSystem,
    pub bodies: Vec<Body>,
}

impl Default for AstroSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            warn_on_fallback: false,
            house_system: HouseSystem::default(),
            bodies: Body::TRADITIONAL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    warn_on_fallback: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    bodies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Find and read the config file.
///
/// An explicit path or `ASTRO_CONFIG` must point at a readable file. Otherwise
/// the common relative locations are tried, and `None` means no config.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = named {
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path, text)));
    }

    for p in &CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<AstroSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse astro.toml: {e}"))?;

    let mut settings = AstroSettings::default();
    if let Some(eph) = root.ephemeris {
        settings.ephemeris_path = eph.path;
        settings.warn_on_fallback = eph.warn_on_fallback;
    }
    if let Some(chart) = root.chart {
        if let Some(name) = chart.house_system {
            settings.house_system = resolve_house_system(&name)
                .map_err(|e| anyhow::anyhow!("chart.house_system in astro.toml: {e}"))?;
        }
        if let Some(keys) = chart.bodies {
            settings.bodies = keys
                .iter()
                .map(|k| k.parse::<Body>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("chart.bodies in astro.toml: {e}"))?;
            if settings.bodies.is_empty() {
                anyhow::bail!("chart.bodies in astro.toml must name at least one body");
            }
        }
    }
    Ok(settings)
}

/// Load settings, falling back to defaults when no config file exists.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<AstroSettings> {
    match read_config_text(explicit)? {
        Some((path, text)) => {
            log::debug!("loading config from {}", path.display());
            parse_settings(&text)
        }
        None => {
            log::debug!("no config file found, using defaults");
            Ok(AstroSettings::default())
        }
    }
}

/// Pick the ephemeris data directory.
///
/// Order: command line, config file, `SWISS_EPHEMERIS_PATH`, then `ephe/`
/// next to the running executable.
pub fn resolve_ephemeris_dir(
    cli: Option<&Path>,
    settings: &AstroSettings,
) -> Result<PathBuf, ChartError> {
    resolve_ephemeris_dir_with(cli, settings, env::var_os(EPHEMERIS_ENV).map(PathBuf::from), env::current_exe)
}

fn resolve_ephemeris_dir_with(
    cli: Option<&Path>,
    settings: &AstroSettings,
    env_path: Option<PathBuf>,
    current_exe: impl FnOnce() -> io::Result<PathBuf>,
) -> Result<PathBuf, ChartError> {
    let chosen = cli
        .map(Path::to_path_buf)
        .or_else(|| settings.ephemeris_path.clone())
        .or(env_path);
    if let Some(path) = chosen {
        return check_data_path(path);
    }

    let exe = current_exe().map_err(|e| ChartError::EngineConfiguration {
        message: format!("could not resolve executable path: {e}"),
    })?;
    let dir = exe.parent().ok_or_else(|| ChartError::EngineConfiguration {
        message: format!("executable path has no parent directory: {}", exe.display()),
    })?;
    check_data_path(dir.join("ephe"))
}

/// The engine takes the directory as a C string.
fn check_data_path(path: PathBuf) -> Result<PathBuf, ChartError> {
    if path.as_os_str().to_string_lossy().contains('\0') {
        return Err(ChartError::EngineConfiguration {
            message: format!("ephemeris path {:?} contains a NUL byte", path),
        });
    }
    Ok(path)
}

/// Whether `dir` holds any Swiss Ephemeris `.se1` data files.
///
/// Without them the engine silently runs on its lower-precision model.
pub fn has_ephemeris_files(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries
        .filter_map(Result::ok)
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "se1"))
}
