//! TOML configuration for the rover server.
//!
//! Every field has a default, so an empty document is a valid configuration
//! that reproduces the reference rover at Moffett Field:
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8000"
//! public_url = "http://localhost:8000"
//!
//! [tiles]
//! archive = "osm.mbtiles"
//!
//! [robot]
//! id = "rover-01"
//!
//! [navigation]
//! step_deg = 0.00001
//! ```

use std::{net::SocketAddr, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use rover_contracts::{
    agent::AgentState,
    error::{RoverError, RoverResult},
    mission::Waypoint,
};
use rover_core::simulator::{NavigationParams, DEFAULT_START_LAT, DEFAULT_START_LON};
use rover_tiles::DEFAULT_POOL_SIZE;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoverConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tiles: TileConfig,
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// HTTP listener and static content settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on (default: 0.0.0.0:8000)
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Base URL written into the style document's tile source
    /// (default: http://localhost:8000)
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Directory served for every path no API route claims (default: static)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Map style document patched and served at /style.json
    /// (default: static/style.json)
    #[serde(default = "default_style_path")]
    pub style_path: PathBuf,

    /// Allow any origin, method, and header (default: true)
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

/// Tile archive settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    /// Path to the MBTiles archive (default: osm.mbtiles)
    #[serde(default = "default_archive")]
    pub archive: PathBuf,

    /// Maximum pooled read connections (default: 4)
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Initial state of the simulated rover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default = "default_robot_id")]
    pub id: String,
    #[serde(default = "default_start_lon")]
    pub start_lon: f64,
    #[serde(default = "default_start_lat")]
    pub start_lat: f64,
    #[serde(default = "default_heading")]
    pub heading: f64,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Motion constants, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Distance moved per tick while following a mission (default: 0.00001)
    #[serde(default = "default_step")]
    pub step_deg: f64,

    /// Planar distance at which a waypoint counts as reached (default: 0.00001)
    #[serde(default = "default_step")]
    pub arrival_threshold_deg: f64,

    /// Longitude increment per tick with no mission (default: 0.00001)
    #[serde(default = "default_step")]
    pub idle_step_deg: f64,

    /// Longitude past which the idle drift resets to the start (default: -122.420).
    /// Must be greater than `robot.start_lon`.
    #[serde(default = "default_idle_max_lon")]
    pub idle_max_lon: f64,
}

impl RoverConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `RoverError::ConfigError` if the TOML is malformed, does not
    /// match the expected schema, or fails `validate`.
    pub fn from_toml_str(s: &str) -> RoverResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| RoverError::ConfigError {
            reason: format!("failed to parse rover config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a start longitude at or past the idle drift bound. The drift
    /// resets to the start, so such a rover would never move while idle.
    pub fn validate(&self) -> RoverResult<()> {
        if self.robot.start_lon >= self.navigation.idle_max_lon {
            return Err(RoverError::ConfigError {
                reason: format!(
                    "robot.start_lon ({}) must be below navigation.idle_max_lon ({})",
                    self.robot.start_lon, self.navigation.idle_max_lon
                ),
            });
        }
        Ok(())
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> RoverResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RoverError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The rover's state at process start.
    pub fn initial_state(&self) -> AgentState {
        AgentState::new(
            self.robot.id.clone(),
            Waypoint::new(self.robot.start_lon, self.robot.start_lat),
            self.robot.heading,
            self.robot.status.clone(),
        )
    }

    /// Simulator constants. The idle drift resets to the configured start
    /// longitude.
    pub fn navigation_params(&self) -> NavigationParams {
        NavigationParams {
            step_deg: self.navigation.step_deg,
            arrival_threshold_deg: self.navigation.arrival_threshold_deg,
            idle_step_deg: self.navigation.idle_step_deg,
            idle_max_lon: self.navigation.idle_max_lon,
            idle_reset_lon: self.robot.start_lon,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_url: default_public_url(),
            static_dir: default_static_dir(),
            style_path: default_style_path(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            archive: default_archive(),
            pool_size: default_pool_size(),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            id: default_robot_id(),
            start_lon: default_start_lon(),
            start_lat: default_start_lat(),
            heading: default_heading(),
            status: default_status(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            step_deg: default_step(),
            arrival_threshold_deg: default_step(),
            idle_step_deg: default_step(),
            idle_max_lon: default_idle_max_lon(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_public_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_style_path() -> PathBuf {
    PathBuf::from("static/style.json")
}

fn default_cors_permissive() -> bool {
    true
}

fn default_archive() -> PathBuf {
    PathBuf::from("osm.mbtiles")
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_robot_id() -> String {
    "rover-01".to_string()
}

fn default_start_lon() -> f64 {
    DEFAULT_START_LON
}

fn default_start_lat() -> f64 {
    DEFAULT_START_LAT
}

fn default_heading() -> f64 {
    90.0
}

fn default_status() -> String {
    "ARMED".to_string()
}

fn default_step() -> f64 {
    NavigationParams::default().step_deg
}

fn default_idle_max_lon() -> f64 {
    NavigationParams::default().idle_max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_reference_defaults() {
        let config = RoverConfig::from_toml_str("").unwrap();

        assert_eq!(config, RoverConfig::default());
        assert_eq!(config.server.bind.port(), 8000);
        assert_eq!(config.tiles.archive, PathBuf::from("osm.mbtiles"));
        assert_eq!(config.navigation_params(), NavigationParams::default());

        let state = config.initial_state();
        assert_eq!(state.id.0, "rover-01");
        assert_eq!(state.position, Waypoint::new(-122.42215, 37.41451));
        assert_eq!(state.target, None);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = RoverConfig::from_toml_str(
            r#"
            [server]
            bind = "127.0.0.1:9000"

            [robot]
            id = "rover-02"
            start_lon = 10.5

            [navigation]
            step_deg = 0.0001
            idle_max_lon = 11.0
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.server.public_url, "http://localhost:8000");
        assert_eq!(config.robot.id, "rover-02");
        assert_eq!(config.robot.start_lat, 37.41451);

        let params = config.navigation_params();
        assert_eq!(params.step_deg, 0.0001);
        assert_eq!(params.arrival_threshold_deg, 0.00001);
        assert_eq!(params.idle_reset_lon, 10.5);
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = RoverConfig::from_toml_str("[server]\nbind = 12").unwrap_err();
        match err {
            RoverError::ConfigError { reason } => assert!(reason.contains("rover config")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_start_past_idle_bound_is_a_config_error() {
        for start_lon in ["-122.420", "-100.0"] {
            let doc = format!("[robot]\nstart_lon = {start_lon}\n");
            match RoverConfig::from_toml_str(&doc).unwrap_err() {
                RoverError::ConfigError { reason } => assert!(reason.contains("idle_max_lon")),
                other => panic!("expected ConfigError, got {:?}", other),
            }
        }

        let ok = RoverConfig::from_toml_str("[robot]\nstart_lon = 10.0\n[navigation]\nidle_max_lon = 10.5\n");
        assert!(ok.is_ok());
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = RoverConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, RoverError::ConfigError { .. }));
    }
}
