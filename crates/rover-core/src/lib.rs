//! # rover-core
//!
//! The navigation simulator and tile-source contract for the rover tile
//! server.
//!
//! This crate provides:
//! - Geodesy helpers (`geo`): haversine distance, nearest-waypoint search,
//!   and planar stepping
//! - The `NavigationSimulator` state machine and its `MissionState`
//! - `Rover`, the mutex-guarded holder that serializes ticks and mission
//!   replacement
//! - The `TileSource` trait implemented by archive backends
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rover_core::{Rover, simulator::NavigationParams};
//!
//! let rover = Rover::new(initial_state, NavigationParams::default());
//! rover.replace_mission(waypoints)?;
//! let view = rover.tick()?;
//! ```

pub mod geo;
pub mod mission;
pub mod rover;
pub mod simulator;
pub mod traits;

pub use rover::Rover;
pub use simulator::{NavigationParams, NavigationSimulator, Phase};
pub use traits::TileSource;
