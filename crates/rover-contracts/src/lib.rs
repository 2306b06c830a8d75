//! # rover-contracts
//!
//! Shared types, GeoJSON views, and error contracts for the rover tile server.
//!
//! All crates in the workspace import from here. Apart from the XYZ/TMS row
//! conversion and the gzip check that derive `TileRecord` fields, no logic
//! lives in this crate.

pub mod agent;
pub mod error;
pub mod geojson;
pub mod mission;
pub mod tile;
