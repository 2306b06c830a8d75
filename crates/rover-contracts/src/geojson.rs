//! GeoJSON views returned by the mission and robot endpoints.
//!
//! Only the subset the UI consumes is modelled: a `FeatureCollection` of
//! `Feature`s whose geometry is a `Point` or a `Polygon`.

use serde::{Deserialize, Serialize};

use crate::{
    agent::AgentState,
    mission::{MissionPlan, Waypoint},
};

/// Geometry of a single feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Waypoint },
    /// Rings of positions. The mission ring is emitted as submitted, without
    /// appending a closing position.
    Polygon { coordinates: Vec<Vec<Waypoint>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature<P> {
    pub properties: P,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection<P> {
    pub features: Vec<Feature<P>>,
}

/// Properties attached to the robot's position feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotProperties {
    pub id: String,
    pub heading: f64,
    pub status: String,
}

/// Properties attached to the mission area feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionProperties {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The view produced by one simulator tick.
pub type GeometryView = FeatureCollection<RobotProperties>;

/// The view of the current mission area.
pub type MissionView = FeatureCollection<MissionProperties>;

impl FeatureCollection<RobotProperties> {
    /// A collection holding one `Point` at the agent's position.
    pub fn robot(state: &AgentState) -> Self {
        Self {
            features: vec![Feature {
                properties: RobotProperties {
                    id: state.id.0.clone(),
                    heading: state.heading,
                    status: state.status.clone(),
                },
                geometry: Geometry::Point {
                    coordinates: state.position,
                },
            }],
        }
    }
}

impl FeatureCollection<MissionProperties> {
    /// A collection holding one `Polygon` whose single ring is the mission
    /// plan. An empty plan yields an empty ring.
    pub fn mission(plan: &MissionPlan) -> Self {
        Self {
            features: vec![Feature {
                properties: MissionProperties {
                    name: "Zone Alpha".to_string(),
                    kind: "search_area".to_string(),
                },
                geometry: Geometry::Polygon {
                    coordinates: vec![plan.waypoints().to_vec()],
                },
            }],
        }
    }
}
