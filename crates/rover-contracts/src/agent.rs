//! Simulated agent identity and state.

use serde::{Deserialize, Serialize};

use crate::mission::Waypoint;

/// Stable, human-readable identifier for the simulated rover.
///
/// Example: AgentId("rover-01")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// The single mutable entity in the simulator.
///
/// `target` is `None` while the simulator is unseeded and must pick the
/// nearest waypoint before moving. When `Some`, it indexes the mission plan
/// the simulator was last ticked with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    /// Current position in decimal degrees.
    pub position: Waypoint,
    /// Reported heading in degrees. Not derived from motion.
    pub heading: f64,
    /// Index of the waypoint being approached, or `None` when unseeded.
    pub target: Option<usize>,
    /// Free-form status label reported to the UI (e.g. "ARMED").
    pub status: String,
}

impl AgentState {
    pub fn new(id: impl Into<String>, position: Waypoint, heading: f64, status: impl Into<String>) -> Self {
        Self {
            id: AgentId(id.into()),
            position,
            heading,
            target: None,
            status: status.into(),
        }
    }
}
