//! Holder for the operator-submitted mission plan.

use tracing::info;

use rover_contracts::mission::{MissionPlan, Waypoint};

/// The current mission plan, replaced wholesale on every submission.
///
/// `MissionState` itself is not synchronized. It lives inside the `Rover`
/// mutex next to the simulator, which is what makes `replace` atomic with
/// respect to `tick`.
#[derive(Debug, Clone, Default)]
pub struct MissionState {
    plan: MissionPlan,
}

impl MissionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous plan and install `waypoints` in submission order.
    pub fn replace(&mut self, waypoints: Vec<Waypoint>) {
        self.plan = MissionPlan::new(waypoints);
        info!(waypoints = self.plan.len(), "mission replaced");
    }

    pub fn current(&self) -> &MissionPlan {
        &self.plan
    }
}
