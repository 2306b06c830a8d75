//! The waypoint-following navigation simulator.
//!
//! The simulator owns the single `AgentState` and advances it once per
//! `tick`. It has two phases:
//!
//!   Unseeded ──(plan non-empty: pick nearest by haversine)──▶ Tracking
//!   Tracking ──(plan emptied, or index out of range)──────▶ Unseeded
//!
//! While unseeded with an empty plan the agent oscillates in longitude as a
//! liveness signal. While tracking it steps toward the target waypoint and
//! moves on to `(index + 1) % len` once within the arrival threshold, so a
//! mission loops forever.

use tracing::{debug, info};

use rover_contracts::{agent::AgentState, mission::Waypoint};

use crate::geo::{move_towards, nearest_waypoint, planar_distance};

/// Start longitude of the reference rover; the idle oscillation resets here.
pub const DEFAULT_START_LON: f64 = -122.42215;
/// Start latitude of the reference rover.
pub const DEFAULT_START_LAT: f64 = 37.41451;

/// Fixed motion constants, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationParams {
    /// Distance covered per tick while tracking.
    pub step_deg: f64,
    /// Planar distance below which the target counts as reached.
    pub arrival_threshold_deg: f64,
    /// Longitude increment per tick while idle.
    pub idle_step_deg: f64,
    /// Longitude above which the idle oscillation resets.
    pub idle_max_lon: f64,
    /// Longitude the idle oscillation resets to.
    pub idle_reset_lon: f64,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            step_deg: 0.00001,
            arrival_threshold_deg: 0.00001,
            idle_step_deg: 0.00001,
            idle_max_lon: -122.420,
            idle_reset_lon: DEFAULT_START_LON,
        }
    }
}

/// Which half of the state machine the simulator is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unseeded,
    Tracking { target: usize },
}

#[derive(Debug, Clone)]
pub struct NavigationSimulator {
    state: AgentState,
    params: NavigationParams,
}

impl NavigationSimulator {
    pub fn new(state: AgentState, params: NavigationParams) -> Self {
        Self { state, params }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state.target {
            Some(target) => Phase::Tracking { target },
            None => Phase::Unseeded,
        }
    }

    /// Drop the current target so the next tick re-seeds on the nearest
    /// waypoint.
    pub fn unseed(&mut self) {
        self.state.target = None;
    }

    /// Advance the agent by one step against `plan` and return the new state.
    pub fn tick(&mut self, plan: &[Waypoint]) -> &AgentState {
        if plan.is_empty() {
            if self.state.target.take().is_some() {
                info!(agent_id = %self.state.id.0, "mission cleared, simulator unseeded");
            }
            self.idle_step();
            return &self.state;
        }

        if let Some(idx) = self.state.target {
            if idx >= plan.len() {
                debug!(
                    target = idx,
                    plan_len = plan.len(),
                    "target index outside current plan, re-seeding"
                );
                self.state.target = None;
            }
        }

        let mut target = match self.state.target {
            Some(idx) => idx,
            None => match nearest_waypoint(self.state.position, plan) {
                Some(idx) => {
                    info!(
                        agent_id = %self.state.id.0,
                        target = idx,
                        plan_len = plan.len(),
                        "seeded on nearest waypoint"
                    );
                    idx
                }
                None => {
                    // Only reachable with non-finite coordinates.
                    self.idle_step();
                    return &self.state;
                }
            },
        };

        if planar_distance(self.state.position, plan[target]) < self.params.arrival_threshold_deg {
            let next = (target + 1) % plan.len();
            debug!(reached = target, next, "waypoint reached");
            target = next;
        }
        self.state.target = Some(target);

        self.state.position = move_towards(self.state.position, plan[target], self.params.step_deg);
        &self.state
    }

    fn idle_step(&mut self) {
        let position = &mut self.state.position;
        position.lon += self.params.idle_step_deg;
        if position.lon > self.params.idle_max_lon {
            position.lon = self.params.idle_reset_lon;
        }
    }
}
