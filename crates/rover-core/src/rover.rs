//! The single serialization point for all mutable simulator state.
//!
//! `Rover` pairs the `MissionState` with the `NavigationSimulator` behind
//! one `Mutex`. Every read or write of either goes through it, so a `tick`
//! always sees one whole plan and a `replace_mission` can never land halfway
//! through a step.
//!
//! The lock is only held for in-memory work and must never be held across
//! an `.await` in async callers.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use rover_contracts::{
    agent::AgentState,
    error::{RoverError, RoverResult},
    geojson::{GeometryView, MissionView},
    mission::{MissionPlan, Waypoint},
};

use crate::{
    mission::MissionState,
    simulator::{NavigationParams, NavigationSimulator},
};

struct RoverInner {
    mission: MissionState,
    simulator: NavigationSimulator,
}

/// Process-wide simulator state, shared by reference between request
/// handlers.
pub struct Rover {
    inner: Mutex<RoverInner>,
}

impl Rover {
    pub fn new(initial: AgentState, params: NavigationParams) -> Self {
        Self {
            inner: Mutex::new(RoverInner {
                mission: MissionState::new(),
                simulator: NavigationSimulator::new(initial, params),
            }),
        }
    }

    fn lock(&self) -> RoverResult<MutexGuard<'_, RoverInner>> {
        self.inner.lock().map_err(|e| RoverError::StateLockPoisoned {
            reason: e.to_string(),
        })
    }

    /// Advance the simulator one step against the current mission and return
    /// the agent's position as GeoJSON.
    pub fn tick(&self) -> RoverResult<GeometryView> {
        let mut inner = self.lock()?;
        let RoverInner { mission, simulator } = &mut *inner;
        let state = simulator.tick(mission.current().waypoints());

        debug!(
            lon = state.position.lon,
            lat = state.position.lat,
            target = ?state.target,
            "rover ticked"
        );

        Ok(GeometryView::robot(state))
    }

    /// Install a new mission plan and unseed the simulator so the next tick
    /// picks the waypoint nearest to wherever the rover is now.
    ///
    /// Returns the first waypoint of the new plan, if any.
    pub fn replace_mission(&self, waypoints: Vec<Waypoint>) -> RoverResult<Option<Waypoint>> {
        let mut inner = self.lock()?;
        inner.mission.replace(waypoints);
        inner.simulator.unseed();
        Ok(inner.mission.current().first())
    }

    pub fn mission_view(&self) -> RoverResult<MissionView> {
        Ok(MissionView::mission(self.lock()?.mission.current()))
    }

    /// A consistent copy of the plan and the agent state, taken under one
    /// lock.
    pub fn snapshot(&self) -> RoverResult<(MissionPlan, AgentState)> {
        let inner = self.lock()?;
        Ok((inner.mission.current().clone(), inner.simulator.state().clone()))
    }
}
