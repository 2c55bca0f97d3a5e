use tracing::debug;

use crate::config::controls::Parameters;
use crate::telemetry_system::results::ResultRow;
use crate::utils::vector2d::Vector2D;

use super::state::SimulationState;
use super::trajectory::Trajectory;

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub trajectory: Trajectory,
    pub result: ResultRow,
    pub steps: usize,
    /// State after the step that took the body below ground. Not part of `trajectory`.
    pub final_state: SimulationState,
}

impl BatchOutcome {
    pub fn landing_point(&self) -> Vector2D {
        self.final_state.position
    }
}

/// Integrates a whole flight synchronously.
///
/// Samples are recorded while `y >= 0`, so the last recorded sample is still above
/// ground. Range, max height and terminal speed come from the state after the
/// overshoot step, which is not among the samples.
///
/// No guard on `dt`: a non-positive step never lands.
pub fn compute_trajectory(params: &Parameters) -> BatchOutcome {
    let dt = params.time_step;
    let mut state = SimulationState::from_parameters(params);
    let mut trajectory = Trajectory::new();
    let mut steps = 0;

    debug!(?params, drag_factor = state.drag_factor, "batch run started");

    while !state.is_below_ground() {
        trajectory.push(state.position);
        state.record_height();
        state.step(dt);
        steps += 1;
    }

    let result = ResultRow::from_state(dt, &state);
    debug!(steps, samples = trajectory.len(), "batch run finished");

    BatchOutcome {
        trajectory,
        result,
        steps,
        final_state: state,
    }
}
