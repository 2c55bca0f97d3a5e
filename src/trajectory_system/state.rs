use tracing::trace;

use crate::config::controls::Parameters;
use crate::constants::{GRAVITY, GROUND_LEVEL};
use crate::utils::vector2d::Vector2D;

use super::aerodynamics::Aerodynamics;

/// Mutable state of one run. Owned by whoever drives the run; rebuilt for every new run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub time: f64,
    pub max_height: f64,
    pub drag_factor: f64,
}

impl SimulationState {
    pub fn from_parameters(params: &Parameters) -> Self {
        let aerodynamics = Aerodynamics::with_cross_section(params.cross_section);
        SimulationState {
            position: Vector2D::new(0.0, params.initial_height),
            velocity: Vector2D::from_polar_degrees(params.initial_speed, params.launch_angle),
            time: 0.0,
            max_height: params.initial_height,
            drag_factor: aerodynamics.drag_factor(params.mass),
        }
    }

    /// One semi-implicit Euler step: velocity first, then position from the new velocity.
    ///
    /// Does not advance `time`.
    pub fn step(&mut self, dt: f64) {
        let drag = Aerodynamics::drag_deceleration(self.velocity, self.drag_factor);
        self.velocity.x += drag.x * dt;
        self.velocity.y += (drag.y - GRAVITY) * dt;
        self.position += self.velocity * dt;

        trace!(
            x = self.position.x,
            y = self.position.y,
            vx = self.velocity.x,
            vy = self.velocity.y,
            "step"
        );
    }

    pub fn record_height(&mut self) {
        if self.position.y > self.max_height {
            self.max_height = self.position.y;
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn range(&self) -> f64 {
        self.position.x
    }

    pub fn is_below_ground(&self) -> bool {
        self.position.y < GROUND_LEVEL
    }

    pub fn is_on_or_below_ground(&self) -> bool {
        self.position.y <= GROUND_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_initial_state() {
        let params = Parameters::new(30.0, 40.0, 5.0, 0.1, 1.5, 0.1);
        let state = SimulationState::from_parameters(&params);

        assert_eq!(state.position, Vector2D::new(0.0, 5.0));
        assert_relative_eq!(state.velocity.magnitude(), 30.0, epsilon = EPSILON);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.max_height, 5.0);
        assert_relative_eq!(state.drag_factor, 0.00645, epsilon = EPSILON);
    }

    #[test]
    fn test_single_step_arithmetic() {
        let params = Parameters::new(30.0, 40.0, 0.0, 0.1, 1.5, 0.1);
        let mut state = SimulationState::from_parameters(&params);
        let dt = 0.1;
        let k = state.drag_factor;
        let (vx, vy) = (state.velocity.x, state.velocity.y);
        let v = (vx * vx + vy * vy).sqrt();

        state.step(dt);

        let vx1 = vx - k * vx * v * dt;
        let vy1 = vy - (GRAVITY + k * vy * v) * dt;
        assert_relative_eq!(state.velocity.x, vx1, epsilon = EPSILON);
        assert_relative_eq!(state.velocity.y, vy1, epsilon = EPSILON);
        // Position advances with the updated velocity.
        assert_relative_eq!(state.position.x, vx1 * dt, epsilon = EPSILON);
        assert_relative_eq!(state.position.y, vy1 * dt, epsilon = EPSILON);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_drag_free_step_is_pure_gravity() {
        let mut state = SimulationState::from_parameters(&Parameters::new(
            10.0, 90.0, 0.0, 0.1, 1.0, 0.5,
        ));
        state.drag_factor = 0.0;
        state.step(0.5);

        assert_relative_eq!(state.velocity.y, 10.0 - GRAVITY * 0.5, epsilon = EPSILON);
        assert_relative_eq!(state.position.y, (10.0 - GRAVITY * 0.5) * 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_record_height_is_monotonic() {
        let mut state = SimulationState::from_parameters(&Parameters::default());
        let mut previous = state.max_height;
        for _ in 0..60 {
            state.record_height();
            assert!(state.max_height >= previous);
            previous = state.max_height;
            state.step(0.1);
        }
    }

    #[test]
    fn test_ground_checks() {
        let mut state = SimulationState::from_parameters(&Parameters::default());
        assert!(state.is_on_or_below_ground());
        assert!(!state.is_below_ground());
        state.position.y = -0.01;
        assert!(state.is_below_ground());
    }
}
