use crate::constants::{AIR_DENSITY, DRAG_COEFFICIENT};
use crate::utils::vector2d::Vector2D;

/// Quadratic drag on a body of fixed cross-section in still air of constant density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub cross_section: f64,
    pub air_density: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, cross_section: f64, air_density: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            cross_section,
            air_density,
        }
    }

    pub fn with_cross_section(cross_section: f64) -> Self {
        Aerodynamics::new(DRAG_COEFFICIENT, cross_section, AIR_DENSITY)
    }

    /// k = C·S·ρ / (2m). Drag deceleration is k·|v|·v.
    ///
    /// `mass` is not checked; zero mass yields an infinite factor.
    pub fn drag_factor(&self, mass: f64) -> f64 {
        self.drag_coefficient * self.cross_section * self.air_density / (2.0 * mass)
    }

    pub fn drag_deceleration(velocity: Vector2D, drag_factor: f64) -> Vector2D {
        let speed = velocity.magnitude();
        velocity * (-drag_factor * speed)
    }
}
