use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Builds a vector of length `magnitude` pointing `angle_deg` above the +x axis.
    pub fn from_polar_degrees(magnitude: f64, angle_deg: f64) -> Self {
        let angle = angle_deg.to_radians();
        Vector2D::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polar_decomposition() {
        let v = Vector2D::from_polar_degrees(30.0, 40.0);
        assert_relative_eq!(v.x, 30.0 * 40f64.to_radians().cos(), epsilon = 1e-12);
        assert_relative_eq!(v.y, 30.0 * 40f64.to_radians().sin(), epsilon = 1e-12);
        assert_relative_eq!(v.magnitude(), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_and_vertical_launch() {
        let flat = Vector2D::from_polar_degrees(10.0, 0.0);
        assert_relative_eq!(flat.y, 0.0, epsilon = 1e-12);

        let straight_up = Vector2D::from_polar_degrees(10.0, 90.0);
        assert_relative_eq!(straight_up.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(straight_up.y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Vector2D::new(1.0, 2.0);
        a += Vector2D::new(0.5, -1.0) * 2.0;
        assert_eq!(a, Vector2D::new(2.0, 0.0));
        assert_eq!(a - Vector2D::new(2.0, 0.0), Vector2D::default());
    }
}
