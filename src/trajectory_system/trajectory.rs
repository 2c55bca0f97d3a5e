use crate::utils::vector2d::Vector2D;

/// Ordered (x, y) samples of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<Vector2D>,
}

impl Trajectory {
    pub fn new() -> Self {
        Trajectory::default()
    }

    pub fn push(&mut self, sample: Vector2D) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Vector2D] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<Vector2D> {
        self.samples.last().copied()
    }

    pub fn max_height(&self) -> Option<f64> {
        self.samples.iter().map(|p| p.y).reduce(f64::max)
    }
}
