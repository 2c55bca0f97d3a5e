use crate::errors::SimulationResult;
use crate::trajectory_system::trajectory::Trajectory;
use crate::utils::vector2d::Vector2D;

use super::sinks::TrajectorySink;

pub fn curve_label(time_step: f64) -> String {
    format!("dt={}", time_step)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<Vector2D>,
    pub finished: bool,
}

/// Range-vs-height curves, one per run, in the order the runs began.
#[derive(Debug, Clone, Default)]
pub struct Plot {
    curves: Vec<Curve>,
}

impl Plot {
    pub fn new() -> Self {
        Plot::default()
    }

    pub fn add_trajectory(&mut self, label: String, trajectory: &Trajectory) {
        self.curves.push(Curve {
            label,
            points: trajectory.samples().to_vec(),
            finished: true,
        });
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn legend(&self) -> Vec<&str> {
        self.curves.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn active_curve(&self) -> Option<&Curve> {
        self.curves.last().filter(|c| !c.finished)
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl TrajectorySink for Plot {
    fn begin_curve(&mut self, label: &str) -> SimulationResult<()> {
        self.curves.push(Curve {
            label: label.to_string(),
            points: Vec::new(),
            finished: false,
        });
        Ok(())
    }

    fn push_sample(&mut self, sample: Vector2D) -> SimulationResult<()> {
        if let Some(curve) = self.curves.last_mut().filter(|c| !c.finished) {
            curve.points.push(sample);
        }
        Ok(())
    }

    fn finish_curve(&mut self) -> SimulationResult<()> {
        if let Some(curve) = self.curves.last_mut() {
            curve.finished = true;
        }
        Ok(())
    }

    fn clear(&mut self) -> SimulationResult<()> {
        self.curves.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "plot"
    }
}
