use rand::Rng;

use crate::errors::{SimulationError, SimulationResult};

/// One input control of the launch form: its bounds, increment and default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ControlSpec {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    pub fn check(&self, value: f64) -> SimulationResult<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(SimulationError::InvalidParameter {
                key: self.key,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

pub const INITIAL_SPEED: ControlSpec = ControlSpec {
    key: "v0",
    label: "Initial speed v0 (m/s)",
    min: 0.0,
    max: 50.0,
    step: 1.0,
    default: 30.0,
};

pub const LAUNCH_ANGLE: ControlSpec = ControlSpec {
    key: "angle",
    label: "Launch angle (degrees)",
    min: 0.0,
    max: 90.0,
    step: 1.0,
    default: 40.0,
};

pub const INITIAL_HEIGHT: ControlSpec = ControlSpec {
    key: "y0",
    label: "Initial height y0 (m)",
    min: 0.0,
    max: 50.0,
    step: 1.0,
    default: 0.0,
};

pub const CROSS_SECTION: ControlSpec = ControlSpec {
    key: "area",
    label: "Cross-section area S (m²)",
    min: 0.001,
    max: 5.0,
    step: 0.01,
    default: 0.1,
};

pub const MASS: ControlSpec = ControlSpec {
    key: "mass",
    label: "Mass m (kg)",
    min: 0.01,
    max: 100.0,
    step: 0.1,
    default: 1.5,
};

pub const TIME_STEP: ControlSpec = ControlSpec {
    key: "dt",
    label: "Time step dt (s)",
    min: 0.0001,
    max: 1.0,
    step: 0.01,
    default: 0.1,
};

pub static CONTROLS: [ControlSpec; 6] = [
    INITIAL_SPEED,
    LAUNCH_ANGLE,
    INITIAL_HEIGHT,
    CROSS_SECTION,
    MASS,
    TIME_STEP,
];

pub fn control(key: &str) -> Option<&'static ControlSpec> {
    CONTROLS.iter().find(|spec| spec.key == key)
}

/// Snapshot of the launch form, taken once at the start of every run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub initial_speed: f64,
    /// Degrees above the horizon.
    pub launch_angle: f64,
    pub initial_height: f64,
    pub cross_section: f64,
    pub mass: f64,
    pub time_step: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            initial_speed: INITIAL_SPEED.default,
            launch_angle: LAUNCH_ANGLE.default,
            initial_height: INITIAL_HEIGHT.default,
            cross_section: CROSS_SECTION.default,
            mass: MASS.default,
            time_step: TIME_STEP.default,
        }
    }
}

impl Parameters {
    pub fn new(
        initial_speed: f64,
        launch_angle: f64,
        initial_height: f64,
        cross_section: f64,
        mass: f64,
        time_step: f64,
    ) -> Self {
        Parameters {
            initial_speed,
            launch_angle,
            initial_height,
            cross_section,
            mass,
            time_step,
        }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        for spec in &CONTROLS {
            spec.check(self.value(spec.key).unwrap_or(f64::NAN))?;
        }
        Ok(())
    }

    pub fn validated(self) -> SimulationResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        match key {
            "v0" => Some(self.initial_speed),
            "angle" => Some(self.launch_angle),
            "y0" => Some(self.initial_height),
            "area" => Some(self.cross_section),
            "mass" => Some(self.mass),
            "dt" => Some(self.time_step),
            _ => None,
        }
    }

    /// Updates one field by control key. The value must lie within the control's bounds.
    pub fn set(&mut self, key: &str, value: f64) -> SimulationResult<()> {
        let spec = control(key).ok_or_else(|| SimulationError::UnknownParameter(key.to_string()))?;
        let value = spec.check(value)?;
        let field = match key {
            "v0" => &mut self.initial_speed,
            "angle" => &mut self.launch_angle,
            "y0" => &mut self.initial_height,
            "area" => &mut self.cross_section,
            "mass" => &mut self.mass,
            "dt" => &mut self.time_step,
            _ => return Err(SimulationError::UnknownParameter(key.to_string())),
        };
        *field = value;
        Ok(())
    }

    /// Draws every field uniformly from its control's range.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Parameters {
            initial_speed: INITIAL_SPEED.sample(rng),
            launch_angle: LAUNCH_ANGLE.sample(rng),
            initial_height: INITIAL_HEIGHT.sample(rng),
            cross_section: CROSS_SECTION.sample(rng),
            mass: MASS.sample(rng),
            time_step: TIME_STEP.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_match_controls() {
        let params = Parameters::default();
        assert_eq!(params, Parameters::new(30.0, 40.0, 0.0, 0.1, 1.5, 0.1));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_every_default_is_inside_its_bounds() {
        for spec in &CONTROLS {
            assert!(spec.contains(spec.default), "{} default out of range", spec.key);
            assert!(spec.step > 0.0);
        }
    }

    #[test]
    fn test_validate_rejects_zero_mass() {
        let params = Parameters {
            mass: 0.0,
            ..Parameters::default()
        };
        match params.validate() {
            Err(SimulationError::InvalidParameter { key, .. }) => assert_eq!(key, "mass"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_nan() {
        let params = Parameters {
            time_step: f64::NAN,
            ..Parameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_set_by_key() {
        let mut params = Parameters::default();
        params.set("angle", 45.0).unwrap();
        params.set("dt", 0.01).unwrap();
        assert_eq!(params.launch_angle, 45.0);
        assert_eq!(params.time_step, 0.01);

        assert!(matches!(
            params.set("speed", 10.0),
            Err(SimulationError::UnknownParameter(_))
        ));
        assert!(matches!(
            params.set("v0", 51.0),
            Err(SimulationError::InvalidParameter { .. })
        ));
        assert_eq!(params.initial_speed, 30.0);
    }

    #[test]
    fn test_set_writes_only_its_own_field() {
        for spec in &CONTROLS {
            let mut params = Parameters::default();
            params.set(spec.key, spec.max).unwrap();
            assert_eq!(params.value(spec.key), Some(spec.max), "{}", spec.key);

            for other in CONTROLS.iter().filter(|c| c.key != spec.key) {
                assert_eq!(params.value(other.key), Some(other.default), "{} changed {}", spec.key, other.key);
            }
        }
    }

    #[test]
    fn test_samples_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(Parameters::sample(&mut rng).validate().is_ok());
        }
    }
}
