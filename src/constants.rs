// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const AIR_DENSITY: f64 = 1.29; // kg/m³
pub const DRAG_COEFFICIENT: f64 = 0.15;

// Flat ground
pub const GROUND_LEVEL: f64 = 0.0; // m

// Animation Parameters
pub const TICK_INTERVAL_MS: u64 = 20; // wall-clock, independent of dt
