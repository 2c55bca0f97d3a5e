pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::controls::{ControlSpec, Parameters, CONTROLS};
pub use constants::*;
pub use control::run_controller::{RunController, RunState, TickOutcome};
pub use control::scheduler::{CancellationToken, TickSchedule};
pub use control::session::{Command, Session, SessionExit};
pub use errors::{SimulationError, SimulationResult};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::batch::{compute_trajectory, BatchOutcome};
pub use trajectory_system::state::SimulationState;
pub use trajectory_system::trajectory::Trajectory;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::plot::{Curve, Plot};
pub use telemetry_system::results::{ResultRow, ResultsTable};
pub use telemetry_system::sinks::{CsvSink, TracingSink, TrajectorySink};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
