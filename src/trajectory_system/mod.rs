pub mod aerodynamics;
pub mod batch;
pub mod state;
pub mod trajectory;
