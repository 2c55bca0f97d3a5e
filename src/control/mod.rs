pub mod run_controller;
pub mod scheduler;
pub mod session;
