pub mod plot;
pub mod results;
pub mod sinks;
