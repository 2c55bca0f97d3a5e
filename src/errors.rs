use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameter {key} = {value}: expected a value in [{min}, {max}]")]
    InvalidParameter {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Command error: {0}")]
    CommandError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
