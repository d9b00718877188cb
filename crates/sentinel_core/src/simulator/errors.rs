//! Error types for the processing timeline simulator.

use thiserror::Error;

/// Errors produced by the timeline machine and simulator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulatorError {
    /// `start()` was called while a run was already in flight.
    #[error("a processing run is already in progress")]
    AlreadyRunning,

    /// `advance()` was called outside a run.
    #[error("no processing run is in progress")]
    NotRunning,

    /// A step was constructed with a zero id.
    #[error("step id must be positive (got {0})")]
    InvalidStepId(u32),

    /// Two steps in the timeline share an id.
    #[error("duplicate step id {0} in timeline")]
    DuplicateStepId(u32),
}

/// Result type for simulator operations.
pub type SimulatorResult<T> = Result<T, SimulatorError>;
