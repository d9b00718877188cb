//! Processing timeline simulator.
//!
//! Drives the upload view's processing pipeline: a fixed, ordered list of
//! named steps walked from `Pending` through `Processing` to `Completed`,
//! one step in flight at a time, with a randomized delay per step and a
//! completion signal at the end.
//!
//! # Architecture
//!
//! ```text
//! TimelineSimulator            (runner.rs - timer chain, cancellation)
//!     ├── TimelineMachine      (machine.rs - pure FSM, invariants)
//!     └── dyn DelaySource      (delay.rs  - injected randomness)
//! ```
//!
//! The machine is deterministic and fully synchronous; every timing and
//! threading concern lives in the runner. Tests exercise the machine
//! directly for transition logic and the runner for cancellation and
//! completion semantics.
//!
//! There is no failure path yet: `StepStatus::Error` is reserved for the
//! real detection backend and no transition produces it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sentinel_core::simulator::{standard_timeline, TimelineSimulator, UniformDelay};
//!
//! let simulator = TimelineSimulator::new(
//!     standard_timeline(),
//!     Box::new(UniformDelay::default()),
//! )?
//! .with_completion_callback(Arc::new(|| println!("run finished")));
//!
//! simulator.start()?;
//! # Ok::<(), sentinel_core::simulator::SimulatorError>(())
//! ```

mod delay;
mod errors;
mod machine;
mod runner;
mod types;

pub use delay::{DelaySource, FixedDelay, UniformDelay};
pub use errors::{SimulatorError, SimulatorResult};
pub use machine::{Advance, TimelineMachine};
pub use runner::{CompletionCallback, ProgressCallback, TimelineSimulator};
pub use types::{format_step_duration, ProcessingStep, RunPhase, StepStatus};

/// Build the standard six-step processing timeline in order.
pub fn standard_timeline() -> Vec<ProcessingStep> {
    vec![
        ProcessingStep::new(1, "Frame Extraction"),
        ProcessingStep::new(2, "Image Normalization"),
        ProcessingStep::new(3, "AI Analysis"),
        ProcessingStep::new(4, "Severity Estimation"),
        ProcessingStep::new(5, "GPS Processing"),
        ProcessingStep::new(6, "Saving Results"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_timeline_has_six_ordered_steps() {
        let steps = standard_timeline();
        assert_eq!(steps.len(), 6);
        let ids: Vec<_> = steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(steps.iter().all(|s| s.status == StepStatus::Pending));
    }
}
