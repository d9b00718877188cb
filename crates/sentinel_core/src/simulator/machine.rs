//! The timeline state machine.
//!
//! `TimelineMachine` is pure and synchronous: it owns the step list and
//! applies transitions when told to, with no timers or threads of its own.
//! The driver (`TimelineSimulator`) decides *when* to call `advance`; the
//! machine guarantees *what* each transition does:
//!
//! - at most one step is `Processing` at any instant
//! - steps complete strictly in id order
//! - the list length is fixed for the lifetime of the machine

use std::time::Duration;

use super::errors::{SimulatorError, SimulatorResult};
use super::types::{format_step_duration, ProcessingStep, RunPhase, StepStatus};

/// Outcome of one `advance` tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The step at `completed` finished and the step at `started` began.
    Next { completed: usize, started: usize },
    /// The final step (at `completed`) finished; the run is over.
    Finished { completed: usize },
}

/// Finite-state machine walking a fixed step list.
#[derive(Debug, Clone)]
pub struct TimelineMachine {
    steps: Vec<ProcessingStep>,
    cursor: usize,
    phase: RunPhase,
}

impl TimelineMachine {
    /// Create a machine from a step list.
    ///
    /// Steps are ordered by id; ids must be positive and unique.
    /// All statuses are normalized to `Pending`.
    pub fn new(mut steps: Vec<ProcessingStep>) -> SimulatorResult<Self> {
        steps.sort_by_key(|s| s.id);
        for pair in steps.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(SimulatorError::DuplicateStepId(pair[0].id));
            }
        }
        if let Some(step) = steps.iter().find(|s| s.id == 0) {
            return Err(SimulatorError::InvalidStepId(step.id));
        }
        let mut machine = Self {
            steps,
            cursor: 0,
            phase: RunPhase::Idle,
        };
        machine.clear();
        Ok(machine)
    }

    /// Begin a run: reset every step and mark the first one `Processing`.
    ///
    /// Valid from `Idle` or `Finished`; returns `AlreadyRunning` mid-run.
    /// An empty timeline finishes immediately.
    pub fn begin(&mut self) -> SimulatorResult<()> {
        if self.phase == RunPhase::Running {
            return Err(SimulatorError::AlreadyRunning);
        }
        self.clear();
        self.cursor = 0;
        if self.steps.is_empty() {
            self.phase = RunPhase::Finished;
        } else {
            self.phase = RunPhase::Running;
            self.steps[0].status = StepStatus::Processing;
        }
        Ok(())
    }

    /// Complete the in-flight step and move the walk forward.
    ///
    /// `elapsed` is recorded as the completed step's duration.
    pub fn advance(&mut self, elapsed: Duration) -> SimulatorResult<Advance> {
        if self.phase != RunPhase::Running {
            return Err(SimulatorError::NotRunning);
        }
        let completed = self.cursor;
        self.steps[completed].status = StepStatus::Completed;
        self.steps[completed].duration = Some(format_step_duration(elapsed));

        if completed + 1 < self.steps.len() {
            self.cursor = completed + 1;
            self.steps[self.cursor].status = StepStatus::Processing;
            Ok(Advance::Next {
                completed,
                started: self.cursor,
            })
        } else {
            self.phase = RunPhase::Finished;
            Ok(Advance::Finished { completed })
        }
    }

    /// Return every step to `Pending`. Valid in any phase.
    pub fn reset(&mut self) {
        self.clear();
        self.cursor = 0;
        self.phase = RunPhase::Idle;
    }

    fn clear(&mut self) {
        for step in &mut self.steps {
            step.status = StepStatus::Pending;
            step.duration = None;
        }
    }

    /// Read-only view of the step list.
    pub fn steps(&self) -> &[ProcessingStep] {
        &self.steps
    }

    /// Owned snapshot of the step list for rendering.
    pub fn snapshot(&self) -> Vec<ProcessingStep> {
        self.steps.clone()
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// The step currently `Processing`, if any.
    pub fn current_step(&self) -> Option<&ProcessingStep> {
        if self.is_running() {
            self.steps.get(self.cursor)
        } else {
            None
        }
    }

    /// Number of steps in the timeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Overall progress as completed steps over total, in percent.
    pub fn progress_percent(&self) -> u32 {
        if self.steps.is_empty() {
            return match self.phase {
                RunPhase::Finished => 100,
                _ => 0,
            };
        }
        let completed = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        ((completed as f64 / self.steps.len() as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Vec<ProcessingStep> {
        vec![
            ProcessingStep::new(1, "Frame Extraction"),
            ProcessingStep::new(2, "AI Analysis"),
            ProcessingStep::new(3, "Saving Results"),
        ]
    }

    fn processing_count(machine: &TimelineMachine) -> usize {
        machine
            .steps()
            .iter()
            .filter(|s| s.status == StepStatus::Processing)
            .count()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let steps = vec![ProcessingStep::new(2, "A"), ProcessingStep::new(2, "B")];
        assert_eq!(
            TimelineMachine::new(steps).unwrap_err(),
            SimulatorError::DuplicateStepId(2)
        );
    }

    #[test]
    fn rejects_zero_ids() {
        let steps = vec![ProcessingStep::new(0, "A")];
        assert_eq!(
            TimelineMachine::new(steps).unwrap_err(),
            SimulatorError::InvalidStepId(0)
        );
    }

    #[test]
    fn orders_steps_by_id() {
        let steps = vec![
            ProcessingStep::new(3, "C"),
            ProcessingStep::new(1, "A"),
            ProcessingStep::new(2, "B"),
        ];
        let machine = TimelineMachine::new(steps).unwrap();
        let ids: Vec<_> = machine.steps().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn begin_marks_only_first_step_processing() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        machine.begin().unwrap();

        assert_eq!(machine.phase(), RunPhase::Running);
        assert_eq!(machine.steps()[0].status, StepStatus::Processing);
        assert_eq!(processing_count(&machine), 1);
    }

    #[test]
    fn begin_mid_run_is_rejected() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        machine.begin().unwrap();
        assert_eq!(machine.begin().unwrap_err(), SimulatorError::AlreadyRunning);
    }

    #[test]
    fn begin_after_finish_starts_a_fresh_run() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        machine.begin().unwrap();
        for _ in 0..3 {
            machine.advance(Duration::from_secs(1)).unwrap();
        }
        assert_eq!(machine.phase(), RunPhase::Finished);

        machine.begin().unwrap();
        assert_eq!(machine.phase(), RunPhase::Running);
        assert!(machine.steps()[1..]
            .iter()
            .all(|s| s.status == StepStatus::Pending && s.duration.is_none()));
    }

    #[test]
    fn steps_complete_in_id_order_with_one_in_flight() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        machine.begin().unwrap();

        let first = machine.advance(Duration::from_millis(1500)).unwrap();
        assert_eq!(
            first,
            Advance::Next {
                completed: 0,
                started: 1
            }
        );
        assert_eq!(machine.steps()[0].status, StepStatus::Completed);
        assert_eq!(machine.steps()[0].duration.as_deref(), Some("1.5s"));
        assert_eq!(machine.steps()[2].status, StepStatus::Pending);
        assert_eq!(processing_count(&machine), 1);

        machine.advance(Duration::from_secs(2)).unwrap();
        let last = machine.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(last, Advance::Finished { completed: 2 });
        assert_eq!(machine.phase(), RunPhase::Finished);
        assert_eq!(processing_count(&machine), 0);
        assert!(machine
            .steps()
            .iter()
            .all(|s| s.status == StepStatus::Completed));
    }

    #[test]
    fn advance_outside_a_run_is_rejected() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        assert_eq!(
            machine.advance(Duration::from_secs(1)).unwrap_err(),
            SimulatorError::NotRunning
        );
    }

    #[test]
    fn reset_returns_everything_to_pending() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        machine.begin().unwrap();
        machine.advance(Duration::from_secs(1)).unwrap();

        machine.reset();

        assert_eq!(machine.phase(), RunPhase::Idle);
        assert!(machine
            .steps()
            .iter()
            .all(|s| s.status == StepStatus::Pending && s.duration.is_none()));
        assert_eq!(machine.progress_percent(), 0);
    }

    #[test]
    fn progress_tracks_completed_steps() {
        let mut machine = TimelineMachine::new(three_steps()).unwrap();
        assert_eq!(machine.progress_percent(), 0);

        machine.begin().unwrap();
        machine.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(machine.progress_percent(), 33);

        machine.advance(Duration::from_secs(1)).unwrap();
        machine.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(machine.progress_percent(), 100);
    }

    #[test]
    fn empty_timeline_finishes_immediately() {
        let mut machine = TimelineMachine::new(Vec::new()).unwrap();
        machine.begin().unwrap();
        assert_eq!(machine.phase(), RunPhase::Finished);
        assert_eq!(machine.progress_percent(), 100);
    }
}
