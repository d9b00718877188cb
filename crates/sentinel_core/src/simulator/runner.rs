//! Timer-driven runner for the timeline machine.
//!
//! `TimelineSimulator` wraps a `TimelineMachine` behind a mutex and drives
//! it from a single worker thread: sleep for the injected delay, then apply
//! one `advance` tick. Cancellation uses a run-generation counter guarded by
//! a condvar; `reset()` bumps the generation and wakes the sleeper, and a
//! worker re-checks its captured generation before every mutation, so a
//! stale timer can never touch state belonging to a newer run.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::delay::DelaySource;
use super::errors::SimulatorResult;
use super::machine::{Advance, TimelineMachine};
use super::types::{ProcessingStep, RunPhase};

/// Progress callback type for rendering consumers.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Arc<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Completion callback, fired exactly once per finished run.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// Generation-stamped gate for cancellable sleeps.
///
/// Each run captures the generation current at `start()`. Bumping the
/// generation cancels every sleeper holding an older stamp.
struct RunGate {
    generation: Mutex<u64>,
    condvar: Condvar,
}

impl RunGate {
    fn new() -> Self {
        Self {
            generation: Mutex::new(0),
            condvar: Condvar::new(),
        }
    }

    fn current(&self) -> u64 {
        *self.generation.lock()
    }

    fn bump(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        self.condvar.notify_all();
        *generation
    }

    /// Sleep for `delay` unless `generation` is invalidated first.
    ///
    /// Returns `true` when the full delay elapsed with the generation still
    /// current, `false` when the run was cancelled or superseded.
    fn sleep(&self, generation: u64, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        let mut guard = self.generation.lock();
        while *guard == generation {
            if self.condvar.wait_until(&mut guard, deadline).timed_out() {
                return *guard == generation;
            }
        }
        false
    }
}

/// What a worker tick observed, collected under the machine lock.
enum Tick {
    Started { name: String, percent: u32 },
    Finished,
    Cancelled,
}

/// Drives a fixed step timeline from `Pending` through `Completed`.
///
/// The step list is owned exclusively by the simulator; consumers render
/// from cloned snapshots. Only one step is ever in flight: advancement is
/// one self-rescheduling timer, not a pool of workers.
///
/// Callbacks run on the worker thread and must not call back into
/// `start()` or `reset()`.
pub struct TimelineSimulator {
    machine: Arc<Mutex<TimelineMachine>>,
    delay: Arc<Mutex<Box<dyn DelaySource>>>,
    gate: Arc<RunGate>,
    progress: Option<ProgressCallback>,
    completion: Option<CompletionCallback>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TimelineSimulator {
    /// Create a simulator over the given steps and delay source.
    ///
    /// Step ids must be positive and unique; the list is fixed for the
    /// lifetime of the simulator.
    pub fn new(steps: Vec<ProcessingStep>, delay: Box<dyn DelaySource>) -> SimulatorResult<Self> {
        let machine = TimelineMachine::new(steps)?;
        Ok(Self {
            machine: Arc::new(Mutex::new(machine)),
            delay: Arc::new(Mutex::new(delay)),
            gate: Arc::new(RunGate::new()),
            progress: None,
            completion: None,
            worker: Mutex::new(None),
        })
    }

    /// Set the progress callback (builder pattern).
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Set the completion callback (builder pattern).
    pub fn with_completion_callback(mut self, callback: CompletionCallback) -> Self {
        self.completion = Some(callback);
        self
    }

    /// Begin a run.
    ///
    /// Resets every step to `Pending`, marks the first step `Processing`,
    /// and schedules the timer chain. Returns `AlreadyRunning` while a run
    /// is in flight (single-flight guarantee). An empty timeline completes
    /// immediately.
    pub fn start(&self) -> SimulatorResult<()> {
        let (generation, first_step) = {
            let mut machine = self.machine.lock();
            machine.begin()?;
            // Invalidate any stale worker while still holding the machine
            // lock, so generation checks and state mutations stay ordered.
            let generation = self.gate.bump();
            let first_step = machine.current_step().map(|s| s.name.clone());
            (generation, first_step)
        };

        // The previous worker (finished or just cancelled) exits promptly.
        self.reap_worker();

        let Some(name) = first_step else {
            // Empty timeline: nothing to schedule.
            tracing::info!("processing run finished (empty timeline)");
            self.report("Complete", 100, "Processing finished");
            if let Some(callback) = &self.completion {
                callback();
            }
            return Ok(());
        };

        tracing::info!(step = %name, "processing run started");
        self.report(&name, 0, &format!("Starting {}", name));

        let handle = self.spawn_worker(generation);
        *self.worker.lock() = Some(handle);
        Ok(())
    }

    /// Cancel any in-flight run and return every step to `Pending`.
    ///
    /// Valid at any time. After `reset()` returns, no previously scheduled
    /// transition can mutate state and no completion callback will fire
    /// for the cancelled run.
    pub fn reset(&self) {
        {
            let mut machine = self.machine.lock();
            self.gate.bump();
            machine.reset();
        }
        self.reap_worker();
        tracing::debug!("timeline reset");
    }

    /// Owned snapshot of the step list for rendering.
    pub fn snapshot(&self) -> Vec<ProcessingStep> {
        self.machine.lock().snapshot()
    }

    /// Overall progress in percent (completed steps over total).
    pub fn progress(&self) -> u32 {
        self.machine.lock().progress_percent()
    }

    /// Current phase of the run.
    pub fn phase(&self) -> RunPhase {
        self.machine.lock().phase()
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.machine.lock().is_running()
    }

    /// Number of steps in the timeline.
    pub fn step_count(&self) -> usize {
        self.machine.lock().step_count()
    }

    fn report(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(callback) = &self.progress {
            callback(step_name, percent, message);
        }
    }

    fn reap_worker(&self) {
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }

    fn spawn_worker(&self, generation: u64) -> JoinHandle<()> {
        let machine = Arc::clone(&self.machine);
        let delay = Arc::clone(&self.delay);
        let gate = Arc::clone(&self.gate);
        let progress = self.progress.clone();
        let completion = self.completion.clone();

        thread::spawn(move || loop {
            let wait = delay.lock().next_delay();
            if !gate.sleep(generation, wait) {
                tracing::debug!("stale timer discarded");
                return;
            }

            let tick = {
                let mut machine = machine.lock();
                // reset() bumps the generation under this same lock.
                if gate.current() != generation {
                    Tick::Cancelled
                } else {
                    match machine.advance(wait) {
                        Ok(Advance::Next { started, .. }) => Tick::Started {
                            name: machine.steps()[started].name.clone(),
                            percent: machine.progress_percent(),
                        },
                        Ok(Advance::Finished { .. }) => Tick::Finished,
                        Err(_) => Tick::Cancelled,
                    }
                }
            };

            match tick {
                Tick::Started { name, percent } => {
                    tracing::debug!(step = %name, percent, "step started");
                    if let Some(callback) = &progress {
                        callback(&name, percent, &format!("Starting {}", name));
                    }
                }
                Tick::Finished => {
                    tracing::info!("processing run finished");
                    if let Some(callback) = &progress {
                        callback("Complete", 100, "Processing finished");
                    }
                    if let Some(callback) = &completion {
                        callback();
                    }
                    return;
                }
                Tick::Cancelled => return,
            }
        })
    }
}

impl Drop for TimelineSimulator {
    fn drop(&mut self) {
        self.gate.bump();
        if let Some(handle) = self.worker.get_mut().take() {
            let _ = handle.join();
        }
    }
}
