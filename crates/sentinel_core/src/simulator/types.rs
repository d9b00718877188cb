//! Types for the processing timeline simulator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status of one timeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Currently in flight. At most one step is in this state.
    Processing,
    /// Finished successfully.
    Completed,
    /// Reserved for a real processing backend; the simulator never
    /// produces this status.
    Error,
}

impl StepStatus {
    /// Get the display name for this status.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Whether the step has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One named stage of a processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingStep {
    /// Stable ordering key, unique and positive within a timeline.
    pub id: u32,
    /// Human-readable label.
    pub name: String,
    /// Current status.
    pub status: StepStatus,
    /// Elapsed time, recorded once the step completes (e.g. "1.8s").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl ProcessingStep {
    /// Create a pending step.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: StepStatus::Pending,
            duration: None,
        }
    }
}

/// Phase of the timeline machine as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    /// No run in progress; all steps pending.
    #[default]
    Idle,
    /// A run is advancing through the steps.
    Running,
    /// The last step completed.
    Finished,
}

/// Format an elapsed step time the way the timeline displays it.
pub fn format_step_duration(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_step_is_pending_without_duration() {
        let step = ProcessingStep::new(1, "Frame Extraction");
        assert_eq!(step.status, StepStatus::Pending);
        assert!(step.duration.is_none());
    }

    #[test]
    fn status_serde_uses_lowercase() {
        let json = serde_json::to_string(&StepStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn duration_formats_to_tenths() {
        assert_eq!(format_step_duration(Duration::from_millis(1840)), "1.8s");
        assert_eq!(format_step_duration(Duration::from_secs(3)), "3.0s");
    }
}
