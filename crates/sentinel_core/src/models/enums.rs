//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Kind of road-surface anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Pothole,
    Crack,
    Deformation,
    SurfaceWear,
}

impl AnomalyKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pothole => "Pothole",
            Self::Crack => "Crack",
            Self::Deformation => "Deformation",
            Self::SurfaceWear => "Surface Wear",
        }
    }

    /// Get all anomaly kinds.
    pub fn all() -> &'static [AnomalyKind] {
        &[
            Self::Pothole,
            Self::Crack,
            Self::Deformation,
            Self::SurfaceWear,
        ]
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Severity classification for a detected anomaly.
///
/// Carries no behavioral logic; used for color-keyed rendering
/// and for severity-count aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    /// Get the display name for this severity.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// Get all severities, mildest first.
    pub fn all() -> &'static [Severity] {
        &[Self::Minor, Self::Moderate, Self::Severe]
    }

    /// Create from index (for UI combo boxes).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Get index of this severity (for UI combo boxes).
    pub fn to_index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }

    /// HSL color used for map markers and chart slices.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Minor => "hsl(145, 80%, 40%)",
            Self::Moderate => "hsl(32, 100%, 50%)",
            Self::Severe => "hsl(0, 72%, 63%)",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Status of an upload activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    /// Waiting for a processing slot.
    #[serde(rename = "In Queue")]
    InQueue,
    /// Currently being processed.
    Processing,
    /// Finished successfully.
    Processed,
    /// Processing failed.
    Failed,
}

impl ActivityStatus {
    /// Get the display name for this status.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InQueue => "In Queue",
            Self::Processing => "Processing",
            Self::Processed => "Processed",
            Self::Failed => "Failed",
        }
    }

    /// Whether the activity has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processed | Self::Failed)
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_index_round_trips() {
        for severity in Severity::all() {
            assert_eq!(Severity::from_index(severity.to_index()), Some(*severity));
        }
        assert_eq!(Severity::from_index(99), None);
    }

    #[test]
    fn severity_ordering_is_mildest_first() {
        assert!(Severity::Minor < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
    }

    #[test]
    fn activity_terminal_states() {
        assert!(ActivityStatus::Processed.is_terminal());
        assert!(ActivityStatus::Failed.is_terminal());
        assert!(!ActivityStatus::InQueue.is_terminal());
        assert!(!ActivityStatus::Processing.is_terminal());
    }

    #[test]
    fn activity_status_serde_matches_display_strings() {
        for status in [
            ActivityStatus::InQueue,
            ActivityStatus::Processing,
            ActivityStatus::Processed,
            ActivityStatus::Failed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.name()));
        }
        let parsed: ActivityStatus = serde_json::from_str("\"In Queue\"").unwrap();
        assert_eq!(parsed, ActivityStatus::InQueue);
    }

    #[test]
    fn anomaly_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&AnomalyKind::SurfaceWear).unwrap();
        assert_eq!(json, "\"surface_wear\"");
    }
}
