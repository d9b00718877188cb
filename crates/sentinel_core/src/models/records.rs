//! Record structs for detections, sector health, and upload activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ActivityStatus, AnomalyKind, Severity};

/// A single detected road-surface anomaly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    /// Unique identifier.
    pub id: String,
    /// Anomaly classification.
    pub kind: AnomalyKind,
    /// Severity classification.
    pub severity: Severity,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f64,
    /// Latitude of the detection.
    pub lat: f64,
    /// Longitude of the detection.
    pub lng: f64,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Road name where the anomaly was detected.
    pub road: String,
    /// City sector containing the road.
    pub sector: String,
    /// When the anomaly was detected.
    pub timestamp: DateTime<Utc>,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Aggregated health for one city sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadHealth {
    /// Sector name.
    pub sector: String,
    /// Health index, 0 (worst) to 100 (best).
    pub health_index: u32,
    /// Number of open anomalies in the sector.
    pub anomaly_count: u32,
    /// When the sector was last surveyed.
    pub last_updated: DateTime<Utc>,
}

/// One entry in the recent upload-activity list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier.
    pub id: String,
    /// Uploaded file name.
    pub file: String,
    /// Processing status.
    pub status: ActivityStatus,
    /// Number of anomalies detected so far.
    pub detected: u32,
    /// When the upload was received.
    pub timestamp: DateTime<Utc>,
    /// Footage length as mm:ss, if probed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_serializes_without_empty_description() {
        let anomaly = Anomaly {
            id: "a1".into(),
            kind: AnomalyKind::Pothole,
            severity: Severity::Severe,
            confidence: 0.94,
            lat: 33.6844,
            lng: 73.0479,
            thumbnail: String::new(),
            road: "F-10 Main Road".into(),
            sector: "F-10".into(),
            timestamp: Utc::now(),
            description: None,
        };

        let json = serde_json::to_value(&anomaly).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["kind"], "pothole");
    }
}
