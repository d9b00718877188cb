//! Dashboard aggregations over the anomaly catalog.
//!
//! Pure functions over catalog slices; rendering (cards, charts, map
//! markers) happens in the front end.

use serde::{Deserialize, Serialize};

use crate::models::{Activity, ActivityStatus, Anomaly, AnomalyKind, RoadHealth, Severity};

/// Headline numbers for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total anomalies on record.
    pub total_anomalies: u32,
    /// Uploads that finished processing.
    pub videos_processed: u32,
    /// Mean sector health index, rounded to the nearest integer.
    pub overall_health_score: u32,
    /// Sector with the lowest health index.
    pub most_affected_sector: Option<String>,
    /// Anomaly count per severity.
    pub severe_count: u32,
    pub moderate_count: u32,
    pub minor_count: u32,
}

impl DashboardStats {
    /// Compute headline stats from catalog slices.
    pub fn compute(anomalies: &[Anomaly], health: &[RoadHealth], activity: &[Activity]) -> Self {
        let count_severity = |severity: Severity| {
            anomalies.iter().filter(|a| a.severity == severity).count() as u32
        };

        let overall_health_score = if health.is_empty() {
            0
        } else {
            let sum: u32 = health.iter().map(|h| h.health_index).sum();
            (sum as f64 / health.len() as f64).round() as u32
        };

        let most_affected_sector = health
            .iter()
            .min_by_key(|h| h.health_index)
            .map(|h| h.sector.clone());

        Self {
            total_anomalies: anomalies.len() as u32,
            videos_processed: activity
                .iter()
                .filter(|a| a.status == ActivityStatus::Processed)
                .count() as u32,
            overall_health_score,
            most_affected_sector,
            severe_count: count_severity(Severity::Severe),
            moderate_count: count_severity(Severity::Moderate),
            minor_count: count_severity(Severity::Minor),
        }
    }
}

/// One slice of a distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSlice {
    /// Slice label.
    pub name: String,
    /// Slice value (anomaly count).
    pub value: u32,
    /// Slice color, when the series carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Anomaly counts grouped by severity, severest first, with chart colors.
pub fn severity_distribution(anomalies: &[Anomaly]) -> Vec<DistributionSlice> {
    Severity::all()
        .iter()
        .rev()
        .map(|severity| DistributionSlice {
            name: severity.name().to_string(),
            value: anomalies.iter().filter(|a| a.severity == *severity).count() as u32,
            color: Some(severity.color().to_string()),
        })
        .collect()
}

/// Anomaly counts grouped by kind, in canonical kind order.
pub fn kind_distribution(anomalies: &[Anomaly]) -> Vec<DistributionSlice> {
    AnomalyKind::all()
        .iter()
        .map(|kind| DistributionSlice {
            name: kind.name().to_string(),
            value: anomalies.iter().filter(|a| a.kind == *kind).count() as u32,
            color: None,
        })
        .collect()
}
