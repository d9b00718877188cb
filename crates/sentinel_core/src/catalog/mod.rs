//! Static sample dataset backing the dashboard.
//!
//! Road Sentinel currently ships without a detection backend; every view is
//! driven by this in-memory catalog. Constructors return fresh owned values
//! so callers can filter or sort without touching shared state.
//!
//! TODO: replace with an API-backed source once the detection service lands.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Activity, ActivityStatus, Anomaly, AnomalyKind, RoadHealth, Severity};

/// One month of the detection trend series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Abbreviated month name.
    pub month: String,
    /// Anomalies detected that month.
    pub anomalies: u32,
    /// Uploads processed that month.
    pub processed: u32,
}

// Placeholder thumbnails cycled across sample anomalies.
const THUMBNAILS: [&str; 3] = [
    "https://images.unsplash.com/photo-1515162816999-a0c47dc192f7?w=200&h=150&fit=crop",
    "https://images.unsplash.com/photo-1586953083125-8f3a19c8e4b8?w=200&h=150&fit=crop",
    "https://images.unsplash.com/photo-1544636331-e26879cd4d9b?w=200&h=150&fit=crop",
];

/// Build a UTC timestamp from fixed components.
///
/// UTC has no ambiguous or skipped local times, so the only way this
/// falls back to the default is an invalid component in the sample data.
fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

fn anomaly(
    id: &str,
    kind: AnomalyKind,
    severity: Severity,
    confidence: f64,
    lat: f64,
    lng: f64,
    thumbnail: usize,
    road: &str,
    sector: &str,
    timestamp: DateTime<Utc>,
    description: &str,
) -> Anomaly {
    Anomaly {
        id: id.to_string(),
        kind,
        severity,
        confidence,
        lat,
        lng,
        thumbnail: THUMBNAILS[thumbnail % THUMBNAILS.len()].to_string(),
        road: road.to_string(),
        sector: sector.to_string(),
        timestamp,
        description: Some(description.to_string()),
    }
}

/// Sample detected anomalies, newest first.
pub fn sample_anomalies() -> Vec<Anomaly> {
    vec![
        anomaly(
            "a1",
            AnomalyKind::Pothole,
            Severity::Severe,
            0.94,
            33.6844,
            73.0479,
            0,
            "F-10 Main Road",
            "F-10",
            ts(2025, 12, 3, 12, 30),
            "Large pothole causing significant traffic slowdown",
        ),
        anomaly(
            "a2",
            AnomalyKind::Crack,
            Severity::Moderate,
            0.87,
            33.6920,
            73.0550,
            1,
            "Blue Area Boulevard",
            "Blue Area",
            ts(2025, 12, 3, 10, 15),
            "Longitudinal crack approximately 3 meters long",
        ),
        anomaly(
            "a3",
            AnomalyKind::Deformation,
            Severity::Minor,
            0.78,
            33.6750,
            73.0600,
            2,
            "G-9 Markaz Road",
            "G-9",
            ts(2025, 12, 2, 16, 45),
            "Surface deformation near drainage",
        ),
        anomaly(
            "a4",
            AnomalyKind::Pothole,
            Severity::Moderate,
            0.91,
            33.7000,
            73.0400,
            0,
            "F-7 Jinnah Super",
            "F-7",
            ts(2025, 12, 2, 14, 20),
            "Medium-sized pothole near intersection",
        ),
        anomaly(
            "a5",
            AnomalyKind::SurfaceWear,
            Severity::Minor,
            0.72,
            33.6800,
            73.0350,
            1,
            "I-8 Industrial Area",
            "I-8",
            ts(2025, 12, 1, 9, 0),
            "Surface wear due to heavy vehicle traffic",
        ),
        anomaly(
            "a6",
            AnomalyKind::Crack,
            Severity::Severe,
            0.96,
            33.6900,
            73.0700,
            2,
            "E-11 Main Highway",
            "E-11",
            ts(2025, 12, 1, 11, 30),
            "Network of cracks requiring immediate attention",
        ),
        anomaly(
            "a7",
            AnomalyKind::Pothole,
            Severity::Severe,
            0.89,
            33.6780,
            73.0520,
            0,
            "G-11 Markaz",
            "G-11",
            ts(2025, 11, 30, 15, 45),
            "Deep pothole with water accumulation",
        ),
        anomaly(
            "a8",
            AnomalyKind::Deformation,
            Severity::Moderate,
            0.83,
            33.6950,
            73.0450,
            1,
            "F-6 Super Market",
            "F-6",
            ts(2025, 11, 30, 8, 20),
            "Road settlement near utility cover",
        ),
    ]
}

fn health(sector: &str, health_index: u32, anomaly_count: u32, last_updated: DateTime<Utc>) -> RoadHealth {
    RoadHealth {
        sector: sector.to_string(),
        health_index,
        anomaly_count,
        last_updated,
    }
}

/// Per-sector road health, as of the last survey pass.
pub fn sector_health() -> Vec<RoadHealth> {
    vec![
        health("G-15", 68, 5, ts(2025, 12, 3, 12, 0)),
        health("F-7", 82, 2, ts(2025, 12, 3, 11, 30)),
        health("G-9", 55, 8, ts(2025, 12, 3, 10, 45)),
        health("Blue Area", 74, 3, ts(2025, 12, 3, 9, 15)),
        health("I-8", 45, 12, ts(2025, 12, 2, 16, 0)),
        health("E-11", 38, 15, ts(2025, 12, 2, 14, 30)),
        health("G-11", 61, 6, ts(2025, 12, 1, 18, 0)),
        health("F-6", 79, 2, ts(2025, 12, 1, 12, 0)),
    ]
}

fn activity(
    id: &str,
    file: &str,
    status: ActivityStatus,
    detected: u32,
    timestamp: DateTime<Utc>,
    duration: &str,
) -> Activity {
    Activity {
        id: id.to_string(),
        file: file.to_string(),
        status,
        detected,
        timestamp,
        duration: Some(duration.to_string()),
    }
}

/// Recent upload activity, newest first.
pub fn recent_activity() -> Vec<Activity> {
    vec![
        activity(
            "act1",
            "drone_survey_f10_dec03.mp4",
            ActivityStatus::Processed,
            5,
            ts(2025, 12, 3, 12, 30),
            "12:45",
        ),
        activity(
            "act2",
            "street_footage_bluearea.mp4",
            ActivityStatus::Processing,
            0,
            ts(2025, 12, 3, 11, 0),
            "08:32",
        ),
        activity(
            "act3",
            "highway_scan_e11.mp4",
            ActivityStatus::InQueue,
            0,
            ts(2025, 12, 3, 10, 30),
            "25:18",
        ),
        activity(
            "act4",
            "sector_g9_morning.mp4",
            ActivityStatus::Processed,
            8,
            ts(2025, 12, 2, 16, 45),
            "15:22",
        ),
        activity(
            "act5",
            "i8_industrial_area.mp4",
            ActivityStatus::Failed,
            0,
            ts(2025, 12, 2, 14, 0),
            "18:05",
        ),
    ]
}

/// Monthly detection trend for the analytics charts.
///
/// The current month is derived from the live catalog so the trend line
/// always agrees with the dashboard counters.
pub fn monthly_trend() -> Vec<MonthlyTrend> {
    let anomalies = sample_anomalies();
    let processed = recent_activity()
        .iter()
        .filter(|a| a.status == ActivityStatus::Processed)
        .count() as u32;

    let mut trend: Vec<MonthlyTrend> = [
        ("Jul", 23, 8),
        ("Aug", 31, 12),
        ("Sep", 28, 15),
        ("Oct", 45, 18),
        ("Nov", 38, 22),
    ]
    .iter()
    .map(|(month, anomalies, processed)| MonthlyTrend {
        month: month.to_string(),
        anomalies: *anomalies,
        processed: *processed,
    })
    .collect();

    trend.push(MonthlyTrend {
        month: "Dec".to_string(),
        anomalies: anomalies.len() as u32,
        processed,
    });
    trend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes_are_stable() {
        assert_eq!(sample_anomalies().len(), 8);
        assert_eq!(sector_health().len(), 8);
        assert_eq!(recent_activity().len(), 5);
        assert_eq!(monthly_trend().len(), 6);
    }

    #[test]
    fn anomaly_ids_are_unique() {
        let anomalies = sample_anomalies();
        let mut ids: Vec<_> = anomalies.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), anomalies.len());
    }

    #[test]
    fn timestamps_are_populated() {
        for anomaly in sample_anomalies() {
            assert!(anomaly.timestamp.timestamp() > 0);
        }
    }

    #[test]
    fn current_month_matches_catalog() {
        let trend = monthly_trend();
        let december = trend.last().unwrap();
        assert_eq!(december.anomalies, sample_anomalies().len() as u32);
        assert_eq!(december.processed, 2);
    }
}
