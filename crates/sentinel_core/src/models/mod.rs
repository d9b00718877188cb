//! Data models for Road Sentinel.
//!
//! This module contains the core data structures used throughout the
//! application:
//! - Enums for anomaly classification and upload activity status
//! - Record structs for detected anomalies, sector health, and activity

mod enums;
mod records;

pub use enums::{ActivityStatus, AnomalyKind, Severity};
pub use records::{Activity, Anomaly, RoadHealth};
