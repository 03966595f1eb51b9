//! Observation target model.
//!
//! Only point targets are scheduled directly. Grid and area targets are
//! decomposed into points upstream, and moving targets are resolved into
//! time-stamped positions before candidate generation — the scheduler
//! sees the resulting point targets.

use serde::{Deserialize, Serialize};

/// Target classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// Fixed point target.
    Point,
    /// Grid cell (decomposed upstream).
    Grid,
    /// Moving land vehicle (resolved upstream).
    Vehicle,
    /// Moving ship (resolved upstream).
    Ship,
    /// Polygon area (decomposed upstream).
    Area,
}

/// An observation target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Unique target identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Target classification.
    pub target_type: TargetType,
    /// Latitude (deg).
    pub latitude_deg: f64,
    /// Longitude (deg).
    pub longitude_deg: f64,
    /// Ordinal priority, 1 (lowest) to 5 (highest).
    pub priority: u8,
    /// Required ground resolution (m). `None` = any.
    pub required_resolution_m: Option<f64>,
    /// Maximum acceptable cloud cover (0–1). `None` = any.
    pub max_cloud_cover: Option<f64>,
    /// Earliest acceptable imaging time (ms). `None` = unconstrained.
    pub earliest_ms: Option<i64>,
    /// Latest acceptable imaging time (ms). `None` = unconstrained.
    pub latest_ms: Option<i64>,
}

impl Target {
    /// Creates a point target at the given location.
    pub fn point(id: impl Into<String>, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            target_type: TargetType::Point,
            latitude_deg,
            longitude_deg,
            priority: 1,
            required_resolution_m: None,
            max_cloud_cover: None,
            earliest_ms: None,
            latest_ms: None,
        }
    }

    /// Sets the target name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the ordinal priority (clamped to 1–5).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 5);
        self
    }

    /// Sets the required ground resolution (m).
    pub fn with_required_resolution(mut self, resolution_m: f64) -> Self {
        self.required_resolution_m = Some(resolution_m);
        self
    }

    /// Sets the maximum acceptable cloud cover (0–1).
    pub fn with_max_cloud_cover(mut self, cover: f64) -> Self {
        self.max_cloud_cover = Some(cover.clamp(0.0, 1.0));
        self
    }

    /// Sets the acceptable imaging window (ms).
    pub fn with_time_window(mut self, earliest_ms: i64, latest_ms: i64) -> Self {
        self.earliest_ms = Some(earliest_ms);
        self.latest_ms = Some(latest_ms);
        self
    }

    /// Whether this target is directly schedulable.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.target_type == TargetType::Point
    }
}
