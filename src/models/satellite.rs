//! Satellite and sensor models.
//!
//! Satellites are immutable capacity templates: they carry storage and
//! power capacities plus per-kind action transition minimums, but never
//! live usage counters. Running usage belongs to the [`Solution`] being
//! searched, so independent solutions can be evaluated concurrently
//! without aliasing a shared satellite state.
//!
//! [`Solution`]: crate::solution::Solution

use serde::{Deserialize, Serialize};

/// Satellite platform classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatelliteType {
    /// Optical imaging satellite.
    Optical,
    /// Synthetic aperture radar satellite.
    Sar,
}

/// Imaging mode of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagingMode {
    // Optical modes
    Pushbroom,
    Agile,
    // SAR modes
    Stripmap,
    Spotlight,
    SlidingSpotlight,
    ScanSar,
}

impl ImagingMode {
    /// Whether this is an optical mode.
    pub fn is_optical(&self) -> bool {
        matches!(self, ImagingMode::Pushbroom | ImagingMode::Agile)
    }

    /// Whether this is a SAR mode.
    pub fn is_sar(&self) -> bool {
        !self.is_optical()
    }
}

/// An onboard imaging sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Unique sensor identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Imaging mode.
    pub mode: ImagingMode,
    /// Ground resolution (m).
    pub resolution_m: f64,
    /// Swath width (km).
    pub swath_km: f64,
    /// Imaging power draw (W).
    pub power_w: f64,
    /// Data generation rate (Mbps).
    pub data_rate_mbps: f64,
    /// Minimum sun elevation for optical imaging (deg).
    pub min_sun_elevation_deg: f64,
}

impl Sensor {
    /// Creates a sensor with default performance figures.
    pub fn new(id: impl Into<String>, mode: ImagingMode) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            mode,
            resolution_m: 1.0,
            swath_km: 10.0,
            power_w: 100.0,
            data_rate_mbps: 100.0,
            min_sun_elevation_deg: 20.0,
        }
    }

    /// Sets the sensor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the ground resolution (m).
    pub fn with_resolution(mut self, resolution_m: f64) -> Self {
        self.resolution_m = resolution_m;
        self
    }

    /// Sets the swath width (km).
    pub fn with_swath(mut self, swath_km: f64) -> Self {
        self.swath_km = swath_km;
        self
    }

    /// Sets the imaging power draw (W).
    pub fn with_power(mut self, power_w: f64) -> Self {
        self.power_w = power_w;
        self
    }

    /// Sets the data generation rate (Mbps).
    pub fn with_data_rate(mut self, data_rate_mbps: f64) -> Self {
        self.data_rate_mbps = data_rate_mbps;
        self
    }

    /// Data volume produced by imaging for the given duration (GB).
    pub fn data_volume_gb(&self, duration_ms: i64) -> f64 {
        (self.data_rate_mbps * duration_ms as f64 / 1000.0) / 8.0 / 1024.0
    }
}

/// Minimum gaps between consecutive actions on the same satellite (ms).
///
/// An imaging action followed by another imaging action needs a slew;
/// switching between imaging and a communication pass needs an attitude
/// and payload reconfiguration; chaining communication passes over
/// different antennas needs a re-point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransitionTimes {
    /// Imaging → imaging minimum gap (ms).
    pub imaging_switch_ms: i64,
    /// Imaging ↔ communication minimum gap (ms).
    pub imaging_to_comm_ms: i64,
    /// Communication → communication (different antennas) minimum gap (ms).
    pub comm_switch_ms: i64,
}

impl Default for TransitionTimes {
    fn default() -> Self {
        Self {
            imaging_switch_ms: 5_000,
            imaging_to_comm_ms: 10_000,
            comm_switch_ms: 3_000,
        }
    }
}

/// A satellite in the constellation.
///
/// Orbital parameters are opaque to the scheduler — access windows are
/// computed upstream. Only capacities and transition minimums feed the
/// constraint evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    /// Unique satellite identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Platform type.
    pub sat_type: SatelliteType,
    /// Orbit altitude (km).
    pub altitude_km: f64,
    /// Orbit inclination (deg).
    pub inclination_deg: f64,
    /// Onboard sensors.
    pub sensors: Vec<Sensor>,
    /// Onboard storage capacity (GB).
    pub storage_gb: f64,
    /// Battery capacity available for payload operations (Wh).
    pub power_capacity_wh: f64,
    /// Minimum action transition gaps.
    pub transition: TransitionTimes,
}

impl Satellite {
    /// Creates a satellite with default capacities.
    pub fn new(id: impl Into<String>, sat_type: SatelliteType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            sat_type,
            altitude_km: 500.0,
            inclination_deg: 97.4,
            sensors: Vec::new(),
            storage_gb: 100.0,
            power_capacity_wh: 1000.0,
            transition: TransitionTimes::default(),
        }
    }

    /// Creates an optical satellite.
    pub fn optical(id: impl Into<String>) -> Self {
        Self::new(id, SatelliteType::Optical)
    }

    /// Creates a SAR satellite.
    pub fn sar(id: impl Into<String>) -> Self {
        Self::new(id, SatelliteType::Sar)
    }

    /// Sets the satellite name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the orbit descriptor.
    pub fn with_orbit(mut self, altitude_km: f64, inclination_deg: f64) -> Self {
        self.altitude_km = altitude_km;
        self.inclination_deg = inclination_deg;
        self
    }

    /// Adds a sensor.
    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    /// Sets the storage capacity (GB).
    pub fn with_storage(mut self, storage_gb: f64) -> Self {
        self.storage_gb = storage_gb;
        self
    }

    /// Sets the payload power capacity (Wh).
    pub fn with_power_capacity(mut self, power_capacity_wh: f64) -> Self {
        self.power_capacity_wh = power_capacity_wh;
        self
    }

    /// Sets the action transition minimums.
    pub fn with_transition_times(mut self, transition: TransitionTimes) -> Self {
        self.transition = transition;
        self
    }

    /// Finds a sensor by ID.
    pub fn sensor(&self, sensor_id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id == sensor_id)
    }
}
