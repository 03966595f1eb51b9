//! Ground station and antenna models.
//!
//! Antennas are the contended resource for communication passes: one
//! antenna serves one satellite at a time, and switching between
//! satellites costs a minimum re-point gap.

use serde::{Deserialize, Serialize};

/// A ground antenna attached to a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Antenna {
    /// Unique antenna identifier.
    pub id: String,
    /// Owning station.
    pub station_id: String,
    /// Human-readable name.
    pub name: String,
    /// Maximum downlink rate (Mbps).
    pub max_data_rate_mbps: f64,
    /// Supported frequency bands.
    pub bands: Vec<String>,
    /// Minimum gap when the antenna switches between satellites (ms).
    pub satellite_switch_time_ms: i64,
}

impl Antenna {
    /// Creates an antenna with default capabilities.
    pub fn new(id: impl Into<String>, station_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            station_id: station_id.into(),
            name: String::new(),
            max_data_rate_mbps: 800.0,
            bands: vec!["X".into()],
            satellite_switch_time_ms: 5_000,
        }
    }

    /// Sets the antenna name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the maximum downlink rate (Mbps).
    pub fn with_data_rate(mut self, max_data_rate_mbps: f64) -> Self {
        self.max_data_rate_mbps = max_data_rate_mbps;
        self
    }

    /// Sets the supported frequency bands.
    pub fn with_bands(mut self, bands: Vec<String>) -> Self {
        self.bands = bands;
        self
    }

    /// Sets the inter-satellite switch gap (ms).
    pub fn with_switch_time(mut self, switch_ms: i64) -> Self {
        self.satellite_switch_time_ms = switch_ms;
        self
    }

    /// Whether the antenna supports a frequency band.
    pub fn supports_band(&self, band: &str) -> bool {
        self.bands.iter().any(|b| b == band)
    }
}

/// A ground station hosting one or more antennas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundStation {
    /// Unique station identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Latitude (deg).
    pub latitude_deg: f64,
    /// Longitude (deg).
    pub longitude_deg: f64,
    /// Minimum pass elevation (deg).
    pub min_elevation_deg: f64,
    /// Antennas at this station.
    pub antennas: Vec<Antenna>,
}

impl GroundStation {
    /// Creates a station at the given location.
    pub fn new(id: impl Into<String>, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            latitude_deg,
            longitude_deg,
            min_elevation_deg: 5.0,
            antennas: Vec::new(),
        }
    }

    /// Sets the station name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an antenna.
    pub fn with_antenna(mut self, antenna: Antenna) -> Self {
        self.antennas.push(antenna);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_builder() {
        let station = GroundStation::new("BJGS", 40.4, 116.6)
            .with_name("Beijing Station")
            .with_antenna(
                Antenna::new("BJGS_ANT01", "BJGS")
                    .with_data_rate(1200.0)
                    .with_bands(vec!["X".into(), "Ka".into()])
                    .with_switch_time(8_000),
            );

        assert_eq!(station.antennas.len(), 1);
        let ant = &station.antennas[0];
        assert!(ant.supports_band("Ka"));
        assert!(!ant.supports_band("S"));
        assert_eq!(ant.satellite_switch_time_ms, 8_000);
    }
}
