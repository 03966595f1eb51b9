//! Observation candidate model.
//!
//! An [`Observation`] is the atomic unit the scheduler selects or
//! rejects: one feasible (satellite, target, time-window) action already
//! known to be geometrically visible. Visibility is decided upstream by
//! the access-computation service; the scheduler only decides whether
//! the action fits the plan.
//!
//! Three action kinds share the candidate representation: imaging tasks,
//! downlink passes, and command uplink passes. Communication passes are
//! bound to a ground antenna and contend for it; imaging tasks may
//! require a prior command uplink before they can execute.

use serde::{Deserialize, Serialize};

/// The kind of action a candidate represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationKind {
    /// Imaging task over a target.
    Imaging {
        /// Whether a command uplink must complete before imaging starts.
        requires_uplink: bool,
    },
    /// Data downlink pass over a ground antenna.
    Downlink,
    /// Command uplink pass over a ground antenna.
    Uplink {
        /// IDs of imaging observations this uplink carries commands for.
        commands_for: Vec<String>,
    },
}

impl ObservationKind {
    /// Whether this is an imaging action.
    #[inline]
    pub fn is_imaging(&self) -> bool {
        matches!(self, ObservationKind::Imaging { .. })
    }

    /// Whether this is a communication (antenna-bound) action.
    #[inline]
    pub fn is_comm(&self) -> bool {
        !self.is_imaging()
    }
}

/// A candidate observation opportunity.
///
/// Invariant: `end_ms > start_ms`. One instance exists per
/// (satellite, target, window) tuple — duplicates are a data-generation
/// error caught by input validation, not a scheduler concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Unique candidate identifier.
    pub id: String,
    /// Executing satellite.
    pub satellite_id: String,
    /// Observed target (imaging actions only).
    pub target_id: Option<String>,
    /// Sensor used (imaging actions only).
    pub sensor_id: Option<String>,
    /// Window start (ms).
    pub start_ms: i64,
    /// Window end (ms).
    pub end_ms: i64,
    /// Action kind.
    pub kind: ObservationKind,
    /// Ground antenna (communication actions only).
    pub antenna_id: Option<String>,
    /// Elevation of the satellite as seen from the target/station (deg).
    pub elevation_deg: f64,
    /// Off-nadir pointing angle (deg).
    pub off_nadir_deg: f64,
    /// Sun elevation at the target (deg).
    pub sun_elevation_deg: f64,
    /// Forecast cloud cover over the target (0–1).
    pub cloud_cover: f64,
    /// Storage consumed if selected (GB). Negative frees storage.
    pub storage_delta_gb: f64,
    /// Energy consumed if selected (Wh).
    pub energy_delta_wh: f64,
    /// Downlink time consumed if selected (s).
    pub downlink_sec: f64,
    /// Precomputed objective contribution.
    pub value: f64,
}

impl Observation {
    fn new(
        id: impl Into<String>,
        satellite_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
        kind: ObservationKind,
    ) -> Self {
        Self {
            id: id.into(),
            satellite_id: satellite_id.into(),
            target_id: None,
            sensor_id: None,
            start_ms,
            end_ms,
            kind,
            antenna_id: None,
            elevation_deg: 45.0,
            off_nadir_deg: 0.0,
            sun_elevation_deg: 45.0,
            cloud_cover: 0.0,
            storage_delta_gb: 0.0,
            energy_delta_wh: 0.0,
            downlink_sec: 0.0,
            value: 0.0,
        }
    }

    /// Creates an imaging candidate.
    pub fn imaging(
        id: impl Into<String>,
        satellite_id: impl Into<String>,
        target_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        let mut obs = Self::new(
            id,
            satellite_id,
            start_ms,
            end_ms,
            ObservationKind::Imaging {
                requires_uplink: false,
            },
        );
        obs.target_id = Some(target_id.into());
        obs
    }

    /// Creates a downlink candidate bound to an antenna.
    pub fn downlink(
        id: impl Into<String>,
        satellite_id: impl Into<String>,
        antenna_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        let mut obs = Self::new(id, satellite_id, start_ms, end_ms, ObservationKind::Downlink);
        obs.antenna_id = Some(antenna_id.into());
        obs
    }

    /// Creates a command uplink candidate bound to an antenna.
    pub fn uplink(
        id: impl Into<String>,
        satellite_id: impl Into<String>,
        antenna_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        let mut obs = Self::new(
            id,
            satellite_id,
            start_ms,
            end_ms,
            ObservationKind::Uplink {
                commands_for: Vec::new(),
            },
        );
        obs.antenna_id = Some(antenna_id.into());
        obs
    }

    /// Sets the sensor used for imaging.
    pub fn with_sensor(mut self, sensor_id: impl Into<String>) -> Self {
        self.sensor_id = Some(sensor_id.into());
        self
    }

    /// Sets the precomputed objective contribution.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the resource deltas applied when selected.
    pub fn with_resource_deltas(mut self, storage_gb: f64, energy_wh: f64) -> Self {
        self.storage_delta_gb = storage_gb;
        self.energy_delta_wh = energy_wh;
        self
    }

    /// Sets the downlink time consumed (s).
    pub fn with_downlink_time(mut self, downlink_sec: f64) -> Self {
        self.downlink_sec = downlink_sec;
        self
    }

    /// Sets the observation geometry.
    pub fn with_geometry(mut self, elevation_deg: f64, off_nadir_deg: f64) -> Self {
        self.elevation_deg = elevation_deg;
        self.off_nadir_deg = off_nadir_deg;
        self
    }

    /// Sets the sun elevation at the target (deg).
    pub fn with_sun_elevation(mut self, sun_elevation_deg: f64) -> Self {
        self.sun_elevation_deg = sun_elevation_deg;
        self
    }

    /// Sets the forecast cloud cover (0–1).
    pub fn with_cloud_cover(mut self, cover: f64) -> Self {
        self.cloud_cover = cover.clamp(0.0, 1.0);
        self
    }

    /// Marks an imaging candidate as needing a prior command uplink.
    pub fn requiring_uplink(mut self) -> Self {
        if let ObservationKind::Imaging { requires_uplink } = &mut self.kind {
            *requires_uplink = true;
        }
        self
    }

    /// Sets the imaging observations an uplink carries commands for.
    pub fn carrying_commands_for(mut self, observation_ids: Vec<String>) -> Self {
        if let ObservationKind::Uplink { commands_for } = &mut self.kind {
            *commands_for = observation_ids;
        }
        self
    }

    /// Window duration (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether the window overlaps another window.
    pub fn overlaps(&self, other: &Observation) -> bool {
        !(self.end_ms <= other.start_ms || other.end_ms <= self.start_ms)
    }
}
