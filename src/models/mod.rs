//! Scheduling domain models.
//!
//! The vocabulary of the search: satellites with capacities and
//! transition minimums, targets with priorities, candidate observations
//! (imaging, downlink, uplink actions), and ground stations with
//! contended antennas.
//!
//! All times are `i64` milliseconds relative to a scenario epoch (t=0);
//! the caller defines what t=0 means. Storage is in GB, energy in Wh.

mod observation;
mod satellite;
mod station;
mod target;

pub use observation::{Observation, ObservationKind};
pub use satellite::{ImagingMode, Satellite, SatelliteType, Sensor, TransitionTimes};
pub use station::{Antenna, GroundStation};
pub use target::{Target, TargetType};
