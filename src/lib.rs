//! Satellite constellation observation scheduling.
//!
//! Given a set of candidate (satellite, target, time-window) observation
//! opportunities — produced upstream by an access-computation service —
//! this crate decides which subset to execute so as to maximize a
//! priority-weighted objective under physical and operational
//! constraints: storage, energy, action transition times, antenna
//! exclusivity, and uplink precedence.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Satellite`, `Sensor`, `Target`,
//!   `Observation`, `GroundStation`, `Antenna`
//! - **`problem`**: `SchedulingProblem` — indexed, validated search input
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs)
//! - **`scoring`**: Priority/elevation/resolution/timeliness value function
//! - **`constraints`**: Composable feasibility checks behind one evaluator
//! - **`solution`**: Feasible selection with incremental objective and
//!   per-solution resource snapshots
//! - **`algorithms`**: Genetic algorithm, tabu search, simulated
//!   annealing, ant colony, and AWCSAT behind one `PlanningAlgorithm` trait
//! - **`kpi`**: Plan quality summary (utilisation, completion rate)
//! - **`benchmark`**: Deterministic scenario generation and engine comparison
//!
//! # Example
//!
//! ```
//! use obsplan::algorithms::{AlgorithmConfig, PlanningAlgorithm, TabuSearch};
//! use obsplan::models::{Observation, Satellite};
//! use obsplan::problem::SchedulingProblem;
//!
//! let satellites = vec![Satellite::optical("SAT-01").with_storage(10.0)];
//! let observations = vec![
//!     Observation::imaging("W1", "SAT-01", "T1", 0, 30_000)
//!         .with_value(12.0)
//!         .with_resource_deltas(3.0, 40.0),
//!     Observation::imaging("W2", "SAT-01", "T2", 120_000, 150_000)
//!         .with_value(9.0)
//!         .with_resource_deltas(3.0, 40.0),
//! ];
//! let problem = SchedulingProblem::without_ground_segment(observations, satellites)?;
//!
//! let config = AlgorithmConfig::default().with_max_iterations(50).with_seed(42);
//! let result = TabuSearch::new().solve(&problem, &config)?;
//! assert!(result.objective() >= 12.0);
//! # Ok::<(), obsplan::error::PlanError>(())
//! ```
//!
//! # Concurrency
//!
//! A run is single-threaded and CPU-bound. Every `Solution` owns its
//! resource-usage snapshot and every engine owns its search state
//! (tabu list, pheromone map, RNG), so independent runs can execute
//! concurrently without shared mutable state.
//!
//! # References
//!
//! - Glover (1989), "Tabu Search — Part I"
//! - Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"
//! - Dorigo et al. (1996), "Ant System"

pub mod algorithms;
pub mod benchmark;
pub mod constraints;
pub mod error;
pub mod kpi;
pub mod models;
pub mod problem;
pub mod scoring;
pub mod solution;
pub mod validation;
