//! Scenario generation and cross-algorithm comparison.
//!
//! [`ScenarioGenerator`] builds deterministic synthetic scenarios
//! (constellation roster, point targets, visibility-window candidates
//! with geometry-derived quality and data volumes) from a seed, and
//! [`compare_algorithms`] runs every engine on one problem and collects
//! a KPI row per engine. Together they are the benchmarking surface the
//! evaluation layer builds on.

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::algorithms::{
    AlgorithmConfig, AntColony, Awcsat, GeneticAlgorithm, PlanningAlgorithm, SimulatedAnnealing,
    TabuSearch,
};
use crate::error::PlanError;
use crate::kpi::PlanKpi;
use crate::models::{Antenna, GroundStation, ImagingMode, Observation, Satellite, Sensor, Target};
use crate::problem::SchedulingProblem;
use crate::scoring::{apply_values, ValueWeights};

/// Deterministic synthetic scenario builder.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    num_satellites: usize,
    num_targets: usize,
    windows_per_target: usize,
    horizon_ms: i64,
    seed: u64,
}

impl ScenarioGenerator {
    /// Creates a generator with a small default scenario.
    pub fn new(seed: u64) -> Self {
        Self {
            num_satellites: 4,
            num_targets: 20,
            windows_per_target: 3,
            horizon_ms: 86_400_000, // One day.
            seed,
        }
    }

    /// Sets the constellation size.
    pub fn with_satellites(mut self, num_satellites: usize) -> Self {
        self.num_satellites = num_satellites;
        self
    }

    /// Sets the target count.
    pub fn with_targets(mut self, num_targets: usize) -> Self {
        self.num_targets = num_targets;
        self
    }

    /// Sets the visibility windows generated per target.
    pub fn with_windows_per_target(mut self, windows_per_target: usize) -> Self {
        self.windows_per_target = windows_per_target;
        self
    }

    /// Sets the planning horizon (ms).
    pub fn with_horizon(mut self, horizon_ms: i64) -> Self {
        self.horizon_ms = horizon_ms;
        self
    }

    /// Generates the scenario and assembles it into a problem.
    pub fn generate(&self) -> Result<SchedulingProblem, PlanError> {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let satellites: Vec<Satellite> = (0..self.num_satellites)
            .map(|i| {
                let id = format!("SAT-{:02}", i + 1);
                let (base, mode) = if i % 2 == 0 {
                    (Satellite::optical(&id), ImagingMode::Agile)
                } else {
                    (Satellite::sar(&id), ImagingMode::Stripmap)
                };
                base.with_orbit(480.0 + 20.0 * i as f64, 97.4)
                    .with_storage(120.0)
                    .with_power_capacity(1500.0)
                    .with_sensor(
                        Sensor::new("MAIN", mode)
                            .with_resolution(0.5 + rng.random::<f64>() * 2.0)
                            .with_data_rate(400.0 + rng.random::<f64>() * 400.0),
                    )
            })
            .collect();

        let targets: Vec<Target> = (0..self.num_targets)
            .map(|i| {
                Target::point(
                    format!("T-{:03}", i + 1),
                    rng.random_range(-60.0..60.0),
                    rng.random_range(-180.0..180.0),
                )
                .with_priority(rng.random_range(1..=5))
            })
            .collect();

        let mut observations = Vec::new();
        for target in &targets {
            for w in 0..self.windows_per_target {
                let sat = &satellites[rng.random_range(0..satellites.len())];
                let sensor = &sat.sensors[0];
                let duration_ms = rng.random_range(8_000..30_000);
                let start_ms = rng.random_range(0..(self.horizon_ms - duration_ms).max(1));
                let elevation = rng.random_range(20.0..85.0);

                observations.push(
                    Observation::imaging(
                        format!("{}-{}-W{}", sat.id, target.id, w + 1),
                        &sat.id,
                        &target.id,
                        start_ms,
                        start_ms + duration_ms,
                    )
                    .with_sensor(&sensor.id)
                    .with_geometry(elevation, rng.random_range(0.0..30.0))
                    .with_cloud_cover(rng.random::<f64>() * 0.5)
                    .with_resource_deltas(
                        sensor.data_volume_gb(duration_ms),
                        sensor.power_w * duration_ms as f64 / 3_600_000.0,
                    ),
                );
            }
        }

        // One station with one antenna, plus a downlink pass per
        // satellite spread across the back half of the horizon.
        let station = GroundStation::new("GS1", 40.4, 116.6)
            .with_name("Primary Ground Station")
            .with_antenna(Antenna::new("GS1-ANT1", "GS1"));
        let antennas = station.antennas.clone();
        for (i, sat) in satellites.iter().enumerate() {
            let start = self.horizon_ms / 2 + i as i64 * 600_000;
            observations.push(
                Observation::downlink(format!("{}-DL", sat.id), &sat.id, "GS1-ANT1", start, start + 300_000)
                    .with_downlink_time(300.0)
                    .with_resource_deltas(-40.0, 10.0),
            );
        }

        apply_values(
            &mut observations,
            &targets,
            &satellites,
            &ValueWeights::default(),
            self.horizon_ms,
        );

        SchedulingProblem::new(observations, satellites, antennas)
    }
}

/// One engine's row in a benchmark table.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    /// Engine name with parameters.
    pub algorithm: String,
    /// Best objective reached.
    pub objective: f64,
    /// Wall-clock runtime (s).
    pub runtime_seconds: f64,
    /// Outer iterations completed.
    pub iterations: u32,
    /// Full plan KPIs.
    pub kpi: PlanKpi,
}

/// Runs every engine on the problem and collects one row per engine.
///
/// Engines run sequentially with identical budgets and seeds; each run
/// owns its full search state, so callers may instead fan the engines
/// out across threads with the same inputs.
pub fn compare_algorithms(
    problem: &SchedulingProblem,
    config: &AlgorithmConfig,
) -> Result<Vec<BenchmarkRow>, PlanError> {
    let mut engines: Vec<Box<dyn PlanningAlgorithm>> = vec![
        Box::new(GeneticAlgorithm::new()),
        Box::new(TabuSearch::new()),
        Box::new(SimulatedAnnealing::new()),
        Box::new(AntColony::new()),
        Box::new(Awcsat::new()),
    ];

    let mut rows = Vec::with_capacity(engines.len());
    for engine in &mut engines {
        let result = engine.solve(problem, config)?;
        info!(
            "{}: objective {:.2} in {:.3}s ({} iterations)",
            engine.name(),
            result.objective(),
            result.runtime_seconds,
            result.iterations
        );
        rows.push(BenchmarkRow {
            algorithm: engine.name(),
            objective: result.objective(),
            runtime_seconds: result.runtime_seconds,
            iterations: result.iterations,
            kpi: PlanKpi::calculate(&result.best, problem),
        });
    }
    Ok(rows)
}
