//! Swarm configuration and its builder.

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryPolicy;
use crate::bounds::Bounds;
use crate::schedule::CoefficientSchedule;
use crate::topology::Topology;
use crate::ConfigError;

/// Configuration for a swarm run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Number of particles in the swarm
    pub n_particles: usize,
    /// Number of iterations `optimize` performs
    pub n_iterations: usize,
    /// Per-dimension lower limits of the search space
    pub lower_bounds: Vec<f64>,
    /// Per-dimension upper limits of the search space
    pub upper_bounds: Vec<f64>,
    /// Social topology
    #[serde(default)]
    pub topology: Topology,
    /// Out-of-bounds policy
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    /// Coefficient schedule
    #[serde(default)]
    pub schedule: CoefficientSchedule,
    /// Seed for reproducible runs; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Worker threads for evaluation and updates (1 = sequential)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    1
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            n_particles: 50,
            n_iterations: 100,
            lower_bounds: Vec::new(),
            upper_bounds: Vec::new(),
            topology: Topology::default(),
            boundary: BoundaryPolicy::default(),
            schedule: CoefficientSchedule::default(),
            seed: None,
            workers: default_workers(),
        }
    }
}

impl SwarmConfig {
    /// Create a new builder
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
    }

    /// Check every construction-time constraint and return the validated bounds.
    pub fn validate(&self) -> Result<Bounds, ConfigError> {
        if self.n_particles == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.n_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        Bounds::new(self.lower_bounds.clone(), self.upper_bounds.clone())
    }

    /// Dimensionality given by `lower_bounds`; only meaningful once
    /// [`SwarmConfig::validate`] has accepted the bounds.
    pub fn dimensions(&self) -> usize {
        self.lower_bounds.len()
    }
}

/// Builder for SwarmConfig
#[derive(Debug, Default)]
pub struct SwarmConfigBuilder {
    config: SwarmConfig,
}

impl SwarmConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles
    pub fn particles(mut self, n_particles: usize) -> Self {
        self.config.n_particles = n_particles;
        self
    }

    /// Set the number of iterations
    pub fn iterations(mut self, n_iterations: usize) -> Self {
        self.config.n_iterations = n_iterations;
        self
    }

    /// Set the lower and upper limits of every dimension
    pub fn bounds(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        self.config.lower_bounds = lower;
        self.config.upper_bounds = upper;
        self
    }

    /// Use `[lower, upper]` on each of `dimensions` axes
    pub fn uniform_bounds(self, dimensions: usize, lower: f64, upper: f64) -> Self {
        self.bounds(vec![lower; dimensions], vec![upper; dimensions])
    }

    /// Set the neighborhood topology
    pub fn topology(mut self, topology: Topology) -> Self {
        self.config.topology = topology;
        self
    }

    /// Set the boundary policy
    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.config.boundary = boundary;
        self
    }

    /// Set the coefficient schedule
    pub fn schedule(mut self, schedule: CoefficientSchedule) -> Self {
        self.config.schedule = schedule;
        self
    }

    /// Seed the random streams
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the worker thread count
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SwarmConfig {
        self.config
    }
}
