//! # SwarmPSO Core
//!
//! Particle swarm optimization over a bounded continuous search space.
//!
//! This crate provides:
//! - [`Particle`] state and the velocity/position recurrence
//! - Boundary policies (hard clamp, stochastic bounce)
//! - Neighborhood topologies (global best, nearest best)
//! - Coefficient schedules (constriction, evolving, fixed)
//! - The [`Swarm`] driver and its observer hooks
//!
//! The engine never touches the filesystem. Objectives are supplied through
//! [`FitnessFunction`], diagnostics leave through [`SwarmObserver`].
//!
//! ```rust
//! use swarm_pso_core::prelude::*;
//!
//! let config = SwarmConfig::builder()
//!     .particles(40)
//!     .iterations(60)
//!     .bounds(vec![-5.0, -5.0], vec![5.0, 5.0])
//!     .seed(7)
//!     .build();
//!
//! let mut swarm = Swarm::new(config)?;
//! let solution = swarm.optimize(&|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>())?;
//! assert!(solution.fitness < 1.0);
//! # Ok::<(), swarm_pso_core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): run evaluation and position updates on a fixed-size
//!   rayon pool when [`SwarmConfig::workers`] is greater than one

#![forbid(unsafe_code)]

pub mod boundary;
pub mod bounds;
pub mod config;
pub mod objective;
pub mod observe;
pub mod particle;
pub mod schedule;
pub mod swarm;
pub mod topology;

mod execution;

pub use boundary::BoundaryPolicy;
pub use bounds::Bounds;
pub use config::{SwarmConfig, SwarmConfigBuilder};
pub use objective::{Fallible, FitnessFunction};
pub use observe::{BestHistory, BestImproved, IterationSnapshot, NoopObserver, SwarmObserver};
pub use particle::Particle;
pub use schedule::{CoefficientSchedule, Coefficients};
pub use swarm::{Solution, Swarm, SwarmState};
pub use topology::{Neighborhood, Topology};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::boundary::BoundaryPolicy;
    pub use crate::config::{SwarmConfig, SwarmConfigBuilder};
    pub use crate::objective::{Fallible, FitnessFunction};
    pub use crate::observe::{BestImproved, IterationSnapshot, NoopObserver, SwarmObserver};
    pub use crate::schedule::{CoefficientSchedule, Coefficients};
    pub use crate::swarm::{Solution, Swarm, SwarmState};
    pub use crate::topology::Topology;
    pub use crate::Error;
}

/// Boxed error returned by objectives and observers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for SwarmPSO operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for SwarmPSO core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The swarm configuration was rejected at construction
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// The objective reported a failure
    #[error("objective failed at iteration {iteration}, particle {particle}: {source}")]
    Objective {
        iteration: usize,
        particle: usize,
        #[source]
        source: BoxError,
    },
    /// The objective returned NaN or an infinity
    #[error("objective returned non-finite fitness {value} at iteration {iteration}, particle {particle}")]
    NonFiniteFitness {
        iteration: usize,
        particle: usize,
        value: f64,
    },
    /// A diagnostics observer failed
    #[error("observer failed: {0}")]
    Observer(#[source] BoxError),
    /// `optimize` was called on a swarm that already ran
    #[error("swarm has already been optimized; call reset() before running it again")]
    AlreadyOptimized,
    /// A completed run left no incumbent.
    ///
    /// Validation guarantees at least one finite evaluation per run, so this
    /// only signals a broken driver invariant; the driver reports it instead
    /// of panicking.
    #[error("run produced no evaluated solution")]
    NoSolution,
    /// The worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[source] BoxError),
}

/// Reasons a [`SwarmConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `n_particles` was zero
    #[error("swarm needs at least one particle")]
    NoParticles,
    /// `n_iterations` was zero
    #[error("swarm needs at least one iteration")]
    NoIterations,
    /// The bounds describe a zero-dimensional space
    #[error("bounds must cover at least one dimension")]
    NoDimensions,
    /// Lower and upper bound arrays differ in length
    #[error("lower bounds have {lower} dimensions but upper bounds have {upper}")]
    DimensionMismatch { lower: usize, upper: usize },
    /// A bound is NaN or infinite
    #[error("bound of dimension {dimension} is not finite")]
    NonFiniteBound { dimension: usize },
    /// A lower bound exceeds its upper bound
    #[error("dimension {dimension}: lower bound {lower} exceeds upper bound {upper}")]
    InvertedBound {
        dimension: usize,
        lower: f64,
        upper: f64,
    },
}
