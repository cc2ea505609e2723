//! # SwarmPSO
//!
//! Particle swarm optimization for bounded continuous minimization.
//!
//! This crate re-exports the [`swarm_pso_core`] engine and adds what a run
//! needs around it:
//! - [`functions`]: benchmark objectives (Griewank, sphere, Rastrigin, Rosenbrock)
//! - [`trace`]: CSV position snapshots and an NDJSON improvement log
//! - [`report`]: JSON run reports and a text summary
//! - [`config`]: JSON run configuration files
//! - [`runner`]: a configured run, end to end
//!
//! ## Quick Start
//!
//! ```rust
//! use swarm_pso::prelude::*;
//! use swarm_pso::functions::griewank;
//!
//! let config = SwarmConfig::builder()
//!     .particles(200)
//!     .iterations(50)
//!     .uniform_bounds(2, -10.0, 10.0)
//!     .topology(Topology::NearestBest)
//!     .boundary(BoundaryPolicy::Bounce)
//!     .seed(1)
//!     .build();
//!
//! let mut swarm = Swarm::new(config)?;
//! let solution = swarm.optimize(&griewank)?;
//! assert!(solution.fitness < 0.5);
//! # Ok::<(), swarm_pso::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): worker pool for evaluation and position updates

#![forbid(unsafe_code)]

pub use swarm_pso_core::*;

pub mod config;
pub mod functions;
pub mod logging;
pub mod report;
pub mod runner;
pub mod trace;

pub use config::{RunConfig, RunConfigError};
pub use functions::Benchmark;
pub use report::RunReport;
pub use runner::{run, RunError};
pub use trace::{CsvTraceSink, TraceConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use swarm_pso_core::prelude::*;

    pub use crate::config::RunConfig;
    pub use crate::functions::Benchmark;
    pub use crate::report::RunReport;
    pub use crate::trace::CsvTraceSink;
}
