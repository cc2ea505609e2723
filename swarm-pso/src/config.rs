//! Run configuration files.
//!
//! ```json
//! {
//!   "swarm": {
//!     "n_particles": 1000,
//!     "n_iterations": 100,
//!     "lower_bounds": [-10.0, -10.0],
//!     "upper_bounds": [10.0, 10.0],
//!     "topology": "nearest_best",
//!     "boundary": "bounce",
//!     "schedule": "evolving",
//!     "seed": 42
//!   },
//!   "objective": "griewank",
//!   "trace": { "dir": "out", "name": "griewank", "every_iteration": false }
//! }
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swarm_pso_core::{ConfigError, SwarmConfig};

use crate::functions::Benchmark;
use crate::trace::TraceConfig;

/// Errors raised while loading a [`RunConfig`].
#[derive(Debug, thiserror::Error)]
pub enum RunConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid swarm configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Everything the `swarm_pso` binary needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub swarm: SwarmConfig,
    #[serde(default)]
    pub objective: Benchmark,
    #[serde(default)]
    pub trace: Option<TraceConfig>,
}

impl Default for RunConfig {
    /// The reference run: 1000 particles, 100 iterations, Griewank on `[-10, 10]^2`.
    fn default() -> Self {
        Self {
            swarm: SwarmConfig::builder()
                .particles(1000)
                .iterations(100)
                .uniform_bounds(2, -10.0, 10.0)
                .build(),
            objective: Benchmark::Griewank,
            trace: Some(TraceConfig::default()),
        }
    }
}

impl RunConfig {
    /// Load and validate a JSON run configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RunConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RunConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                RunConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        config.swarm.validate()?;
        Ok(config)
    }

    /// Point the trace (if any) at `dir`, enabling it when it was absent.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let trace = self.trace.get_or_insert_with(TraceConfig::default);
        trace.dir = dir.into();
        self
    }
}
