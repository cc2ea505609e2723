//! Run reports.
//!
//! A [`RunReport`] captures what was run and what came out of it. It is
//! written as pretty JSON next to the trace files and rendered as a short
//! plain-text summary for the terminal.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use swarm_pso_core::{Solution, SwarmConfig};

use crate::functions::Benchmark;

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub objective: Benchmark,
    pub config: SwarmConfig,
    pub solution: Solution,
    /// Wall-clock time of `optimize`, in seconds
    pub elapsed_secs: f64,
    #[serde(default, serialize_with = "serialize_paths")]
    pub trace_files: Vec<PathBuf>,
}

fn serialize_paths<S: serde::Serializer>(paths: &[PathBuf], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(paths.iter().map(|p| p.display().to_string()))
}

impl RunReport {
    pub fn new(
        objective: Benchmark,
        config: SwarmConfig,
        solution: Solution,
        elapsed: Duration,
    ) -> Self {
        Self {
            objective,
            config,
            solution,
            elapsed_secs: elapsed.as_secs_f64(),
            trace_files: Vec::new(),
        }
    }

    pub fn with_trace_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.trace_files = files.into_iter().collect();
        self
    }

    /// Plain-text summary of the result.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let position = self
            .solution
            .position
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        // Writing into a String cannot fail.
        let _ = writeln!(out, "Result");
        let _ = writeln!(out, "  objective:  {}", self.objective.name());
        let _ = writeln!(
            out,
            "  swarm:      {} particles, {} iterations, {} dimensions",
            self.config.n_particles,
            self.config.n_iterations,
            self.config.dimensions()
        );
        let _ = writeln!(
            out,
            "  strategy:   {:?} / {:?} / {:?}",
            self.config.topology, self.config.boundary, self.config.schedule
        );
        let _ = writeln!(out, "  fitness:    {}", self.solution.fitness);
        let _ = writeln!(out, "  position:   {{{position}}}");
        let _ = writeln!(
            out,
            "  found at:   iteration {}, particle {}",
            self.solution.iteration, self.solution.particle
        );
        let _ = writeln!(out, "  elapsed:    {:.3}s", self.elapsed_secs);
        for path in &self.trace_files {
            let _ = writeln!(out, "  wrote:      {}", path.display());
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json =
            serde_json::to_vec_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        atomic_write(path, &json)
    }

    pub fn read_json(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(file).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"))?;

    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    {
        let mut f = File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.flush()?;
        let _ = f.sync_all();
    }

    fs::rename(&tmp_path, path)
}
