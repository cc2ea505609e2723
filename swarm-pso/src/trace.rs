//! On-disk run traces.
//!
//! [`CsvTraceSink`] is a [`SwarmObserver`] that writes, under one directory:
//! - `<name>_init.csv`: particle positions before the first evaluation
//! - `<name>_iter_<k>.csv`: positions after iteration `k` (opt-in)
//! - `<name>_fin.csv`: positions after the last iteration
//! - `<name>_best.ndjson`: one JSON line per swarm-best improvement
//!
//! Position files have a `x[0],...,x[d-1]` header and one row per particle.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swarm_pso_core::{BestImproved, BoxError, IterationSnapshot, Solution, SwarmObserver};

/// Trace settings as they appear in a run configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Output directory; the binary's `out_dir` argument overrides it
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// File name prefix
    #[serde(default = "default_name")]
    pub name: String,
    /// Also write a snapshot after every iteration
    #[serde(default)]
    pub every_iteration: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_name() -> String {
    "output".to_string()
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            name: default_name(),
            every_iteration: false,
        }
    }
}

/// Writes position snapshots and the improvement log of a run.
#[derive(Debug)]
pub struct CsvTraceSink {
    dir: PathBuf,
    name: String,
    every_iteration: bool,
    // Latest positions, flushed to `<name>_fin.csv` when the run finishes.
    last_positions: Vec<Vec<f64>>,
    files_written: Vec<PathBuf>,
}

impl CsvTraceSink {
    /// Create the output directory and a sink writing `<name>_*` files into it.
    pub fn create(dir: impl AsRef<Path>, name: impl Into<String>) -> io::Result<Self> {
        let name = name.into();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid trace name {name:?}"),
            ));
        }
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            name,
            every_iteration: false,
            last_positions: Vec::new(),
            files_written: Vec::new(),
        })
    }

    pub fn from_config(config: &TraceConfig) -> io::Result<Self> {
        Ok(Self::create(&config.dir, config.name.clone())?.every_iteration(config.every_iteration))
    }

    /// Enable per-iteration snapshots.
    pub fn every_iteration(mut self, enabled: bool) -> Self {
        self.every_iteration = enabled;
        self
    }

    pub fn init_path(&self) -> PathBuf {
        self.path("init.csv")
    }

    pub fn final_path(&self) -> PathBuf {
        self.path("fin.csv")
    }

    pub fn iteration_path(&self, iteration: usize) -> PathBuf {
        self.path(&format!("iter_{iteration}.csv"))
    }

    pub fn best_log_path(&self) -> PathBuf {
        self.path("best.ndjson")
    }

    /// Every file this sink has written, in order of first write.
    pub fn files_written(&self) -> &[PathBuf] {
        &self.files_written
    }

    fn path(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}_{suffix}", self.name))
    }

    fn record(&mut self, path: PathBuf) {
        if !self.files_written.contains(&path) {
            self.files_written.push(path);
        }
    }

    fn snapshot_to(&mut self, path: PathBuf, snapshot: &IterationSnapshot<'_>) -> io::Result<()> {
        write_positions(&path, snapshot.dimensions(), snapshot.positions())?;
        tracing::trace!(path = %path.display(), "wrote position snapshot");
        self.record(path);
        Ok(())
    }
}

impl SwarmObserver for CsvTraceSink {
    fn run_started(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<(), BoxError> {
        // A rerun into the same directory must not extend the previous log.
        let log = self.best_log_path();
        match fs::remove_file(&log) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.last_positions = snapshot.positions().map(<[f64]>::to_vec).collect();
        self.snapshot_to(self.init_path(), snapshot)?;
        Ok(())
    }

    fn best_improved(&mut self, event: &BestImproved) -> Result<(), BoxError> {
        let log = self.best_log_path();
        append_ndjson(&log, event)?;
        self.record(log);
        Ok(())
    }

    fn iteration_completed(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<(), BoxError> {
        for (stored, position) in self.last_positions.iter_mut().zip(snapshot.positions()) {
            stored.clear();
            stored.extend_from_slice(position);
        }
        if self.every_iteration {
            self.snapshot_to(self.iteration_path(snapshot.iteration), snapshot)?;
        }
        Ok(())
    }

    fn run_finished(&mut self, _solution: &Solution) -> Result<(), BoxError> {
        let path = self.final_path();
        let dimensions = self.last_positions.first().map_or(0, Vec::len);
        write_positions(&path, dimensions, self.last_positions.iter().map(Vec::as_slice))?;
        self.record(path);
        Ok(())
    }
}

/// Write a position table (`x[0],...` header, one row per point).
pub fn write_positions<'a, I>(path: &Path, dimensions: usize, rows: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    let header = (0..dimensions)
        .map(|i| format!("x[{i}]"))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{header}")?;
    for row in rows {
        let line = row
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Read a position table written by [`write_positions`].
pub fn read_positions(path: &Path) -> io::Result<Vec<Vec<f64>>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(',')
                .map(|cell| {
                    cell.trim()
                        .parse::<f64>()
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
                })
                .collect()
        })
        .collect()
}

pub(crate) fn append_ndjson<T: Serialize>(path: &Path, record: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line =
        serde_json::to_string(record).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let mut buf = line.into_bytes();
    buf.push(b'\n');
    file.write_all(&buf)?;
    file.flush()?;
    Ok(())
}

/// Read every record of an NDJSON file.
pub fn read_ndjson<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<Vec<T>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}
