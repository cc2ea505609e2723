//! One configured run, end to end.

use std::io;
use std::time::Instant;

use swarm_pso_core::{NoopObserver, Swarm};
use tracing::info;

use crate::config::RunConfig;
use crate::report::RunReport;
use crate::trace::CsvTraceSink;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Swarm(#[from] swarm_pso_core::Error),
    #[error("trace output: {0}")]
    Trace(#[from] io::Error),
}

/// Build the swarm, optimize the configured benchmark and write traces and
/// `<name>_report.json` when tracing is configured.
pub fn run(config: &RunConfig) -> Result<RunReport, RunError> {
    let mut swarm = Swarm::new(config.swarm.clone())?;
    let objective = config.objective;
    info!(objective = objective.name(), "starting run");

    let started = Instant::now();
    let Some(trace) = &config.trace else {
        let solution = swarm.optimize_with(&objective, &mut NoopObserver)?;
        return Ok(RunReport::new(
            objective,
            config.swarm.clone(),
            solution,
            started.elapsed(),
        ));
    };

    let mut sink = CsvTraceSink::from_config(trace)?;
    let solution = swarm.optimize_with(&objective, &mut sink)?;
    let elapsed = started.elapsed();

    let report_path = trace.dir.join(format!("{}_report.json", trace.name));
    let mut files = sink.files_written().to_vec();
    files.push(report_path.clone());
    let report = RunReport::new(objective, config.swarm.clone(), solution, elapsed)
        .with_trace_files(files);
    report.write_json(&report_path)?;
    Ok(report)
}
