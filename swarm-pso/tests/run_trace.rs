//! End-to-end runs writing traces and reports to disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use swarm_pso::trace::{read_ndjson, read_positions};
use swarm_pso::{
    BestImproved, Benchmark, BoundaryPolicy, CsvTraceSink, RunConfig, RunReport, Swarm,
    SwarmConfig, Topology, TraceConfig,
};

fn temp_dir(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!("swarm_pso_it_{prefix}_{pid}_{nanos}"));
    dir
}

fn run_config(dir: &Path, every_iteration: bool) -> RunConfig {
    RunConfig {
        swarm: SwarmConfig::builder()
            .particles(30)
            .iterations(12)
            .uniform_bounds(2, -10.0, 10.0)
            .topology(Topology::NearestBest)
            .boundary(BoundaryPolicy::Bounce)
            .seed(11)
            .build(),
        objective: Benchmark::Griewank,
        trace: Some(TraceConfig {
            dir: dir.to_path_buf(),
            name: "griewank".to_string(),
            every_iteration,
        }),
    }
}

#[test]
fn run_writes_snapshots_log_and_report() {
    let dir = temp_dir("run_writes");
    let config = run_config(&dir, false);
    let report = swarm_pso::run(&config).unwrap();

    let init = read_positions(&dir.join("griewank_init.csv")).unwrap();
    let fin = read_positions(&dir.join("griewank_fin.csv")).unwrap();
    assert_eq!(init.len(), 30);
    assert_eq!(fin.len(), 30);
    assert_ne!(init, fin);
    for row in init.iter().chain(&fin) {
        assert_eq!(row.len(), 2);
        assert!(row.iter().all(|x| (-10.0..=10.0).contains(x)));
    }
    let header = fs::read_to_string(dir.join("griewank_fin.csv")).unwrap();
    assert_eq!(header.lines().next(), Some("x[0],x[1]"));
    assert!(!dir.join("griewank_iter_1.csv").exists());

    let log: Vec<BestImproved> = read_ndjson(&dir.join("griewank_best.ndjson")).unwrap();
    assert!(!log.is_empty());
    assert!(log.windows(2).all(|w| w[1].fitness < w[0].fitness));
    let last = log.last().unwrap();
    assert_eq!(last.fitness, report.solution.fitness);
    assert_eq!(last.position, report.solution.position);

    let stored = RunReport::read_json(&dir.join("griewank_report.json")).unwrap();
    assert_eq!(stored.solution, report.solution);
    assert_eq!(stored.config, config.swarm);
    assert!(report
        .trace_files
        .contains(&dir.join("griewank_best.ndjson")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn per_iteration_snapshots_and_rerun_truncates_log() {
    let dir = temp_dir("per_iteration");
    let config = run_config(&dir, true);

    swarm_pso::run(&config).unwrap();
    for k in 1..=12 {
        assert!(dir.join(format!("griewank_iter_{k}.csv")).exists(), "iteration {k}");
    }
    let first: Vec<BestImproved> = read_ndjson(&dir.join("griewank_best.ndjson")).unwrap();

    // Same seed, same directory: the log is rewritten, not extended.
    swarm_pso::run(&config).unwrap();
    let second: Vec<BestImproved> = read_ndjson(&dir.join("griewank_best.ndjson")).unwrap();
    assert_eq!(first, second);

    let last_iteration = read_positions(&dir.join("griewank_iter_12.csv")).unwrap();
    let fin = read_positions(&dir.join("griewank_fin.csv")).unwrap();
    assert_eq!(last_iteration, fin);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn run_without_trace_touches_nothing() {
    let config = RunConfig {
        trace: None,
        ..run_config(&temp_dir("unused"), false)
    };
    let report = swarm_pso::run(&config).unwrap();
    assert!(report.trace_files.is_empty());
    assert!(report.solution.fitness.is_finite());
}

#[test]
fn sink_matches_swarm_state() {
    let dir = temp_dir("sink_state");
    let config = run_config(&dir, false).swarm;
    let mut swarm = Swarm::new(config).unwrap();
    let initial: Vec<Vec<f64>> = swarm.particles().iter().map(|p| p.position().to_vec()).collect();

    let mut sink = CsvTraceSink::create(&dir, "state").unwrap();
    swarm
        .optimize_with(&Benchmark::Sphere, &mut sink)
        .unwrap();

    let fin: Vec<Vec<f64>> = swarm.particles().iter().map(|p| p.position().to_vec()).collect();
    assert_eq!(read_positions(&sink.init_path()).unwrap(), initial);
    assert_eq!(read_positions(&sink.final_path()).unwrap(), fin);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_configuration_surfaces_as_swarm_error() {
    let mut config = run_config(&temp_dir("invalid"), false);
    config.trace = None;
    config.swarm.n_particles = 0;
    let err = swarm_pso::run(&config).unwrap_err();
    assert!(err.to_string().contains("at least one particle"));
}

mod with_prelude {
    use super::temp_dir;
    use std::fs;
    use swarm_pso::functions::griewank;
    use swarm_pso::prelude::*;

    // Same shape as the griewank example: std `Result` with a boxed error.
    fn traced_run(dir: &std::path::Path) -> Result<Solution, Box<dyn std::error::Error>> {
        let config = SwarmConfig::builder()
            .particles(20)
            .iterations(5)
            .uniform_bounds(2, -10.0, 10.0)
            .seed(3)
            .build();
        let mut swarm = Swarm::new(config)?;
        let mut sink = CsvTraceSink::create(dir, "output")?;
        Ok(swarm.optimize_with(&griewank, &mut sink)?)
    }

    #[test]
    fn prelude_keeps_std_result() {
        let dir = temp_dir("prelude");
        let solution = traced_run(&dir).unwrap();
        assert!(solution.fitness.is_finite());
        assert!(dir.join("output_fin.csv").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
