use std::path::PathBuf;

use swarm_pso::logging::init_tracing;
use swarm_pso::RunConfig;

fn usage() -> ! {
    eprintln!("Usage: swarm_pso [config.json] [out_dir]");
    eprintln!();
    eprintln!("Without a config file, minimizes Griewank on [-10,10]^2 with");
    eprintln!("1000 particles for 100 iterations.");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  RUST_LOG=debug swarm_pso run.json out/");
    std::process::exit(2);
}

fn main() {
    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") || args.len() > 2 {
        usage();
    }

    init_tracing();

    let config = if args.is_empty() {
        RunConfig::default()
    } else {
        match RunConfig::from_path(PathBuf::from(args.remove(0))) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    };
    let config = if args.is_empty() {
        config
    } else {
        config.with_output_dir(PathBuf::from(args.remove(0)))
    };

    match swarm_pso::run(&config) {
        Ok(report) => print!("{}", report.summary()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
