//! Griewank Example
//!
//! Minimizes the 2-D Griewank function on [-10, 10]^2 with 1000 particles,
//! nearest-best topology and bounce boundaries, and writes the initial and
//! final particle positions to `output_init.csv` / `output_fin.csv`.
//!
//! Run with: cargo run --example griewank -p swarm-pso

use swarm_pso::functions::griewank;
use swarm_pso::logging::init_tracing;
use swarm_pso::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = SwarmConfig::builder()
        .particles(1000)
        .iterations(100)
        .uniform_bounds(2, -10.0, 10.0)
        .topology(Topology::NearestBest)
        .boundary(BoundaryPolicy::Bounce)
        .schedule(CoefficientSchedule::Evolving)
        .build();

    let mut swarm = Swarm::new(config)?;
    let mut sink = CsvTraceSink::create(".", "output")?;
    let solution = swarm.optimize_with(&griewank, &mut sink)?;

    println!("Result");
    println!("  fitness:  {}", solution.fitness);
    println!("  position: {:?}", solution.position);
    for path in sink.files_written() {
        println!("  wrote:    {}", path.display());
    }

    Ok(())
}
