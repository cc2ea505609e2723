//! The optimizer driver.
//!
//! A [`Swarm`] owns its particles, one random stream per particle, and the
//! swarm-wide incumbent. Each iteration of [`Swarm::optimize`]:
//!
//! 1. recomputes `(w, c1, c2)` from the schedule,
//! 2. evaluates every particle and commits improved bests in index order,
//! 3. freezes the neighborhood and moves every particle.
//!
//! Phase 2 finishes before phase 3 starts, so particles always move towards
//! bests from the same iteration's evaluations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::bounds::Bounds;
use crate::config::{SwarmConfig, SwarmConfigBuilder};
use crate::execution::Executor;
use crate::objective::FitnessFunction;
use crate::observe::{BestImproved, IterationSnapshot, NoopObserver, SwarmObserver};
use crate::particle::Particle;
use crate::schedule::Coefficients;
use crate::{Error, Result};

/// Best solution found by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub fitness: f64,
    pub position: Vec<f64>,
    /// Iteration in which this solution was evaluated
    pub iteration: usize,
    /// Index of the particle that found it
    pub particle: usize,
}

/// Lifecycle of a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmState {
    Constructed,
    Running,
    Terminated,
}

/// A particle swarm ready to minimize an objective.
#[derive(Debug)]
pub struct Swarm {
    config: SwarmConfig,
    bounds: Bounds,
    particles: Vec<Particle>,
    streams: Vec<StdRng>,
    seeder: StdRng,
    best: Option<Solution>,
    coefficients: Coefficients,
    iteration: usize,
    state: SwarmState,
    executor: Executor,
}

impl Swarm {
    /// Create a new config builder
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
    }

    /// Validate `config` and place every particle at random inside the bounds.
    pub fn new(config: SwarmConfig) -> Result<Self> {
        let bounds = config.validate()?;
        let executor = Executor::new(config.workers)?;

        let mut seeder = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (particles, streams) = spawn(&bounds, config.n_particles, &mut seeder);

        info!(
            particles = config.n_particles,
            iterations = config.n_iterations,
            dimensions = bounds.dimensions(),
            topology = ?config.topology,
            boundary = ?config.boundary,
            schedule = ?config.schedule,
            workers = executor.workers(),
            "swarm initialised"
        );

        Ok(Self {
            coefficients: config.schedule.coefficients(0, config.n_iterations),
            config,
            bounds,
            particles,
            streams,
            seeder,
            best: None,
            iteration: 0,
            state: SwarmState::Constructed,
            executor,
        })
    }

    /// Run the full iteration budget against `objective`.
    pub fn optimize<F>(&mut self, objective: &F) -> Result<Solution>
    where
        F: FitnessFunction + ?Sized,
    {
        self.optimize_with(objective, &mut NoopObserver)
    }

    /// Like [`Swarm::optimize`], reporting progress to `observer`.
    ///
    /// On failure the swarm still holds whatever best it found before the
    /// error; read it with [`Swarm::best`]. A swarm runs once: call
    /// [`Swarm::reset`] before optimizing it again.
    pub fn optimize_with<F, O>(&mut self, objective: &F, observer: &mut O) -> Result<Solution>
    where
        F: FitnessFunction + ?Sized,
        O: SwarmObserver + ?Sized,
    {
        if self.state != SwarmState::Constructed {
            return Err(Error::AlreadyOptimized);
        }
        self.state = SwarmState::Running;
        let outcome = self.run(objective, observer);
        self.state = SwarmState::Terminated;

        match &outcome {
            Ok(solution) => info!(
                fitness = solution.fitness,
                iteration = solution.iteration,
                particle = solution.particle,
                "optimization finished"
            ),
            Err(err) => warn!(
                error = %err,
                best = ?self.best.as_ref().map(|b| b.fitness),
                "optimization aborted"
            ),
        }
        outcome
    }

    fn run<F, O>(&mut self, objective: &F, observer: &mut O) -> Result<Solution>
    where
        F: FitnessFunction + ?Sized,
        O: SwarmObserver + ?Sized,
    {
        observer.run_started(&self.snapshot()).map_err(Error::Observer)?;

        for iteration in 0..self.config.n_iterations {
            self.coefficients = self
                .config
                .schedule
                .coefficients(iteration, self.config.n_iterations);
            self.evaluate(iteration, objective, observer)?;
            self.advance();
            self.iteration = iteration + 1;

            trace!(
                iteration,
                best = ?self.best.as_ref().map(|b| b.fitness),
                "iteration complete"
            );
            observer
                .iteration_completed(&self.snapshot())
                .map_err(Error::Observer)?;
        }

        let solution = self.best.clone().ok_or(Error::NoSolution)?;
        observer.run_finished(&solution).map_err(Error::Observer)?;
        Ok(solution)
    }

    /// Evaluation phase. Results are committed in particle order; a particle
    /// replaces the incumbent only on strict improvement.
    fn evaluate<F, O>(&mut self, iteration: usize, objective: &F, observer: &mut O) -> Result<()>
    where
        F: FitnessFunction + ?Sized,
        O: SwarmObserver + ?Sized,
    {
        let results = self.executor.evaluate(&self.particles, objective);

        for (index, result) in results.into_iter().enumerate() {
            let fitness = result.map_err(|source| Error::Objective {
                iteration,
                particle: index,
                source,
            })?;
            if !fitness.is_finite() {
                return Err(Error::NonFiniteFitness {
                    iteration,
                    particle: index,
                    value: fitness,
                });
            }

            let particle = &mut self.particles[index];
            if fitness >= particle.best_fitness() {
                continue;
            }
            let position = particle.position().to_vec();
            particle.set_best_fitness(fitness);
            particle.set_best_position(&position);

            if self.best.as_ref().map_or(true, |best| fitness < best.fitness) {
                debug!(iteration, particle = index, fitness, "swarm best improved");
                let event = BestImproved {
                    iteration,
                    particle: index,
                    fitness,
                    position: position.clone(),
                };
                self.best = Some(Solution {
                    fitness,
                    position,
                    iteration,
                    particle: index,
                });
                observer.best_improved(&event).map_err(Error::Observer)?;
            }
        }
        Ok(())
    }

    /// Update phase. Every particle reads the same frozen neighborhood and
    /// draws from its own stream, so the outcome does not depend on the
    /// number of workers.
    fn advance(&mut self) {
        let neighborhood = self.config.topology.neighborhood(
            &self.particles,
            self.best.as_ref().map(|b| b.position.as_slice()),
        );
        let coefficients = self.coefficients;
        let policy = self.config.boundary;
        let bounds = &self.bounds;

        self.executor
            .update_each(&mut self.particles, &mut self.streams, |index, particle, rng| {
                let rand_pair = (rng.gen::<f64>(), rng.gen::<f64>());
                particle.update_position(
                    coefficients,
                    rand_pair,
                    bounds,
                    neighborhood.best_for(index),
                    policy,
                    rng,
                );
            });
    }

    /// Re-draw every particle from the seed stream and forget the incumbent.
    pub fn reset(&mut self) {
        let (particles, streams) = spawn(&self.bounds, self.config.n_particles, &mut self.seeder);
        self.particles = particles;
        self.streams = streams;
        self.best = None;
        self.iteration = 0;
        self.coefficients = self.config.schedule.coefficients(0, self.config.n_iterations);
        self.state = SwarmState::Constructed;
        debug!("swarm reset");
    }

    pub fn snapshot(&self) -> IterationSnapshot<'_> {
        IterationSnapshot {
            iteration: self.iteration,
            coefficients: self.coefficients,
            best: self.best.as_ref(),
            particles: &self.particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    /// Incumbent fitness, `+inf` before the first evaluation.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.fitness)
    }

    pub fn state(&self) -> SwarmState {
        self.state
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }
}

/// One particle and one independent stream per slot, all derived from `seeder`.
fn spawn(bounds: &Bounds, count: usize, seeder: &mut StdRng) -> (Vec<Particle>, Vec<StdRng>) {
    (0..count)
        .map(|_| {
            let mut stream = StdRng::seed_from_u64(seeder.gen());
            let particle = Particle::random(bounds, &mut stream);
            (particle, stream)
        })
        .unzip()
}
