//! Execution seams: how per-particle work is spread over threads.
//!
//! Both phases of an iteration are embarrassingly parallel across particles.
//! This module only decides *where* the work runs; ordering rules (index-order
//! commit of bests, frozen neighborhood snapshot) live in the driver, so the
//! sequential and pooled paths produce identical swarms.

use crate::objective::FitnessFunction;
use crate::particle::Particle;
use crate::{BoxError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug)]
pub(crate) enum Executor {
    Sequential,
    #[cfg(feature = "parallel")]
    Pool(rayon::ThreadPool),
}

impl Executor {
    /// One thread (or fewer) means sequential execution.
    pub(crate) fn new(workers: usize) -> Result<Self> {
        if workers <= 1 {
            return Ok(Executor::Sequential);
        }

        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("swarm-pso-worker-{i}"))
                .build()
                .map_err(|e| crate::Error::WorkerPool(Box::new(e)))?;
            tracing::debug!(workers, "worker pool started");
            Ok(Executor::Pool(pool))
        }

        #[cfg(not(feature = "parallel"))]
        {
            tracing::warn!(
                workers,
                "built without the `parallel` feature; running sequentially"
            );
            Ok(Executor::Sequential)
        }
    }

    /// Evaluate every particle's current position, in index order.
    ///
    /// The sequential path stops after the first failure, so the result may be
    /// shorter than `particles`; the pooled path always evaluates everyone.
    pub(crate) fn evaluate<F>(
        &self,
        particles: &[Particle],
        objective: &F,
    ) -> Vec<core::result::Result<f64, BoxError>>
    where
        F: FitnessFunction + ?Sized,
    {
        match self {
            Executor::Sequential => {
                let mut results = Vec::with_capacity(particles.len());
                for particle in particles {
                    let result = objective.evaluate(particle.position());
                    let failed = result.is_err();
                    results.push(result);
                    if failed {
                        break;
                    }
                }
                results
            }
            #[cfg(feature = "parallel")]
            Executor::Pool(pool) => pool.install(|| {
                particles
                    .par_iter()
                    .map(|particle| objective.evaluate(particle.position()))
                    .collect()
            }),
        }
    }

    /// Run `update(index, particle, stream)` for every particle with its own
    /// random stream.
    pub(crate) fn update_each<S, U>(&self, particles: &mut [Particle], streams: &mut [S], update: U)
    where
        S: Send,
        U: Fn(usize, &mut Particle, &mut S) + Send + Sync,
    {
        match self {
            Executor::Sequential => {
                for (index, (particle, stream)) in
                    particles.iter_mut().zip(streams.iter_mut()).enumerate()
                {
                    update(index, particle, stream);
                }
            }
            #[cfg(feature = "parallel")]
            Executor::Pool(pool) => pool.install(|| {
                particles
                    .par_iter_mut()
                    .zip(streams.par_iter_mut())
                    .enumerate()
                    .for_each(|(index, (particle, stream))| update(index, particle, stream));
            }),
        }
    }

    pub(crate) fn workers(&self) -> usize {
        match self {
            Executor::Sequential => 1,
            #[cfg(feature = "parallel")]
            Executor::Pool(pool) => pool.current_num_threads(),
        }
    }
}
