//! Diagnostics hooks for a running swarm.
//!
//! The core never writes files. Anything that wants a trace (CSV snapshots,
//! NDJSON improvement logs, progress bars) implements [`SwarmObserver`] and is
//! handed to [`crate::Swarm::optimize_with`]. Hooks run on the driver thread,
//! between the evaluation and update phases, so they always see a consistent
//! swarm.

use crate::particle::Particle;
use crate::schedule::Coefficients;
use crate::swarm::Solution;
use crate::BoxError;

/// Emitted whenever the swarm-wide best strictly improves.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BestImproved {
    pub iteration: usize,
    pub particle: usize,
    pub fitness: f64,
    pub position: Vec<f64>,
}

/// Read-only view of the swarm at an iteration boundary.
#[derive(Debug, Clone, Copy)]
pub struct IterationSnapshot<'a> {
    /// Iterations completed so far (0 before the first one)
    pub iteration: usize,
    /// Coefficients used by the last completed iteration
    pub coefficients: Coefficients,
    /// Incumbent, if anything has been evaluated
    pub best: Option<&'a Solution>,
    pub particles: &'a [Particle],
}

impl<'a> IterationSnapshot<'a> {
    pub fn positions(&self) -> impl Iterator<Item = &'a [f64]> + 'a {
        self.particles.iter().map(Particle::position)
    }

    pub fn dimensions(&self) -> usize {
        self.particles.first().map_or(0, Particle::dimensions)
    }
}

/// A sink for swarm diagnostics.
///
/// Every hook defaults to a no-op. Returning an error aborts the run with
/// [`crate::Error::Observer`].
pub trait SwarmObserver {
    /// Called once with the initial placement, before the first evaluation.
    fn run_started(&mut self, _snapshot: &IterationSnapshot<'_>) -> Result<(), BoxError> {
        Ok(())
    }

    fn best_improved(&mut self, _event: &BestImproved) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called after every particle has moved for the iteration.
    fn iteration_completed(&mut self, _snapshot: &IterationSnapshot<'_>) -> Result<(), BoxError> {
        Ok(())
    }

    fn run_finished(&mut self, _solution: &Solution) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<O: SwarmObserver + ?Sized> SwarmObserver for &mut O {
    fn run_started(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<(), BoxError> {
        (**self).run_started(snapshot)
    }

    fn best_improved(&mut self, event: &BestImproved) -> Result<(), BoxError> {
        (**self).best_improved(event)
    }

    fn iteration_completed(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<(), BoxError> {
        (**self).iteration_completed(snapshot)
    }

    fn run_finished(&mut self, solution: &Solution) -> Result<(), BoxError> {
        (**self).run_finished(solution)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SwarmObserver for NoopObserver {}

/// Keeps every improvement of the swarm best, in order.
#[derive(Debug, Clone, Default)]
pub struct BestHistory {
    pub improvements: Vec<BestImproved>,
}

impl BestHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&BestImproved> {
        self.improvements.last()
    }
}

impl SwarmObserver for BestHistory {
    fn best_improved(&mut self, event: &BestImproved) -> Result<(), BoxError> {
        self.improvements.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_records_in_order() {
        let mut history = BestHistory::new();
        for (i, fitness) in [3.0, 2.0, 1.0].into_iter().enumerate() {
            history
                .best_improved(&BestImproved {
                    iteration: i,
                    particle: 0,
                    fitness,
                    position: vec![fitness],
                })
                .unwrap();
        }
        assert_eq!(history.improvements.len(), 3);
        assert_eq!(history.last().map(|e| e.fitness), Some(1.0));
    }

    #[test]
    fn snapshot_exposes_positions() {
        let particles = vec![
            Particle::new(vec![1.0, 2.0], vec![0.0, 0.0]),
            Particle::new(vec![3.0, 4.0], vec![0.0, 0.0]),
        ];
        let snapshot = IterationSnapshot {
            iteration: 0,
            coefficients: crate::schedule::CONSTRICTION,
            best: None,
            particles: &particles,
        };
        let positions: Vec<&[f64]> = snapshot.positions().collect();
        assert_eq!(positions, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
        assert_eq!(snapshot.dimensions(), 2);
    }

    #[test]
    fn improvement_event_serializes() {
        let event = BestImproved {
            iteration: 2,
            particle: 7,
            fitness: 0.5,
            position: vec![0.1, -0.2],
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BestImproved = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
