//! Particle state in PSO

use rand::Rng;

use crate::boundary::BoundaryPolicy;
use crate::bounds::Bounds;
use crate::schedule::Coefficients;

/// One candidate solution and its personal trajectory memory.
///
/// The particle performs no fitness comparisons itself: the swarm decides
/// when a personal best improved and calls the setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_fitness: f64,
}

impl Particle {
    /// Create a particle at `position`; its personal best starts there with
    /// infinite fitness.
    pub fn new(position: Vec<f64>, velocity: Vec<f64>) -> Self {
        Self {
            best_position: position.clone(),
            position,
            velocity,
            best_fitness: f64::INFINITY,
        }
    }

    /// Place a particle uniformly inside `bounds`.
    ///
    /// The starting velocity points from the particle towards a second uniform
    /// draw, so each component is already within the span of its dimension.
    pub fn random<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        let position = bounds.sample(rng);
        let velocity = bounds
            .sample(rng)
            .into_iter()
            .zip(&position)
            .map(|(target, x)| target - x)
            .collect();
        Self::new(position, velocity)
    }

    /// Velocity recurrence for one iteration.
    ///
    /// `rand_pair` is shared by every dimension, which correlates the
    /// exploration step across axes. A `None` neighborhood best drops the
    /// social term. Each component is clamped to `±span` of its dimension.
    pub fn update_velocity(
        &mut self,
        coefficients: Coefficients,
        rand_pair: (f64, f64),
        bounds: &Bounds,
        neighborhood_best: Option<&[f64]>,
    ) {
        let (r1, r2) = rand_pair;
        for i in 0..self.velocity.len() {
            let cognitive = coefficients.cognitive * r1 * (self.best_position[i] - self.position[i]);
            let social = match neighborhood_best {
                Some(guide) => coefficients.social * r2 * (guide[i] - self.position[i]),
                None => 0.0,
            };
            let limit = bounds.span(i);
            self.velocity[i] = (coefficients.inertia * self.velocity[i] + cognitive + social)
                .max(-limit)
                .min(limit);
        }
    }

    /// Velocity update followed by a bounded step in every dimension.
    pub fn update_position<R: Rng + ?Sized>(
        &mut self,
        coefficients: Coefficients,
        rand_pair: (f64, f64),
        bounds: &Bounds,
        neighborhood_best: Option<&[f64]>,
        policy: BoundaryPolicy,
        rng: &mut R,
    ) {
        self.update_velocity(coefficients, rand_pair, bounds, neighborhood_best);

        for i in 0..self.position.len() {
            let (position, velocity) = policy.apply(
                self.position[i],
                self.velocity[i],
                bounds.lower()[i],
                bounds.upper()[i],
                rng,
            );
            self.position[i] = position;
            self.velocity[i] = velocity;
        }
    }

    pub fn set_best_position(&mut self, position: &[f64]) {
        self.best_position.clear();
        self.best_position.extend_from_slice(position);
    }

    pub fn set_best_fitness(&mut self, fitness: f64) {
        self.best_fitness = fitness;
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn dimensions(&self) -> usize {
        self.position.len()
    }
}
