//! Objective functions
//!
//! The swarm minimizes whatever implements [`FitnessFunction`]. Plain
//! closures `Fn(&[f64]) -> f64` work directly; wrap a closure returning
//! `Result` in [`Fallible`] to report failures.

use crate::BoxError;

/// A fitness function for swarm optimization (lower is better)
pub trait FitnessFunction: Send + Sync {
    /// Evaluate the fitness of a position
    fn evaluate(&self, position: &[f64]) -> Result<f64, BoxError>;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> Result<f64, BoxError> {
        Ok(self(position))
    }
}

/// Adapter for objectives that can fail.
///
/// ```rust
/// use swarm_pso_core::{Fallible, FitnessFunction};
///
/// let objective = Fallible(|x: &[f64]| {
///     if x[0] < 0.0 {
///         Err("negative input")
///     } else {
///         Ok(x[0].sqrt())
///     }
/// });
/// assert_eq!(objective.evaluate(&[4.0]).unwrap(), 2.0);
/// assert!(objective.evaluate(&[-1.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F, E> FitnessFunction for Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn evaluate(&self, position: &[f64]) -> Result<f64, BoxError> {
        (self.0)(position).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn fn_items_and_closures_are_objectives() {
        assert_eq!(sphere.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
        let offset = 3.0;
        let shifted = move |x: &[f64]| x[0] + offset;
        assert_eq!(shifted.evaluate(&[1.0]).unwrap(), 4.0);
    }

    #[test]
    fn fallible_surfaces_the_error() {
        let objective = Fallible(|_: &[f64]| -> Result<f64, std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "simulator crashed"))
        });
        let err = objective.evaluate(&[0.0]).unwrap_err();
        assert_eq!(err.to_string(), "simulator crashed");
    }
}
