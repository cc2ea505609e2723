//! Benchmark objectives.
//!
//! All functions have their global minimum `0.0` at the origin, except
//! Rosenbrock whose minimum sits at `(1, ..., 1)`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use swarm_pso_core::{BoxError, FitnessFunction};

/// `1 + sum(x_i^2) / 4000 - prod(cos(x_i / sqrt(i)))`, with `i` counted from 1.
pub fn griewank(x: &[f64]) -> f64 {
    let (sum, prod) = x
        .iter()
        .enumerate()
        .fold((0.0, 1.0), |(sum, prod), (i, v)| {
            (sum + v * v, prod * (v / ((i + 1) as f64).sqrt()).cos())
        });
    1.0 + sum / 4000.0 - prod
}

pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64 + x.iter().map(|v| v * v - 10.0 * (2.0 * PI * v).cos()).sum::<f64>()
}

pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

/// Named benchmark, selectable from a run configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benchmark {
    #[default]
    Griewank,
    Sphere,
    Rastrigin,
    Rosenbrock,
}

impl Benchmark {
    pub fn function(self) -> fn(&[f64]) -> f64 {
        match self {
            Benchmark::Griewank => griewank,
            Benchmark::Sphere => sphere,
            Benchmark::Rastrigin => rastrigin,
            Benchmark::Rosenbrock => rosenbrock,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Benchmark::Griewank => "griewank",
            Benchmark::Sphere => "sphere",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Rosenbrock => "rosenbrock",
        }
    }
}

impl FitnessFunction for Benchmark {
    fn evaluate(&self, position: &[f64]) -> Result<f64, BoxError> {
        Ok((self.function())(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minima() {
        assert_eq!(griewank(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(sphere(&[0.0, 0.0]), 0.0);
        assert!(rastrigin(&[0.0, 0.0]).abs() < 1e-12);
        assert_eq!(rosenbrock(&[1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn griewank_known_value() {
        // 1 + (1 + 4) / 4000 - cos(1) * cos(2 / sqrt(2))
        let expected = 1.0 + 5.0 / 4000.0 - 1.0f64.cos() * (2.0 / 2.0f64.sqrt()).cos();
        assert!((griewank(&[1.0, 2.0]) - expected).abs() < 1e-12);
    }

    #[test]
    fn benchmark_dispatch() {
        assert_eq!(Benchmark::Sphere.evaluate(&[3.0, 4.0]).unwrap(), 25.0);
        assert_eq!(Benchmark::default(), Benchmark::Griewank);
        let parsed: Benchmark = serde_json::from_str("\"rastrigin\"").unwrap();
        assert_eq!(parsed.name(), "rastrigin");
    }
}
